//! Testing utilities for the test runner itself.
//!
//! - **mocks**: in-memory toolchain, interpreter, IR package and JIT backend
//!
//! # Usage
//!
//! ```
//! use hdl_ir::{IrType, IrValue};
//! use hdl_test::testing::mocks::{MockFunction, MockJit, MockPackage};
//! use hdl_test::JitComparator;
//!
//! let package = MockPackage::new().with_function(MockFunction::new(
//!     "__m__id",
//!     vec![IrType::Bits(8)],
//!     |args| args[0].clone(),
//! ));
//! let comparator = JitComparator::new(MockJit::new());
//! assert_eq!(comparator.backend().compile_count(), 0);
//! # let _ = package;
//! ```

pub mod mocks;

pub use mocks::{
    Evaluation,
    MockFunction,
    MockInterpreter,
    MockJit,
    MockPackage,
    MockToolchain,
    ScriptedTest,
};
