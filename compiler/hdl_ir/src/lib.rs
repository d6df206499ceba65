//! Shared data model for the HDL test runner.
//!
//! Two value domains meet here:
//!
//! ```text
//! InterpValue (interpreter) ──to_ir()──────────► IrValue (JIT)
//!        ▲                                          │
//!        └────────ir_to_interp(value, &ConcreteType)┘
//! ```
//!
//! The first direction is lossy (signedness and enum tags are dropped);
//! the second needs the static type to put them back.
//!
//! The crate also holds the declarations the runner reads from a
//! typechecked [`Module`], the name-mangling scheme shared with IR
//! conversion, and seeded random value generation for quickchecks.

mod bits;
mod convert;
mod interp;
pub mod mangle;
mod module;
pub mod random;
mod span;
mod value;

pub use bits::Bits;
pub use convert::{interp_values_to_ir, ir_to_interp, ConversionError};
pub use interp::{ConcreteType, InterpValue};
pub use mangle::{mangle_function, mangle_name, MangleError};
pub use module::{
    FunctionRef, FunctionType, Module, QuickCheck, SymbolicBindings,
    DEFAULT_QUICKCHECK_TEST_COUNT,
};
pub use span::{Span, SpanError};
pub use value::{IrType, IrValue};
