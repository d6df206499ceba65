//! Differential test execution for HDL modules.
//!
//! Unit tests run in the interpreter. When a [`JitComparator`] is supplied,
//! every function the interpreter evaluates is also run through its
//! JIT-compiled form and the two results must agree; quickchecks then
//! search for counter-examples on the JIT with seeded random inputs.
//!
//! ```text
//! parse_and_test
//!   └─ TestRunner::run_module
//!        ├─ unit tests ── Interpreter::run_test ──► ComparatorHook ──► JitComparator
//!        └─ quickchecks ─ run_quickcheck ──► do_quickcheck ──► JitCache
//! ```
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=hdl_test=debug`: seed derivation, compilations, failure
//!   classification. Call [`init_tracing`] first.
//! - `RUST_LOG=hdl_test=trace`: also JIT cache hits.

mod config;
mod error;
pub mod jit;
mod quickcheck;
mod report;
mod runner;
mod seed;
pub mod testing;
mod toolchain;
mod tracing_setup;

pub use config::{ConfigError, TestRunnerConfig};
pub use error::{RunError, TestError};
pub use jit::{ComparatorHook, JitCache, JitComparator};
pub use quickcheck::{do_quickcheck, run_quickcheck, QuickCheckResults};
pub use report::{Reporter, QUICKCHECK_SPACES, UNIT_SPACES};
pub use runner::{parse_and_test, run_module_tests, RunSummary, TestRunner};
pub use seed::resolve_seed;
pub use toolchain::{Interpreter, IrPackage, JitBackend, JitFunction, PostFnEvalHook, Toolchain};
pub use tracing_setup::init_tracing;
