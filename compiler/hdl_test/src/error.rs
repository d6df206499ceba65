//! Error taxonomy for test execution.
//!
//! Everything that can go wrong while a test or quickcheck runs is a
//! [`TestError`]. The runner never aborts on one: it classifies the error
//! (located or internal), reports it and counts a failure. Only failures
//! before any test runs surface to the caller, as [`RunError`].

use std::io;

use hdl_diagnostic::PositionalError;
use hdl_ir::{ConversionError, IrValue, MangleError, Span};

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum TestError {
    /// The JIT backend could not compile a function.
    #[error("failed to compile `{function}`: {message}")]
    Compile { function: String, message: String },

    #[error("value conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// A compiled artifact failed while running.
    #[error("execution failed: {0}")]
    Execution(String),

    /// The interpreter and the JIT disagree on a function's result.
    #[error(
        "JIT produced a different value from the interpreter for {function}; JIT: {jit} interpreter: {interpreter}"
    )]
    Divergence {
        function: String,
        jit: IrValue,
        interpreter: IrValue,
    },

    /// A quickcheck predicate returned false for some generated input.
    #[error("Found falsifying example after {trials} tests: [{example}]")]
    Falsification {
        span: Span,
        trials: usize,
        example: String,
    },

    /// A quickcheck target has no function in the compiled package.
    #[error("could not find function `{0}` in the compiled package")]
    UnresolvedFunction(String),

    /// No static type recorded for a function whose arguments need rendering.
    #[error("no type information for `{0}`")]
    MissingType(String),

    #[error(transparent)]
    Mangle(#[from] MangleError),

    /// A located failure raised by the frontend or the interpreter.
    #[error("{0}")]
    Positional(PositionalError),

    #[error("{0}")]
    Internal(String),
}

impl TestError {
    /// Source location and message, if this error points into the module.
    ///
    /// Falsifications are located at the quickcheck's function.
    pub fn positional(&self) -> Option<PositionalError> {
        match self {
            TestError::Positional(error) => Some(error.clone()),
            TestError::Falsification { span, .. } => {
                Some(PositionalError::failure(*span, self.to_string()))
            }
            TestError::Compile { .. }
            | TestError::Conversion(_)
            | TestError::Execution(_)
            | TestError::Divergence { .. }
            | TestError::UnresolvedFunction(_)
            | TestError::MissingType(_)
            | TestError::Mangle(_)
            | TestError::Internal(_) => None,
        }
    }
}

impl From<PositionalError> for TestError {
    fn from(error: PositionalError) -> Self {
        TestError::Positional(error)
    }
}

/// Failure that prevents a module's tests from running at all.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Parsing, typechecking or IR conversion failed without a location.
    #[error("{0}")]
    Frontend(TestError),

    /// A pre-run diagnostic could not be written.
    #[error("failed to write diagnostic: {0}")]
    Io(#[from] io::Error),
}
