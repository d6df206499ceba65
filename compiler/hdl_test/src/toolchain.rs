//! Collaborator interfaces.
//!
//! The runner drives a frontend, an interpreter, an IR package and a JIT
//! backend without knowing how any of them work. Each is a trait here;
//! [`crate::testing::mocks`] has in-memory implementations.

use std::path::Path;

use hdl_ir::{FunctionRef, InterpValue, IrType, IrValue, Module, SymbolicBindings};

use crate::TestError;

/// Frontend, IR converter and interpreter factory for one language.
pub trait Toolchain {
    type Interpreter: Interpreter;
    type Package: IrPackage;

    /// Parse and typecheck `program`.
    ///
    /// Located failures should be returned as [`TestError::Positional`] so
    /// the runner can print them against the source.
    fn parse_and_typecheck(
        &mut self,
        program: &str,
        path: &Path,
        module_name: &str,
    ) -> Result<Module, TestError>;

    /// Lower a typechecked module, tests included, to an IR package.
    fn convert_module_to_package(&mut self, module: &Module) -> Result<Self::Package, TestError>;

    fn interpreter(&mut self, module: &Module, trace_all: bool) -> Self::Interpreter;
}

/// Executes unit tests by name.
pub trait Interpreter {
    /// Run the test `name`.
    ///
    /// When a hook is given it is invoked after every function evaluation;
    /// a hook error fails the evaluation and therefore the test.
    fn run_test(
        &mut self,
        name: &str,
        hook: Option<&mut dyn PostFnEvalHook>,
    ) -> Result<(), TestError>;
}

/// Observer called by the interpreter after each function evaluation.
pub trait PostFnEvalHook {
    fn on_evaluation(
        &mut self,
        function: &FunctionRef,
        args: &[InterpValue],
        bindings: Option<&SymbolicBindings>,
        got: &InterpValue,
    ) -> Result<(), TestError>;
}

/// Compiled package, queried by mangled name.
pub trait IrPackage {
    type Function;

    /// Look up a function. `None` is not an error at this layer.
    fn get_function(&self, name: &str) -> Option<&Self::Function>;
}

/// Compiles IR functions into runnable artifacts.
pub trait JitBackend {
    type Function;
    type Artifact: JitFunction;

    fn compile(&self, function: &Self::Function) -> Result<Self::Artifact, TestError>;
}

/// A compiled, runnable function.
pub trait JitFunction {
    fn name(&self) -> &str;

    fn param_types(&self) -> &[IrType];

    fn run(&self, args: &[IrValue]) -> Result<IrValue, TestError>;
}
