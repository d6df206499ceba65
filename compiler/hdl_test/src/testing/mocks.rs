//! Mock collaborators.
//!
//! Everything here is scripted up front: the toolchain hands back a fixed
//! module and package, the interpreter replays recorded evaluations through
//! the hook, and the JIT "compiles" by cloning a closure.

use std::cell::Cell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use hdl_ir::{FunctionRef, InterpValue, IrType, IrValue, Module, SymbolicBindings};
use rustc_hash::FxHashMap;

use crate::{
    Interpreter, IrPackage, JitBackend, JitFunction, PostFnEvalHook, TestError, Toolchain,
};

type Body = Rc<dyn Fn(&[IrValue]) -> Result<IrValue, TestError>>;

// IR functions and packages

/// An IR function backed by a Rust closure. Doubles as its own compiled
/// artifact.
#[derive(Clone)]
pub struct MockFunction {
    name: String,
    params: Vec<IrType>,
    body: Body,
}

impl MockFunction {
    pub fn new(
        name: impl Into<String>,
        params: Vec<IrType>,
        body: impl Fn(&[IrValue]) -> IrValue + 'static,
    ) -> Self {
        Self::fallible(name, params, move |args| Ok(body(args)))
    }

    pub fn fallible(
        name: impl Into<String>,
        params: Vec<IrType>,
        body: impl Fn(&[IrValue]) -> Result<IrValue, TestError> + 'static,
    ) -> Self {
        MockFunction {
            name: name.into(),
            params,
            body: Rc::new(body),
        }
    }
}

impl fmt::Debug for MockFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl JitFunction for MockFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn param_types(&self) -> &[IrType] {
        &self.params
    }

    fn run(&self, args: &[IrValue]) -> Result<IrValue, TestError> {
        (self.body)(args)
    }
}

/// Functions keyed by their (mangled) name.
#[derive(Clone, Debug, Default)]
pub struct MockPackage {
    functions: FxHashMap<String, MockFunction>,
}

impl MockPackage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_function(mut self, function: MockFunction) -> Self {
        self.functions.insert(function.name.clone(), function);
        self
    }
}

impl IrPackage for MockPackage {
    type Function = MockFunction;

    fn get_function(&self, name: &str) -> Option<&MockFunction> {
        self.functions.get(name)
    }
}

// JIT backend

/// Backend whose "compilation" clones the function. Clones share one
/// compile counter.
#[derive(Clone, Debug, Default)]
pub struct MockJit {
    compiles: Rc<Cell<usize>>,
    failure: Option<String>,
}

impl MockJit {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects every function with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        MockJit {
            compiles: Rc::default(),
            failure: Some(message.into()),
        }
    }

    /// Number of `compile` calls so far, failed ones included.
    pub fn compile_count(&self) -> usize {
        self.compiles.get()
    }
}

impl JitBackend for MockJit {
    type Function = MockFunction;
    type Artifact = MockFunction;

    fn compile(&self, function: &MockFunction) -> Result<MockFunction, TestError> {
        self.compiles.set(self.compiles.get() + 1);
        if let Some(message) = &self.failure {
            return Err(TestError::Compile {
                function: function.name.clone(),
                message: message.clone(),
            });
        }
        Ok(function.clone())
    }
}

// Interpreter

/// One function evaluation performed by a scripted test.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub function: FunctionRef,
    pub args: Vec<InterpValue>,
    pub bindings: Option<SymbolicBindings>,
    pub got: InterpValue,
}

impl Evaluation {
    pub fn new(function: FunctionRef, args: Vec<InterpValue>, got: InterpValue) -> Self {
        Evaluation {
            function,
            args,
            bindings: None,
            got,
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: SymbolicBindings) -> Self {
        self.bindings = Some(bindings);
        self
    }
}

/// Evaluations a unit test performs and how it ends.
#[derive(Clone, Debug)]
pub struct ScriptedTest {
    evaluations: Vec<Evaluation>,
    outcome: Result<(), TestError>,
}

impl ScriptedTest {
    pub fn passing() -> Self {
        ScriptedTest {
            evaluations: Vec::new(),
            outcome: Ok(()),
        }
    }

    pub fn failing(error: TestError) -> Self {
        ScriptedTest {
            evaluations: Vec::new(),
            outcome: Err(error),
        }
    }

    #[must_use]
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluations.push(evaluation);
        self
    }
}

/// Replays [`ScriptedTest`]s, passing each evaluation to the hook.
#[derive(Clone, Debug, Default)]
pub struct MockInterpreter {
    tests: FxHashMap<String, ScriptedTest>,
    trace_all: bool,
    ran: Vec<String>,
}

impl MockInterpreter {
    pub fn trace_all(&self) -> bool {
        self.trace_all
    }

    /// Names of the tests run so far, in order.
    pub fn ran(&self) -> &[String] {
        &self.ran
    }
}

impl Interpreter for MockInterpreter {
    fn run_test(
        &mut self,
        name: &str,
        mut hook: Option<&mut dyn PostFnEvalHook>,
    ) -> Result<(), TestError> {
        self.ran.push(name.to_string());
        let Some(test) = self.tests.get(name) else {
            return Err(TestError::Internal(format!("no test named `{name}`")));
        };
        for evaluation in &test.evaluations {
            if let Some(hook) = hook.as_mut() {
                hook.on_evaluation(
                    &evaluation.function,
                    &evaluation.args,
                    evaluation.bindings.as_ref(),
                    &evaluation.got,
                )?;
            }
        }
        test.outcome.clone()
    }
}

// Toolchain

/// Frontend that returns a prebuilt module (or error) regardless of input.
#[derive(Clone, Debug)]
pub struct MockToolchain {
    module: Result<Module, TestError>,
    package: Result<MockPackage, TestError>,
    tests: FxHashMap<String, ScriptedTest>,
    conversions: usize,
    trace_all: Option<bool>,
}

impl MockToolchain {
    pub fn new(module: Module) -> Self {
        MockToolchain {
            module: Ok(module),
            package: Ok(MockPackage::new()),
            tests: FxHashMap::default(),
            conversions: 0,
            trace_all: None,
        }
    }

    /// A toolchain whose frontend always fails with `error`.
    pub fn frontend_error(error: TestError) -> Self {
        MockToolchain {
            module: Err(error),
            ..Self::new(Module::new("", "", ""))
        }
    }

    #[must_use]
    pub fn with_package(mut self, package: MockPackage) -> Self {
        self.package = Ok(package);
        self
    }

    #[must_use]
    pub fn with_package_error(mut self, error: TestError) -> Self {
        self.package = Err(error);
        self
    }

    #[must_use]
    pub fn with_test(mut self, name: impl Into<String>, test: ScriptedTest) -> Self {
        self.tests.insert(name.into(), test);
        self
    }

    /// How many times a package was built.
    pub fn conversions(&self) -> usize {
        self.conversions
    }

    /// `trace_all` flag of the last interpreter created, if any.
    pub fn trace_all(&self) -> Option<bool> {
        self.trace_all
    }
}

impl Toolchain for MockToolchain {
    type Interpreter = MockInterpreter;
    type Package = MockPackage;

    fn parse_and_typecheck(
        &mut self,
        _program: &str,
        _path: &Path,
        _module_name: &str,
    ) -> Result<Module, TestError> {
        self.module.clone()
    }

    fn convert_module_to_package(&mut self, _module: &Module) -> Result<MockPackage, TestError> {
        self.conversions += 1;
        self.package.clone()
    }

    fn interpreter(&mut self, _module: &Module, trace_all: bool) -> MockInterpreter {
        self.trace_all = Some(trace_all);
        MockInterpreter {
            tests: self.tests.clone(),
            trace_all,
            ran: Vec::new(),
        }
    }
}
