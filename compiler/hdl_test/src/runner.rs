//! Test execution engine.
//!
//! Runs a module's unit tests through the interpreter (optionally checking
//! every evaluation against the JIT), then its quickchecks through the JIT,
//! printing progress banners as it goes.
//!
//! A test failure of any kind is reported and counted; it never stops the
//! run. Only failures before the first test (frontend, package conversion)
//! are returned to the caller.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use hdl_diagnostic::{PositionalError, TerminalEmitter};
use hdl_ir::Module;

use crate::report::Reporter;
use crate::{
    resolve_seed, run_quickcheck, ComparatorHook, Interpreter, IrPackage, JitBackend,
    JitComparator, RunError, TestError, TestRunnerConfig, Toolchain,
};

/// Tallies for one module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Unit tests that passed the filter and were run.
    pub ran: usize,
    /// Failed unit tests and quickchecks.
    pub failed: usize,
    /// Unit tests excluded by the filter.
    pub skipped: usize,
    pub quickchecks_ran: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed != 0
    }
}

/// Test runner for a single module.
pub struct TestRunner<W: Write> {
    config: TestRunnerConfig,
    reporter: Reporter<W>,
    /// Whether the output is a terminal; only consulted for `ColorMode::Auto`.
    is_tty: bool,
}

impl TestRunner<io::Stderr> {
    /// Runner that reports to stderr.
    pub fn stderr(config: TestRunnerConfig) -> Self {
        let is_tty = io::stderr().is_terminal();
        TestRunner::new(config, io::stderr()).with_terminal(is_tty)
    }
}

impl<W: Write> TestRunner<W> {
    pub fn new(config: TestRunnerConfig, writer: W) -> Self {
        TestRunner {
            config,
            reporter: Reporter::new(writer),
            is_tty: false,
        }
    }

    #[must_use]
    pub fn with_terminal(mut self, is_tty: bool) -> Self {
        self.is_tty = is_tty;
        self
    }

    pub fn config(&self) -> &TestRunnerConfig {
        &self.config
    }

    pub fn into_writer(self) -> W {
        self.reporter.into_inner()
    }

    /// Run every unit test and quickcheck of `module`.
    ///
    /// With a comparator, the module is first converted to an IR package;
    /// each unit-test evaluation is cross-checked against the JIT and the
    /// quickchecks run. Without one, quickchecks are skipped.
    ///
    /// Returns an error only if the package cannot be built.
    pub fn run_module<T, B>(
        &mut self,
        toolchain: &mut T,
        module: &Module,
        comparator: Option<&mut JitComparator<B>>,
    ) -> Result<RunSummary, TestError>
    where
        T: Toolchain,
        B: JitBackend<Function = <T::Package as IrPackage>::Function>,
    {
        let mut comparison = match comparator {
            Some(comparator) => Some((comparator, toolchain.convert_module_to_package(module)?)),
            None => None,
        };
        let mut interpreter = toolchain.interpreter(module, self.config.trace_all);
        let mut summary = RunSummary::default();

        tracing::debug!(
            module = module.name(),
            tests = module.test_names().len(),
            comparing = comparison.is_some(),
            "running unit tests"
        );
        for name in module.test_names() {
            if !self.config.matches(name) {
                summary.skipped += 1;
                continue;
            }
            summary.ran += 1;
            self.reporter.run_unit_test(name);

            let result = match comparison.as_mut() {
                Some((comparator, package)) => {
                    let mut hook = ComparatorHook::new(&mut **comparator, &*package);
                    interpreter.run_test(name, Some(&mut hook))
                }
                None => interpreter.run_test(name, None),
            };
            match result {
                Ok(()) => self.reporter.unit_test_ok(),
                Err(error) => self.handle_error(&mut summary, module, name, &error, false),
            }
        }
        self.reporter
            .unit_summary(summary.ran, summary.failed, summary.skipped);

        if !module.quickchecks().is_empty() {
            match comparison.as_mut() {
                Some((comparator, package)) => {
                    self.run_quickchecks(&mut summary, module, &mut **comparator, &*package);
                }
                None => {
                    tracing::info!(
                        module = module.name(),
                        "JIT comparison disabled; skipping quickchecks"
                    );
                    self.reporter.skipping_quickchecks();
                }
            }
        }
        Ok(summary)
    }

    fn run_quickchecks<B, P>(
        &mut self,
        summary: &mut RunSummary,
        module: &Module,
        comparator: &mut JitComparator<B>,
        package: &P,
    ) where
        B: JitBackend,
        P: IrPackage<Function = B::Function>,
    {
        let seed = resolve_seed(self.config.seed);
        self.reporter.seed(seed);
        for quickcheck in module.quickchecks() {
            let name = &quickcheck.identifier;
            self.reporter.run_quickcheck(name, quickcheck.test_count);
            match run_quickcheck(comparator, package, module, quickcheck, seed) {
                Ok(()) => self.reporter.quickcheck_ok(name),
                Err(error) => self.handle_error(summary, module, name, &error, true),
            }
            summary.quickchecks_ran += 1;
        }
        self.reporter.quickcheck_summary(module.quickchecks().len());
    }

    /// Report a failed test or quickcheck and count it.
    ///
    /// Located errors are rendered against the module source; anything
    /// else is an internal error and goes into the `FAILED` line.
    fn handle_error(
        &mut self,
        summary: &mut RunSummary,
        module: &Module,
        name: &str,
        error: &TestError,
        is_quickcheck: bool,
    ) {
        tracing::debug!(%error, test = name, is_quickcheck, "handling test failure");
        let suffix = match error.positional() {
            Some(positional) => {
                if let Err(e) = self.emit(module.path(), module.source(), &positional) {
                    tracing::error!("failed to print diagnostic for `{name}`: {e}");
                }
                String::new()
            }
            None => {
                tracing::error!("internal error: {error}");
                format!(": internal error: {error}")
            }
        };
        self.reporter.failed(name, &suffix, is_quickcheck);
        summary.failed += 1;
    }

    fn emit(&mut self, path: &Path, source: &str, error: &PositionalError) -> io::Result<()> {
        let mut emitter =
            TerminalEmitter::with_color_mode(self.reporter.writer_mut(), self.config.color, self.is_tty);
        emitter.emit_positional(path, source, error)?;
        emitter.flush()
    }

    /// A failure before any test ran.
    ///
    /// Located errors are printed and count as a failed run; the rest are
    /// handed back to the caller.
    fn pre_run_failure(
        &mut self,
        path: &Path,
        source: &str,
        error: TestError,
    ) -> Result<bool, RunError> {
        match error.positional() {
            Some(positional) => {
                self.emit(path, source, &positional)?;
                Ok(true)
            }
            None => Err(RunError::Frontend(error)),
        }
    }
}

/// Parse, typecheck and test `program`.
///
/// Returns whether anything failed. Frontend errors that carry a location
/// are printed to `writer` and count as a failure.
pub fn parse_and_test<T, B, W>(
    toolchain: &mut T,
    program: &str,
    module_name: &str,
    path: &Path,
    config: &TestRunnerConfig,
    comparator: Option<&mut JitComparator<B>>,
    writer: W,
) -> Result<bool, RunError>
where
    T: Toolchain,
    B: JitBackend<Function = <T::Package as IrPackage>::Function>,
    W: Write,
{
    let mut runner = TestRunner::new(config.clone(), writer);
    let module = match toolchain.parse_and_typecheck(program, path, module_name) {
        Ok(module) => module,
        Err(error) => return runner.pre_run_failure(path, program, error),
    };
    run_with(&mut runner, toolchain, &module, comparator)
}

/// Test an already typechecked module.
pub fn run_module_tests<T, B, W>(
    toolchain: &mut T,
    module: &Module,
    config: &TestRunnerConfig,
    comparator: Option<&mut JitComparator<B>>,
    writer: W,
) -> Result<bool, RunError>
where
    T: Toolchain,
    B: JitBackend<Function = <T::Package as IrPackage>::Function>,
    W: Write,
{
    let mut runner = TestRunner::new(config.clone(), writer);
    run_with(&mut runner, toolchain, module, comparator)
}

fn run_with<T, B, W>(
    runner: &mut TestRunner<W>,
    toolchain: &mut T,
    module: &Module,
    comparator: Option<&mut JitComparator<B>>,
) -> Result<bool, RunError>
where
    T: Toolchain,
    B: JitBackend<Function = <T::Package as IrPackage>::Function>,
    W: Write,
{
    match runner.run_module(toolchain, module, comparator) {
        Ok(summary) => Ok(summary.has_failures()),
        Err(error) => runner.pre_run_failure(module.path(), module.source(), error),
    }
}
