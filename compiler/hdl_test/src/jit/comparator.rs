use hdl_ir::{interp_values_to_ir, mangle_function, FunctionRef, InterpValue, SymbolicBindings};

use super::JitCache;
use crate::{IrPackage, JitBackend, JitFunction, PostFnEvalHook, TestError};

/// Checks interpreter results against JIT-compiled versions of the same
/// functions.
pub struct JitComparator<B: JitBackend> {
    backend: B,
    cache: JitCache<B::Artifact>,
}

impl<B: JitBackend> JitComparator<B> {
    pub fn new(backend: B) -> Self {
        JitComparator {
            backend,
            cache: JitCache::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache(&self) -> &JitCache<B::Artifact> {
        &self.cache
    }

    /// Fetch (compiling on first use) the artifact for `name`.
    pub fn get_or_compile(
        &mut self,
        name: &str,
        function: &B::Function,
    ) -> Result<&B::Artifact, TestError> {
        self.cache.get_or_compile(name, function, &self.backend)
    }

    /// Re-run one interpreter evaluation of `function` through the JIT.
    ///
    /// Functions the package does not contain are skipped with a warning;
    /// the interpreter may evaluate specializations the converter never
    /// emitted.
    pub fn run_comparison<P>(
        &mut self,
        package: &P,
        function: &FunctionRef,
        args: &[InterpValue],
        bindings: Option<&SymbolicBindings>,
        got: &InterpValue,
    ) -> Result<(), TestError>
    where
        P: IrPackage<Function = B::Function> + ?Sized,
    {
        let name = mangle_function(function, bindings)?;
        let Some(ir_function) = package.get_function(&name) else {
            tracing::warn!(
                function = %name,
                "no IR function for interpreted call; skipping JIT comparison"
            );
            return Ok(());
        };

        let artifact = self.cache.get_or_compile(&name, ir_function, &self.backend)?;
        let ir_args = interp_values_to_ir(args)?;
        let jit = artifact.run(&ir_args)?;
        let interpreter = got.to_ir()?;

        if jit != interpreter {
            return Err(TestError::Divergence {
                function: artifact.name().to_string(),
                jit,
                interpreter,
            });
        }
        Ok(())
    }
}

/// [`PostFnEvalHook`] that feeds every evaluation to a [`JitComparator`].
pub struct ComparatorHook<'a, B: JitBackend, P: ?Sized> {
    comparator: &'a mut JitComparator<B>,
    package: &'a P,
}

impl<'a, B: JitBackend, P: ?Sized> ComparatorHook<'a, B, P> {
    pub fn new(comparator: &'a mut JitComparator<B>, package: &'a P) -> Self {
        ComparatorHook {
            comparator,
            package,
        }
    }
}

impl<B, P> PostFnEvalHook for ComparatorHook<'_, B, P>
where
    B: JitBackend,
    P: IrPackage<Function = B::Function> + ?Sized,
{
    fn on_evaluation(
        &mut self,
        function: &FunctionRef,
        args: &[InterpValue],
        bindings: Option<&SymbolicBindings>,
        got: &InterpValue,
    ) -> Result<(), TestError> {
        self.comparator
            .run_comparison(self.package, function, args, bindings, got)
    }
}
