//! Randomized property checking through the JIT.
//!
//! A quickcheck target is a predicate. [`do_quickcheck`] feeds it random
//! arguments until it returns false or the trial budget runs out, and
//! [`run_quickcheck`] turns a false result into a located failure naming
//! the arguments in source-level syntax.

use hdl_ir::random::random_function_arguments;
use hdl_ir::{ir_to_interp, mangle_function, IrValue, Module, QuickCheck};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{IrPackage, JitBackend, JitComparator, JitFunction, TestError};

/// Argument sets tried and the result for each, in trial order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct QuickCheckResults {
    arg_sets: Vec<Vec<IrValue>>,
    results: Vec<IrValue>,
}

impl QuickCheckResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, args: Vec<IrValue>, result: IrValue) {
        self.arg_sets.push(args);
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The final trial: the counter-example, if the search found one.
    pub fn last(&self) -> Option<(&[IrValue], &IrValue)> {
        let args = self.arg_sets.last()?;
        let result = self.results.last()?;
        Some((args, result))
    }

    pub fn arg_sets(&self) -> &[Vec<IrValue>] {
        &self.arg_sets
    }

    pub fn results(&self) -> &[IrValue] {
        &self.results
    }
}

/// Run `artifact` on up to `trial_count` random argument sets drawn from a
/// generator seeded with `seed`.
///
/// Stops after the first all-zeros (false) result. Execution errors end the
/// search immediately.
pub fn do_quickcheck<F>(
    artifact: &F,
    seed: u64,
    trial_count: u64,
) -> Result<QuickCheckResults, TestError>
where
    F: JitFunction + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut results = QuickCheckResults::new();
    for _ in 0..trial_count {
        let args = random_function_arguments(artifact.param_types(), &mut rng);
        let result = artifact.run(&args)?;
        let falsified = result.is_all_zeros();
        results.push(args, result);
        if falsified {
            break;
        }
    }
    tracing::debug!(
        function = artifact.name(),
        seed,
        trials = results.len(),
        "quickcheck search finished"
    );
    Ok(results)
}

/// Check one quickcheck declaration of `module`.
pub fn run_quickcheck<B, P>(
    comparator: &mut JitComparator<B>,
    package: &P,
    module: &Module,
    quickcheck: &QuickCheck,
    seed: u64,
) -> Result<(), TestError>
where
    B: JitBackend,
    P: IrPackage<Function = B::Function> + ?Sized,
{
    let function = &quickcheck.function;
    let name = mangle_function(function, None)?;
    let Some(ir_function) = package.get_function(&name) else {
        return Err(TestError::UnresolvedFunction(name));
    };
    let artifact = comparator.get_or_compile(&name, ir_function)?;
    let results = do_quickcheck(artifact, seed, quickcheck.test_count)?;

    // An empty search (zero trials) found nothing to report.
    let Some((last_args, last_result)) = results.last() else {
        return Ok(());
    };
    let Some(bits) = last_result.bits() else {
        return Err(TestError::Internal(format!(
            "quickcheck `{}` returned non-bits value {last_result}",
            quickcheck.identifier
        )));
    };
    if !bits.is_zero() {
        return Ok(());
    }

    let ty = module
        .function_type(&function.identifier)
        .ok_or_else(|| TestError::MissingType(function.identifier.clone()))?;
    if ty.params.len() != last_args.len() {
        return Err(TestError::Internal(format!(
            "`{}` takes {} parameters but was run with {}",
            function.identifier,
            ty.params.len(),
            last_args.len()
        )));
    }
    let example = last_args
        .iter()
        .zip(&ty.params)
        .map(|(value, param)| ir_to_interp(value, param).map(|v| v.to_string()))
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");

    Err(TestError::Falsification {
        span: function.span,
        trials: results.len(),
        example,
    })
}
