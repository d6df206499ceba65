use super::*;
use crate::testing::mocks::{MockFunction, MockJit, MockPackage};
use crate::{PostFnEvalHook, TestError};
use hdl_ir::{FunctionRef, InterpValue, IrType, IrValue, Span, SymbolicBindings};
use pretty_assertions::assert_eq;

fn operand(value: &IrValue) -> u64 {
    value.bits().and_then(hdl_ir::Bits::to_u64).unwrap()
}

fn adder(name: &str, skew: u64) -> MockFunction {
    MockFunction::new(name, vec![IrType::Bits(8), IrType::Bits(8)], move |args| {
        IrValue::ubits(8, operand(&args[0]) + operand(&args[1]) + skew)
    })
}

fn add_ref() -> FunctionRef {
    FunctionRef::new("add", "m", Span::new(0, 3))
}

fn args(a: u64, b: u64) -> Vec<InterpValue> {
    vec![InterpValue::ubits(8, a), InterpValue::ubits(8, b)]
}

#[test]
fn test_agreement_is_ok() {
    let package = MockPackage::new().with_function(adder("__m__add", 0));
    let mut comparator = JitComparator::new(MockJit::new());

    let got = InterpValue::ubits(8, 5);
    comparator
        .run_comparison(&package, &add_ref(), &args(2, 3), None, &got)
        .unwrap();
    comparator
        .run_comparison(&package, &add_ref(), &args(1, 4), None, &got)
        .unwrap();

    assert_eq!(comparator.backend().compile_count(), 1);
    assert!(comparator.cache().contains("__m__add"));
}

#[test]
fn test_divergence_names_both_values() {
    let package = MockPackage::new().with_function(adder("__m__add", 1));
    let mut comparator = JitComparator::new(MockJit::new());

    let err = comparator
        .run_comparison(
            &package,
            &add_ref(),
            &args(2, 3),
            None,
            &InterpValue::ubits(8, 5),
        )
        .unwrap_err();

    assert_eq!(
        err,
        TestError::Divergence {
            function: "__m__add".into(),
            jit: IrValue::ubits(8, 6),
            interpreter: IrValue::ubits(8, 5),
        }
    );
    assert_eq!(
        err.to_string(),
        "JIT produced a different value from the interpreter for __m__add; \
         JIT: bits[8]:6 interpreter: bits[8]:5"
    );
}

#[test]
fn test_signedness_does_not_cause_divergence() {
    let package = MockPackage::new().with_function(adder("__m__add", 0));
    let mut comparator = JitComparator::new(MockJit::new());
    comparator
        .run_comparison(
            &package,
            &add_ref(),
            &args(200, 55),
            None,
            &InterpValue::sbits(8, -1),
        )
        .unwrap();
}

#[test]
fn test_missing_function_is_skipped() {
    let package = MockPackage::new();
    let mut comparator = JitComparator::new(MockJit::new());
    comparator
        .run_comparison(
            &package,
            &add_ref(),
            &args(2, 3),
            None,
            &InterpValue::ubits(8, 0),
        )
        .unwrap();
    assert_eq!(comparator.backend().compile_count(), 0);
    assert!(comparator.cache().is_empty());
}

#[test]
fn test_parametric_specialization_uses_bindings() {
    let package = MockPackage::new().with_function(adder("__m__add__8", 0));
    let mut comparator = JitComparator::new(MockJit::new());
    let f = add_ref().with_parametric_keys(["N"]);
    let bindings = SymbolicBindings::new([("N".to_string(), 8)]);

    comparator
        .run_comparison(
            &package,
            &f,
            &args(1, 1),
            Some(&bindings),
            &InterpValue::ubits(8, 2),
        )
        .unwrap();
    assert!(comparator.cache().contains("__m__add__8"));

    let err = comparator
        .run_comparison(&package, &f, &args(1, 1), None, &InterpValue::ubits(8, 2))
        .unwrap_err();
    assert!(matches!(err, TestError::Mangle(_)));
}

#[test]
fn test_compile_error_propagates() {
    let package = MockPackage::new().with_function(adder("__m__add", 0));
    let mut comparator = JitComparator::new(MockJit::failing("no codegen"));
    let err = comparator
        .run_comparison(
            &package,
            &add_ref(),
            &args(2, 3),
            None,
            &InterpValue::ubits(8, 5),
        )
        .unwrap_err();
    assert!(matches!(err, TestError::Compile { .. }));
}

#[test]
fn test_unrepresentable_argument_is_conversion_error() {
    let package = MockPackage::new().with_function(adder("__m__add", 0));
    let mut comparator = JitComparator::new(MockJit::new());
    let callee = InterpValue::Function(FunctionRef::new("g", "m", Span::DUMMY));
    let err = comparator
        .run_comparison(
            &package,
            &add_ref(),
            &[callee],
            None,
            &InterpValue::ubits(8, 0),
        )
        .unwrap_err();
    assert!(matches!(err, TestError::Conversion(_)));
}

#[test]
fn test_jit_execution_error_propagates() {
    let trap = MockFunction::fallible("__m__add", vec![IrType::Bits(8), IrType::Bits(8)], |_| {
        Err(TestError::Execution("divide by zero".into()))
    });
    let package = MockPackage::new().with_function(trap);
    let mut comparator = JitComparator::new(MockJit::new());

    let err = comparator
        .run_comparison(
            &package,
            &add_ref(),
            &args(2, 3),
            None,
            &InterpValue::ubits(8, 5),
        )
        .unwrap_err();

    assert_eq!(err, TestError::Execution("divide by zero".into()));
    // The artifact compiled fine and stays cached.
    assert!(comparator.cache().contains("__m__add"));
    assert_eq!(comparator.backend().compile_count(), 1);
}

#[test]
fn test_unrepresentable_result_is_conversion_error() {
    let package = MockPackage::new().with_function(adder("__m__add", 0));
    let mut comparator = JitComparator::new(MockJit::new());
    let got = InterpValue::Function(FunctionRef::new("g", "m", Span::DUMMY));

    let err = comparator
        .run_comparison(&package, &add_ref(), &args(2, 3), None, &got)
        .unwrap_err();

    assert!(matches!(err, TestError::Conversion(_)));
    assert_eq!(comparator.backend().compile_count(), 1);
}

#[test]
fn test_derived_parametric_resolves_full_specialization() {
    // `add<N, M = N + 1>`: the converter emits the specialization under
    // both bound values.
    let package = MockPackage::new().with_function(adder("__m__add__9_8", 0));
    let mut comparator = JitComparator::new(MockJit::new());
    let f = add_ref().with_parametric_keys(["N"]);
    let bindings = SymbolicBindings::new([("N".to_string(), 8), ("M".to_string(), 9)]);

    comparator
        .run_comparison(
            &package,
            &f,
            &args(1, 1),
            Some(&bindings),
            &InterpValue::ubits(8, 2),
        )
        .unwrap();

    assert_eq!(comparator.backend().compile_count(), 1);
    assert!(comparator.cache().contains("__m__add__9_8"));
}

#[test]
fn test_hook_delegates_to_comparator() {
    let package = MockPackage::new().with_function(adder("__m__add", 1));
    let mut comparator = JitComparator::new(MockJit::new());
    let mut hook = ComparatorHook::new(&mut comparator, &package);

    let result = hook.on_evaluation(&add_ref(), &args(2, 3), None, &InterpValue::ubits(8, 5));
    assert!(matches!(result, Err(TestError::Divergence { .. })));
    assert_eq!(comparator.backend().compile_count(), 1);
}
