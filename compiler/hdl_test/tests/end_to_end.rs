//! Whole-module runs through the public API with mock collaborators.

#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use hdl_diagnostic::{ColorMode, PositionalError};
use hdl_ir::{
    FunctionRef, InterpValue, IrType, IrValue, Module, QuickCheck, Span,
};
use hdl_test::testing::{Evaluation, MockFunction, MockJit, MockPackage, MockToolchain, ScriptedTest};
use hdl_test::{parse_and_test, JitComparator, TestError, TestRunnerConfig};

const PROGRAM: &str = "\
fn double(x: u8) -> u8 { x + x }
#[test]
fn t1() { assert_eq(double(u8:2), u8:4) }
#[test]
fn t2() { assert_eq(double(u8:2), u8:5) }
#[quickcheck(test_count=50)]
fn qc1(x: u8) -> bool { true }
";

fn span_of(needle: &str) -> Span {
    let start = PROGRAM.find(needle).unwrap();
    Span::try_from_range(start..start + needle.len()).unwrap()
}

#[test]
fn unit_failure_and_passing_quickcheck() {
    hdl_test::init_tracing();

    let double = FunctionRef::new("double", "m", span_of("double"));
    let qc1 = FunctionRef::new("qc1", "m", span_of("qc1"));
    let module = Module::new("m", "m.x", PROGRAM)
        .with_test("t1")
        .with_test("t2")
        .with_quickcheck(QuickCheck::new(qc1, Some(50)));

    let trials = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&trials);
    let package = MockPackage::new()
        .with_function(MockFunction::new("__m__double", vec![IrType::Bits(8)], |args| {
            let x = args[0].bits().and_then(hdl_ir::Bits::to_u64).unwrap();
            IrValue::ubits(8, x + x)
        }))
        .with_function(MockFunction::new("__m__qc1", vec![IrType::Bits(8)], move |_| {
            counter.set(counter.get() + 1);
            IrValue::bool(true)
        }));

    let call = Evaluation::new(
        double,
        vec![InterpValue::ubits(8, 2)],
        InterpValue::ubits(8, 4),
    );
    let assertion = PositionalError::failure(
        span_of("assert_eq(double(u8:2), u8:5)"),
        "assertion failed: u8:4 != u8:5",
    );
    let mut toolchain = MockToolchain::new(module)
        .with_package(package)
        .with_test("t1", ScriptedTest::passing().with_evaluation(call.clone()))
        .with_test(
            "t2",
            ScriptedTest::failing(TestError::Positional(assertion)).with_evaluation(call),
        );

    let config = TestRunnerConfig {
        seed: Some(42),
        color: ColorMode::Never,
        ..TestRunnerConfig::default()
    };
    let mut comparator = JitComparator::new(MockJit::new());
    let mut out = Vec::new();

    let failed = parse_and_test(
        &mut toolchain,
        PROGRAM,
        "m",
        Path::new("m.x"),
        &config,
        Some(&mut comparator),
        &mut out,
    )
    .unwrap();

    assert!(failed);
    assert_eq!(trials.get(), 50);
    // `double` and `qc1`, each compiled once.
    assert_eq!(comparator.backend().compile_count(), 2);
    assert_eq!(comparator.cache().len(), 2);

    let out = String::from_utf8(out).unwrap();
    let expected_banners = [
        "[ RUN UNITTEST  ] t1",
        "[            OK ]",
        "[ RUN UNITTEST  ] t2",
        "[        FAILED ] t2",
        "[===============] 2 test(s) ran; 1 failed; 0 skipped.",
        "[ SEED               42 ]",
        "[ RUN QUICKCHECK        ] qc1 count: 50",
        "[                    OK ] qc1",
        "[=======================] 1 quickcheck(s) ran.",
    ];
    let banners: Vec<&str> = out.lines().filter(|line| line.starts_with('[')).collect();
    assert_eq!(banners, expected_banners);
    assert!(out.contains("error: FailureError: assertion failed: u8:4 != u8:5"));
    assert!(out.contains(" --> m.x:5:11-5:40"));
}

#[test]
fn same_seed_replays_the_same_counter_example() {
    let qc = FunctionRef::new("qc", "m", span_of("qc1"));
    let module = Module::new("m", "m.x", PROGRAM)
        .with_quickcheck(QuickCheck::new(qc, Some(1000)))
        .with_function_type(
            "qc",
            hdl_ir::FunctionType::new(
                vec![hdl_ir::ConcreteType::ubits(8)],
                hdl_ir::ConcreteType::ubits(1),
            ),
        );
    let package = MockPackage::new().with_function(MockFunction::new(
        "__m__qc",
        vec![IrType::Bits(8)],
        |args| {
            let x = args[0].bits().and_then(hdl_ir::Bits::to_u64).unwrap();
            IrValue::bool(x % 7 != 0)
        },
    ));
    let config = TestRunnerConfig {
        seed: Some(99),
        color: ColorMode::Never,
        ..TestRunnerConfig::default()
    };

    let mut reports = Vec::new();
    for _ in 0..2 {
        let mut toolchain = MockToolchain::new(module.clone()).with_package(package.clone());
        let mut comparator = JitComparator::new(MockJit::new());
        let mut out = Vec::new();
        let failed = parse_and_test(
            &mut toolchain,
            PROGRAM,
            "m",
            Path::new("m.x"),
            &config,
            Some(&mut comparator),
            &mut out,
        )
        .unwrap();
        assert!(failed);
        reports.push(String::from_utf8(out).unwrap());
    }

    assert!(reports[0].contains("Found falsifying example after "));
    assert_eq!(reports[0], reports[1]);
}
