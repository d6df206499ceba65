use super::*;
use crate::ErrorKind;
use hdl_ir::Span;
use pretty_assertions::assert_eq;

const SOURCE: &str = "fn f() {\n    assert_eq(sum, 5)\n}\n";

fn render(mode: ColorMode, source: &str, error: &PositionalError) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), mode, false);
    emitter
        .emit_positional(Path::new("adder.x"), source, error)
        .unwrap();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_single_line_span() {
    let error = PositionalError::failure(Span::new(13, 22), "assertion failed");
    let out = render(ColorMode::Never, SOURCE, &error);
    let expected = "\
error: FailureError: assertion failed
 --> adder.x:2:5-2:14
  |
2 |     assert_eq(sum, 5)
  |     ^^^^^^^^^
";
    assert_eq!(out, expected);
}

#[test]
fn test_multi_line_span_prints_every_line() {
    let error = PositionalError::new(Span::new(13, 32), ErrorKind::Type, "mismatch");
    let out = render(ColorMode::Never, SOURCE, &error);
    assert!(out.starts_with("error: TypeInferenceError: mismatch\n"));
    assert!(out.contains("adder.x:2:5-3:2"));
    assert!(out.contains("2 |     assert_eq(sum, 5)\n"));
    assert!(out.contains("3 | }\n"));
    // Underline runs to the end of the first line.
    assert!(out.contains(&format!("  |     {}\n", "^".repeat(17))));
}

#[test]
fn test_span_past_end_is_clamped() {
    let error = PositionalError::failure(Span::new(0, 1000), "boom");
    let out = render(ColorMode::Never, "ab", &error);
    assert!(out.contains("adder.x:1:1-1:3"));
    assert!(out.contains("1 | ab\n"));
    assert!(out.contains("  | ^^\n"));
}

#[test]
fn test_empty_span_gets_one_caret() {
    let error = PositionalError::failure(Span::new(4, 4), "here");
    let out = render(ColorMode::Never, "abc def", &error);
    assert!(out.ends_with("  |     ^\n"));
}

#[test]
fn test_colors_only_when_enabled() {
    let error = PositionalError::failure(Span::new(13, 22), "assertion failed");
    let plain = render(ColorMode::Never, SOURCE, &error);
    let colored = render(ColorMode::Always, SOURCE, &error);
    assert!(!plain.contains('\x1b'));
    assert!(colored.contains(colors::ERROR));
    assert!(colored.contains(colors::RESET));
    assert!(colored.contains("FailureError: assertion failed"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}
