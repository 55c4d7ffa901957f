//! Tests for ScriptService using the fixture scripts in tests/resources/scripts

use std::path::Path;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use rbset::application::services::{ScriptService, UNSUPPORTED_KIND};
use rbset::application::{ApplicationError, ElementKind};
use rbset::config::Settings;
use rbset::domain::DumpStyle;
use rbset::infrastructure::di::ServiceContainer;
use rbset::infrastructure::traits::{FileSystem, RealFileSystem};
use rbset::util::testing;

fn service() -> ScriptService {
    ScriptService::new(Arc::new(RealFileSystem), DumpStyle::default(), true)
}

// ============================================================
// Fixture scripts
// ============================================================

#[rstest]
#[case("integers", ElementKind::Integer)]
#[case("strings", ElementKind::String)]
fn given_fixture_script_when_run_then_output_matches_expected(
    #[case] name: &str,
    #[case] kind: ElementKind,
) {
    testing::init_test_setup();
    let dir = Path::new("tests/resources/scripts");
    let expected = std::fs::read_to_string(dir.join(format!("{name}.expected"))).unwrap();

    let report = service().run_file(&dir.join(format!("{name}.txt"))).unwrap();

    assert_eq!(report.kind, Some(kind));
    assert_eq!(report.render(), expected);
}

#[test]
fn given_unsupported_type_script_when_run_then_only_message_line() {
    let report = service()
        .run_file(Path::new("tests/resources/scripts/unsupported.txt"))
        .unwrap();

    assert!(report.kind.is_none());
    assert_eq!(report.render(), format!("{UNSUPPORTED_KIND}\n"));
}

#[test]
fn given_missing_script_when_run_then_script_unreadable() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    let err = service().run_file(&missing).unwrap_err();

    assert!(matches!(err, ApplicationError::ScriptUnreadable { .. }));
    assert!(err.to_string().ends_with("could not be opened"));
}

#[test]
fn given_script_with_invalid_utf8_when_run_then_tokens_still_processed() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.txt");
    std::fs::write(&script, b"String\ninsert:\xc3\xa9\ninsert:\xff\xfe\nprinttree\n").unwrap();

    let report = service().run_file(&script).unwrap();

    assert_eq!(report.kind, Some(ElementKind::String));
    assert_eq!(
        report.lines,
        vec!["True", "True", "\u{e9} *\u{fffd}\u{fffd}"]
    );
}

// ============================================================
// In-memory scripts
// ============================================================

#[test]
fn given_type_token_in_any_case_when_run_then_accepted() {
    let report = service().run("iNtEgEr insert:1 printtree").unwrap();
    assert_eq!(report.lines, vec!["True", "1"]);
}

#[test]
fn given_only_type_token_when_run_then_no_lines_but_empty_shape() {
    let report = service().run("String").unwrap();

    assert_eq!(report.kind, Some(ElementKind::String));
    assert!(report.lines.is_empty());
    let shape = report.shape.expect("shape for typed script").to_string();
    assert_eq!(shape.lines().next(), Some("(empty)"));
}

#[test]
fn given_out_of_range_integer_when_run_then_error_line() {
    let report = service().run("Integer insert:2147483648 insert:2147483647").unwrap();
    assert_eq!(
        report.lines,
        vec!["Error in Line: insert:2147483648", "True"]
    );
}

#[test]
fn given_custom_style_when_printing_then_style_applied() {
    let style = DumpStyle {
        red_marker: "~".into(),
        separator: " | ".into(),
    };
    let service = ScriptService::new(Arc::new(RealFileSystem), style, false);

    let report = service.run("Integer insert:1 insert:2 insert:3 printtree").unwrap();

    assert_eq!(report.lines.last().map(String::as_str), Some("2 | ~1 | ~3"));
}

// ============================================================
// Container wiring
// ============================================================

#[test]
fn given_container_when_script_service_built_then_uses_settings_style() {
    let mut settings = Settings::default();
    settings.dump.red_marker = "r".into();
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem));

    let report = container
        .script_service(false)
        .run("Integer insert:5 insert:4 printtree")
        .unwrap();

    assert_eq!(report.lines, vec!["True", "True", "5 r4"]);
}

#[test]
fn given_report_when_written_then_file_holds_rendered_lines() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("results.txt");
    let fs = RealFileSystem;

    let report = service().run("String insert:b contains:b contains:a").unwrap();
    fs.write(&out, &report.render()).unwrap();

    assert_eq!(fs.read(&out).unwrap(), b"True\nTrue\nFalse\n");
}
