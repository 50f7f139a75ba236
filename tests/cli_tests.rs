use templ::cli::run;
use templ::ErrorKind;
use test_log::test;
mod utils;
use utils::{args, run_and_assert};

#[test]
fn renders_full_feature_template() {
    let mut args = args("tests/templates", &["test.html"], "unused".as_ref());
    args.data_file = Some("tests/data/test.json".into());
    args.css = vec!["styles.css".into()];
    run_and_assert(args, "tests/expected/test");
}

#[test]
fn applies_config_stylesheets_and_mirrors_nested_paths() {
    let mut args = args(
        "tests/templates/configured",
        &["welcome.html", "mail/reset.html"],
        "unused".as_ref(),
    );
    args.data_file = Some("tests/data/welcome.yaml".into());
    run_and_assert(args, "tests/expected/configured");
}

#[test]
fn inline_data_overrides_data_file() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut args = args("tests/templates/configured", &["mail/reset.html"], tmp_dir.path());
    args.data_file = Some("tests/data/welcome.yaml".into());
    args.data = Some(r#"{"name": "Alice"}"#.into());
    run(args).unwrap();

    let html = std::fs::read_to_string(tmp_dir.path().join("mail/reset.html")).unwrap();
    assert!(html.contains("Reset your password for Alice:"));
}

#[test]
fn refuses_existing_output_dir_without_force() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut args = args("tests/templates", &["header.html"], tmp_dir.path());
    args.force = false;
    let err = run(args).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn failing_template_writes_nothing() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let output = tmp_dir.path().join("out");
    let args = args("tests/templates", &["header.html", "missing.html"], &output);
    let err = run(args).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TemplateLoadFailure);
    assert!(!output.exists());
}

#[test]
fn rejects_templates_outside_the_templates_dir() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let args = args("tests/templates/configured", &["../test.html"], tmp_dir.path());
    let err = run(args).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathOutsideBaseDir);
}

#[test]
fn invalid_data_is_reported() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut args = args("tests/templates", &["header.html"], tmp_dir.path());
    args.data = Some("[1, 2]".into());
    let err = run(args).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataParse);
}
