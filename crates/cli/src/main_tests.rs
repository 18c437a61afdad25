use super::*;

use tempfile::tempdir;

fn cli_for(paths: Vec<String>) -> Cli {
    Cli {
        follow: false,
        no_automount: false,
        basic: false,
        paths,
    }
}

#[test]
fn cli_flags_map_onto_query_options() {
    let cli = Cli {
        follow: true,
        no_automount: true,
        basic: true,
        paths: vec!["/tmp".to_owned()],
    };

    let opts = cli.query_options();
    assert!(opts.follow_symlinks);
    assert!(opts.no_automount);
    assert!(opts.basic_only);
}

#[test]
fn cli_requires_at_least_one_path() {
    use clap::Parser;

    assert!(Cli::try_parse_from(["statx"]).is_err());
    assert!(Cli::try_parse_from(["statx", "/tmp"]).is_ok());
}

#[test]
fn execute_reports_one_block_per_path_in_input_order() {
    let tmp = tempdir().expect("create temp dir");
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    std::fs::write(&a, b"first").expect("create a");
    std::fs::write(&b, b"second").expect("create b");

    let cli = cli_for(vec![
        a.to_string_lossy().into_owned(),
        b.to_string_lossy().into_owned(),
    ]);

    let mut out = Vec::new();
    let code = execute(&cli, &mut out).expect("execute");
    assert_eq!(code, 0);

    let text = String::from_utf8(out).expect("utf8 report");
    let first = text.find(&format!("  File: '{}'", a.display()));
    let second = text.find(&format!("  File: '{}'", b.display()));
    assert!(first.is_some(), "missing report for a:\n{text}");
    assert!(second.is_some(), "missing report for b:\n{text}");
    assert!(first < second, "reports out of input order:\n{text}");
}

#[test]
fn execute_continues_past_a_failing_path() {
    let tmp = tempdir().expect("create temp dir");
    let good = tmp.path().join("good");
    std::fs::write(&good, b"ok").expect("create file");
    let missing = tmp.path().join("missing");

    let cli = cli_for(vec![
        missing.to_string_lossy().into_owned(),
        good.to_string_lossy().into_owned(),
    ]);

    let mut out = Vec::new();
    let code = execute(&cli, &mut out).expect("execute");

    // The failing path yields a diagnostic and a non-zero exit, but the
    // report for the good path is still produced.
    assert_eq!(code, 1);
    let text = String::from_utf8(out).expect("utf8 report");
    assert!(
        text.contains(&format!("  File: '{}'", good.display())),
        "got:\n{text}"
    );
    assert!(!text.contains("missing"), "failed path must not be reported");
}
