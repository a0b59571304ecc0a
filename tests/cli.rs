use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use indoc::indoc;
use similar::TextDiff;

fn binary_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target");
    path.push("debug");
    path.push("yamlite");
    path
}

fn write_yaml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn run_yamlite(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to spawn yamlite");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn assert_output_eq(actual: &str, expected: &str) {
    if actual != expected {
        let diff = TextDiff::from_lines(expected, actual);
        eprintln!();
        for line in diff
            .unified_diff()
            .header("expected", "actual")
            .to_string()
            .lines()
        {
            eprintln!("{}", line);
        }
        panic!("Output mismatch");
    }
}

#[test]
fn test_get_value_scalar() {
    let input = indoc! {r#"
        app:
          name: "MyApp"
          version: 1.0
    "#};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    let (stdout, stderr, success) = run_yamlite(&[path, "get-value", "app.name"]);
    assert!(success, "Expected success, got stderr: {}", stderr);
    assert_output_eq(&stdout, "MyApp\n");

    let (stdout, _, success) = run_yamlite(&[path, "get-value", "app.version"]);
    assert!(success);
    assert_output_eq(&stdout, "1.0\n");
}

#[test]
fn test_get_value_subtree_as_yaml() {
    let input = indoc! {"
        app:
          ports:
            - 8080
            - 9090
    "};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    let (stdout, stderr, success) = run_yamlite(&[path, "get-value", "app.ports"]);
    assert!(success, "Expected success, got stderr: {}", stderr);
    assert_output_eq(&stdout, "- 8080\n- 9090\n");

    let (stdout, _, success) = run_yamlite(&[path, "get-value", "app.ports.-1"]);
    assert!(success);
    assert_output_eq(&stdout, "9090\n");
}

#[test]
fn test_get_value_default_on_missing_path() {
    let file = write_yaml("a: 1\n");
    let path = file.path().to_str().unwrap();

    let (stdout, stderr, success) = run_yamlite(&[path, "get-value", "b", "fallback"]);
    assert!(success, "Expected success, got stderr: {}", stderr);
    assert_output_eq(&stdout, "fallback\n");
}

#[test]
fn test_get_value_missing_path_fails() {
    let file = write_yaml("a: 1\n");
    let path = file.path().to_str().unwrap();

    let (_, stderr, success) = run_yamlite(&[path, "get-value", "b"]);
    assert!(!success);
    assert!(stderr.contains("missing key 'b'"), "stderr: {}", stderr);
}

#[test]
fn test_get_value_quiet_missing_path() {
    let file = write_yaml("a: 1\n");
    let path = file.path().to_str().unwrap();

    let output = Command::new(binary_path())
        .args(["-q", path, "get-value", "b"])
        .output()
        .expect("Failed to spawn yamlite");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_default_action_pretty_prints() {
    let input = indoc! {"
        b:
          - 1
          - 2
        a: x
    "};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    let (stdout, stderr, success) = run_yamlite(&[path]);
    assert!(success, "Expected success, got stderr: {}", stderr);
    // insertion order is preserved
    assert_output_eq(&stdout, "b:\n  - 1\n  - 2\na: x\n");
}

#[test]
fn test_keys_and_length() {
    let input = indoc! {"
        name: a
        port: 1
        tags:
          - x
    "};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    let (stdout, _, success) = run_yamlite(&[path, "keys"]);
    assert!(success);
    assert_output_eq(&stdout, "name\nport\ntags\n");

    let (stdout, _, success) = run_yamlite(&[path, "get-length", "tags"]);
    assert!(success);
    assert_output_eq(&stdout, "1\n");

    let (_, stderr, success) = run_yamlite(&[path, "get-length", "name"]);
    assert!(!success);
    assert!(stderr.contains("get-length does not support"));
}

#[test]
fn test_values() {
    let input = indoc! {"
        name: a
        port: 1
        tags:
          - x
          - y
    "};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    let (stdout, stderr, success) = run_yamlite(&[path, "values"]);
    assert!(success, "Expected success, got stderr: {}", stderr);
    assert_output_eq(&stdout, "a\n1\n- x\n- y\n");

    let (_, stderr, success) = run_yamlite(&[path, "values", "tags"]);
    assert!(!success);
    assert!(stderr.contains("values does not support"));
}

#[test]
fn test_get_type() {
    let input = indoc! {"
        m:
          k: v
        s:
          - 1
        x: word
        n:
    "};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    for (query, expected) in [("m", "struct\n"), ("s", "sequence\n"), ("x", "str\n"), ("n", "null\n")] {
        let (stdout, stderr, success) = run_yamlite(&[path, "get-type", query]);
        assert!(success, "Expected success, got stderr: {}", stderr);
        assert_output_eq(&stdout, expected);
    }
}

#[test]
fn test_parse_error_reports_one_based_position() {
    let file = write_yaml("key: \"unterminated\n");
    let path = file.path().to_str().unwrap();

    let output = Command::new(binary_path())
        .args(["--no-color", path])
        .output()
        .expect("Failed to spawn yamlite");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("line 1, column 6"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_indentation_error_position() {
    let input = indoc! {"
        a:
            b: 1
          c: 2
    "};
    let file = write_yaml(input);
    let path = file.path().to_str().unwrap();

    let (_, stderr, success) = run_yamlite(&["--no-color", path]);
    assert!(!success);
    assert!(
        stderr.contains("line 3, column 3"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_unreadable_file_fails() {
    let (_, stderr, success) = run_yamlite(&["/no/such/file.yml"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read"), "stderr: {}", stderr);
}
