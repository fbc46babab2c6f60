use std::path::Path;
use std::process::{Command, Output};

const BLOCK: &str = "█";

fn fixture_results() -> String {
    format!("{}/tests/fixtures/results", env!("CARGO_MANIFEST_DIR"))
}

fn rankviz_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rankviz"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    rankviz_cmd()
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run rankviz")
}

fn write_report(dir: &Path, name: &str, body: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), body).unwrap();
}

const SVM_KNN_REPORT: &str = "\
Classifier Rankings by Accuracy:
1. SVM   95.00%
2. KNN   90.00%
==========
";

#[test]
fn test_end_to_end_text_mode() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("results"),
        "experiment_results_20240101_000000.txt",
        SVM_KNN_REPORT,
    );

    let output = run_in(dir.path(), &["render", "--renderer", "text"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "render failed: {stdout}");
    assert!(
        stdout.contains("experiment_results_20240101_000000.txt"),
        "should name the selected file: {stdout}"
    );

    let svm = format!("SVM |{} 95.00%", BLOCK.repeat(47));
    let knn = format!("KNN |{} 90.00%", BLOCK.repeat(45));
    let svm_at = stdout.find(&svm).expect("missing SVM bar");
    let knn_at = stdout.find(&knn).expect("missing KNN bar");
    assert!(svm_at < knn_at, "SVM should be listed above KNN: {stdout}");

    assert!(stdout.contains("Average Accuracy: 92.50%"), "{stdout}");
    assert!(stdout.contains("Best Performance: 95.00%"), "{stdout}");
    assert!(stdout.contains("Worst Performance: 90.00%"), "{stdout}");
    assert!(stdout.contains("Performance Range: 5.00%"), "{stdout}");
}

#[test]
fn test_no_subcommand_behaves_like_render() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("results"),
        "experiment_results_20240101_000000.txt",
        SVM_KNN_REPORT,
    );

    let output = run_in(dir.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "rankviz failed: {stdout}");
    assert!(stdout.contains("Using results file"), "{stdout}");
    // Either the charts were drawn or the text fallback was announced.
    assert!(
        stdout.contains("Visualization saved to")
            || (stdout.contains("Falling back to text visualization")
                && stdout.contains("Average Accuracy: 92.50%")),
        "unexpected output: {stdout}"
    );
}

#[test]
fn test_top_level_flags_without_subcommand() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("results"),
        "experiment_results_20240101_000000.txt",
        SVM_KNN_REPORT,
    );

    let output = run_in(dir.path(), &["--renderer", "text"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "rankviz failed: {stderr}");
    assert!(
        stdout.contains(&format!("SVM |{} 95.00%", BLOCK.repeat(47))),
        "{stdout}"
    );
    assert!(!stdout.contains("Falling back"), "{stdout}");
}

#[test]
fn test_top_level_flags_conflict_with_subcommand() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run_in(dir.path(), &["--renderer", "text", "init"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join(".rankviz.toml").exists());
}

#[test]
fn test_json_stdout_stays_clean_without_section() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("results"),
        "experiment_results_20240101_000000.txt",
        "Training finished.\nNo rankings today.\n",
    );

    let output = run_in(dir.path(), &["render", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stdout.trim().is_empty() || serde_json::from_str::<serde_json::Value>(&stdout).is_ok(),
        "stdout should be empty or JSON: {stdout}"
    );
    assert!(
        stderr.contains("Could not find summary section in results file."),
        "{stderr}"
    );
    assert!(
        stderr.contains("No classifier data found in results file."),
        "{stderr}"
    );
}

#[test]
fn test_missing_results_directory_is_reported() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let output = run_in(dir.path(), &["render"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "missing dir is not a crash");
    assert!(
        stderr.contains("'results' directory not found."),
        "should report missing directory: {stderr}"
    );
    assert!(stderr.contains("Please run the experiments first"), "{stderr}");
}

#[test]
fn test_no_matching_files_is_reported() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(&dir.path().join("results"), "notes.txt", SVM_KNN_REPORT);

    let output = run_in(dir.path(), &["render"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("No results files found"), "{stderr}");
}

#[test]
fn test_report_without_section() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("results"),
        "experiment_results_20240101_000000.txt",
        "Training finished.\nNo rankings today.\n",
    );

    let output = run_in(dir.path(), &["render", "--renderer", "text"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(
        stdout.contains("Could not find summary section in results file."),
        "{stdout}"
    );
    assert!(
        stdout.contains("No classifier data found in results file."),
        "{stdout}"
    );
    assert!(!stdout.contains("Average Accuracy"), "{stdout}");
}

#[test]
fn test_fixture_picks_latest_report() {
    let output = rankviz_cmd()
        .args([
            "render",
            "--results-dir",
            &fixture_results(),
            "--renderer",
            "text",
        ])
        .output()
        .expect("failed to run rankviz");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(
        stdout.contains("experiment_results_20240102_093000.txt"),
        "should pick the newest report: {stdout}"
    );
    assert!(
        stdout.contains("MulticlassKernelSVMClassifier (RBF)"),
        "{stdout}"
    );
    // The tie at 96.33% keeps file order.
    let forest = stdout.find("RandomForestClassifier (50 trees)").unwrap();
    let mlp = stdout.find("MLPClassifier ").unwrap();
    assert!(forest < mlp, "{stdout}");
    assert!(stdout.contains("Best Performance: 98.22%"), "{stdout}");
    assert!(stdout.contains("Worst Performance: 85.25%"), "{stdout}");
}

#[test]
fn test_explicit_file_bypasses_locator() {
    let report = format!(
        "{}/experiment_results_20231215_180000.txt",
        fixture_results()
    );
    let output = rankviz_cmd()
        .args(["render", "--file", &report, "--renderer", "text"])
        .output()
        .expect("failed to run rankviz");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("DecisionTreeClassifier"), "{stdout}");
    assert!(stdout.contains("Worst Performance: 84.97%"), "{stdout}");
}

#[test]
fn test_json_output() {
    let output = rankviz_cmd()
        .args(["render", "--results-dir", &fixture_results(), "--json"])
        .output()
        .expect("failed to run rankviz");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    let classifiers = value["classifiers"].as_array().unwrap();
    assert_eq!(classifiers.len(), 7);
    assert_eq!(classifiers[0]["rank"], 1);
    assert_eq!(classifiers[6]["name"], "DecisionTreeClassifier");
    assert_eq!(value["summary"]["count"], 7);
}

#[test]
fn test_unknown_renderer_exits_2() {
    let output = rankviz_cmd()
        .args([
            "render",
            "--results-dir",
            &fixture_results(),
            "--renderer",
            "svg",
        ])
        .output()
        .expect("failed to run rankviz");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("unknown renderer"), "{stderr}");
}

#[test]
fn test_config_file_sets_results_dir_and_scale() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("runs"),
        "experiment_results_20240101_000000.txt",
        SVM_KNN_REPORT,
    );
    std::fs::write(
        dir.path().join(".rankviz.toml"),
        "[input]\nresults_dir = \"runs\"\n\n[render]\nrenderer = \"text\"\nbar_scale = 10.0\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["render"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(
        stdout.contains(&format!("SVM |{} 95.00%", BLOCK.repeat(9))),
        "{stdout}"
    );
}

#[test]
fn test_bad_discovered_config_warns_but_explicit_one_exits_2() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_report(
        &dir.path().join("results"),
        "experiment_results_20240101_000000.txt",
        SVM_KNN_REPORT,
    );
    std::fs::write(dir.path().join(".rankviz.toml"), "[render\nrenderer = ").unwrap();

    let found = run_in(dir.path(), &["render", "--renderer", "text"]);
    let stderr = String::from_utf8_lossy(&found.stderr);
    let stdout = String::from_utf8_lossy(&found.stdout);
    assert!(found.status.success(), "{stderr}");
    assert!(stderr.contains("Warning: failed to load config"), "{stderr}");
    assert!(stdout.contains("Average Accuracy: 92.50%"), "{stdout}");

    let explicit = run_in(
        dir.path(),
        &["render", "--config", ".rankviz.toml", "--renderer", "text"],
    );
    assert_eq!(explicit.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&explicit.stderr).contains("Error:"));
}

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run_in(dir.path(), &["init"]);
    assert!(output.status.success(), "init should succeed");

    let config_path = dir.path().join(".rankviz.toml");
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[input]"), "should contain [input] section");
    assert!(content.contains("[render]"), "should contain [render] section");

    // A second init without --force refuses to overwrite
    let again = run_in(dir.path(), &["init"]);
    assert_eq!(again.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&again.stderr).contains("already exists"));

    let forced = run_in(dir.path(), &["init", "--force"]);
    assert!(forced.status.success());
}
