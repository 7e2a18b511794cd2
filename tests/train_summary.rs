use clap::Parser;
use smartcab::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "smartcab-train",
        "--trials",
        "5",
        "--seed",
        "42",
        "--quiet",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["run"]["total_trials"], 5);
    assert_eq!(parsed["metadata"]["trials"], 5);
    assert_eq!(parsed["metadata"]["seed"], 42);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "smartcab-train",
        "--trials",
        "3",
        "--seed",
        "7",
        "--quiet",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["run"]["total_trials"], 3);
}

#[test]
fn observations_file_holds_one_line_per_trial() {
    let tmp = tempdir().unwrap();
    let observations = tmp.path().join("steps.jsonl");

    let args = parse_args([
        "smartcab-train",
        "--trials",
        "4",
        "--seed",
        "1",
        "--quiet",
        "--observations",
        observations.to_str().unwrap(),
    ]);

    execute(args).expect("training with observations should succeed");

    let contents = std::fs::read_to_string(&observations).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);

    for (idx, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["trial"], idx + 1);
        assert!(parsed["total_steps"].as_u64().unwrap() > 0);
    }
}

#[test]
fn invalid_hyperparameters_are_rejected() {
    let args = parse_args([
        "smartcab-train",
        "--trials",
        "5",
        "--quiet",
        "--learning-rate",
        "1.5",
    ]);
    assert!(execute(args).is_err());
}
