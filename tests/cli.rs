use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).expect("failed to create scratch directory");
    dir
}

fn run_bin(exe: &str, args: &[&str]) -> Output {
    let output = Command::new(PathBuf::from(exe))
        .args(args)
        .output()
        .expect("failed to execute process");
    println!("{}", String::from_utf8_lossy(&output.stdout));
    println!("{}", String::from_utf8_lossy(&output.stderr));
    output
}

fn generate(out: &Path) -> usize {
    let output = run_bin(
        env!("CARGO_BIN_EXE_generate_sample"),
        &["--out", out.to_str().unwrap(), "--seed", "7"],
    );
    assert!(output.status.success(), "generate_sample failed");
    assert!(out.exists());

    // "Wrote N observations (M missing-value rows) to ..."
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .split('(')
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("unexpected generator output: {stdout}"))
}

fn summarize(args: &[&str]) -> Output {
    run_bin(env!("CARGO_BIN_EXE_sea-ice-explorer"), args)
}

fn removed_count(summary: &str) -> usize {
    summary
        .lines()
        .find_map(|line| line.strip_prefix("removed"))
        .and_then(|rest| rest.trim().parse().ok())
        .unwrap_or_else(|| panic!("no removed line in summary:\n{summary}"))
}

#[test]
fn summary_of_generated_csv_and_parquet() {
    let dir = scratch_dir("summary_of_generated");

    for name in ["ice.csv", "ice.parquet"] {
        let path = dir.join(name);
        let missing = generate(&path);

        let output = summarize(&[path.to_str().unwrap(), "--summary"]);
        assert!(output.status.success(), "summary of {name} failed");
        let stdout = String::from_utf8(output.stdout).unwrap();

        assert!(stdout.contains("observations     540"), "{stdout}");
        assert!(stdout.contains("years            1979–2023"), "{stdout}");
        for month in MONTHS {
            assert!(stdout.contains(month), "{month} missing:\n{stdout}");
        }
        if missing > 0 {
            assert_eq!(removed_count(&stdout), missing);
        }
        assert!(stdout.contains("trend slope      -"), "{stdout}");
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn config_file_changes_the_std_dev_flavour() {
    let dir = scratch_dir("config_file");
    let data = dir.join("ice.csv");
    generate(&data);

    let config = dir.join("population.toml");
    fs::write(&config, "[outliers]\nstd_dev = \"population\"\n").expect("failed to write config");

    let default = summarize(&[data.to_str().unwrap(), "--summary"]);
    let population = summarize(&[
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--summary",
    ]);
    assert!(default.status.success());
    assert!(population.status.success());
    assert_ne!(default.stdout, population.stdout);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn failures_exit_with_code_one() {
    let dir = scratch_dir("failures");
    let data = dir.join("ice.csv");
    generate(&data);

    let missing = dir.join("missing.csv");
    let output = summarize(&[missing.to_str().unwrap(), "--summary"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing.csv"), "{stderr}");

    let bad = dir.join("bad.toml");
    fs::write(&bad, "[outliers]\nsigma_multiplier = 0.0\n").expect("failed to write config");
    let output = summarize(&[
        data.to_str().unwrap(),
        "--config",
        bad.to_str().unwrap(),
        "--summary",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let unsupported = dir.join("ice.xlsx");
    fs::write(&unsupported, "").expect("failed to write file");
    let output = summarize(&[unsupported.to_str().unwrap(), "--summary"]);
    assert_eq!(output.status.code(), Some(1));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn summary_without_file_is_a_usage_error() {
    let output = summarize(&["--summary"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn generator_rejects_unknown_extension() {
    let dir = scratch_dir("generator_extension");
    let out = dir.join("ice.txt");
    let output = run_bin(
        env!("CARGO_BIN_EXE_generate_sample"),
        &["--out", out.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(!out.exists());

    fs::remove_dir_all(&dir).ok();
}
