use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fitchart"))
        .args(args)
        .output()
        .expect("fitchart process should run")
}

fn run_json(args: &[&str]) -> Value {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fitchart-{}-{name}", std::process::id()))
}

#[test]
fn zoomed_preset_reports_frame_as_json() {
    let report = run_json(&["--preset", "heart_rate", "--zoom", "4", "--json"]);

    assert_eq!(report["source"], "heart_rate");
    assert_eq!(report["points"], 720);
    assert_eq!(report["frame"]["zoom"].as_f64(), Some(4.0));

    let x_count = report["x_axis"]["count"].as_u64().expect("x count");
    let y_count = report["y_axis"]["count"].as_u64().expect("y count");
    let x_labels = report["frame"]["x_labels"].as_array().expect("x labels");
    let y_labels = report["frame"]["y_labels"].as_array().expect("y labels");
    assert_eq!(x_labels.len() as u64, x_count);
    assert_eq!(y_labels.len() as u64, y_count);

    let start = report["frame"]["visible_index_range"]["start"].as_u64().expect("start");
    let end = report["frame"]["visible_index_range"]["end"].as_u64().expect("end");
    assert!(start < end && end <= 720);
}

#[test]
fn reset_returns_to_construction_labels() {
    let report = run_json(&["--zoom", "8", "--pan", "-200", "--reset", "--json"]);
    assert_eq!(report["frame"]["zoom"].as_f64(), Some(1.0));
    assert_eq!(report["frame"]["x_labels"], report["x_axis"]["labels"]);
    assert_eq!(report["frame"]["y_labels"], report["y_axis"]["labels"]);
}

#[test]
fn same_seed_gives_same_output() {
    let a = run(&["--preset", "pace", "--seed", "9", "--zoom", "3"]);
    let b = run(&["--preset", "pace", "--seed", "9", "--zoom", "3"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn plots_a_series_file() {
    let path = temp_path("series.csv");
    let mut csv = String::from("x,y\n");
    for i in 0..50 {
        csv.push_str(&format!("{},{}\n", i * 10, 100 + (i % 7) * 3));
    }
    fs::write(&path, csv).expect("write series");

    let report = run_json(&["--series", path.to_str().expect("utf-8 path"), "--json"]);
    assert_eq!(report["points"], 50);
    assert_eq!(report["x_axis"]["start"].as_f64(), Some(0.0));
    assert!(report["x_axis"]["end"].as_f64().expect("end") >= 490.0);

    let _ = fs::remove_file(&path);
}

#[test]
fn writes_label_and_window_csv() {
    let labels = temp_path("labels.csv");
    let window = temp_path("window.csv");
    let output = run(&[
        "--preset",
        "elevation",
        "--zoom",
        "5",
        "--labels-out",
        labels.to_str().expect("utf-8 path"),
        "--window-out",
        window.to_str().expect("utf-8 path"),
    ]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let label_text = fs::read_to_string(&labels).expect("labels written");
    assert!(label_text.starts_with("axis,index,label\n"));
    assert!(label_text.lines().any(|l| l.starts_with("y,0,")));

    let window_text = fs::read_to_string(&window).expect("window written");
    assert!(window_text.starts_with("x,y\n"));
    let rows = window_text.lines().count() - 1;
    assert!(rows > 0 && rows < 1080, "got {rows} rows");

    let _ = fs::remove_file(&labels);
    let _ = fs::remove_file(&window);
}

#[test]
fn loads_a_chart_file() {
    let report = run_json(&["--config", "charts/trail_run.toml", "--json"]);
    assert_eq!(report["source"], "pace");
    let factor = report["y_axis"]["label_factor_label"].as_str().expect("pace unit");
    assert!(factor.contains("mile"), "got {factor}");
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "rowing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rowing"), "stderr={stderr}");
}

#[test]
fn conflicting_sources_fail() {
    let output = run(&["--preset", "pace", "--config", "charts/elevation.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("mutually exclusive"));
}
