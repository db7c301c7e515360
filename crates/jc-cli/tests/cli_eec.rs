use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jetcorr"))
}

fn tmp_path(filename: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("jetcorr_cli_{}_{}_{}", std::process::id(), nanos, filename));
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn simulate(events: usize, seed: u64) -> PathBuf {
    let sample = tmp_path("jets.parquet");
    let out = run(&[
        "simulate",
        "--events",
        &events.to_string(),
        "--seed",
        &seed.to_string(),
        "--output",
        sample.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "simulate failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(sample.exists());
    sample
}

#[test]
fn simulate_reports_jet_count() {
    let sample = simulate(80, 3);
    let v: serde_json::Value = serde_json::from_slice(
        &run(&["simulate", "--events", "80", "--seed", "3", "--output", sample.to_str().unwrap()])
            .stdout,
    )
    .expect("simulate should print JSON");
    assert_eq!(v.get("jets").and_then(|x| x.as_u64()), Some(80));
    let _ = std::fs::remove_file(&sample);
}

#[test]
fn eec_pipeline_writes_plot_and_summary() {
    let sample = simulate(400, 11);
    let plot = tmp_path("eec.svg");

    let out = run(&[
        "eec",
        "--input",
        sample.to_str().unwrap(),
        "--output",
        plot.to_str().unwrap(),
        "--threads",
        "1",
    ]);
    assert!(out.status.success(), "eec failed: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("eec should print a JSON summary");
    let total = v.get("jets_total").and_then(|x| x.as_u64()).expect("jets_total");
    let selected = v.get("jets_selected").and_then(|x| x.as_u64()).expect("jets_selected");
    assert_eq!(total, 400);
    assert!(selected > 0 && selected < total);

    // Normalized histogram: the total measure is 1.
    let sum = v.get("histogram_sum").and_then(|x| x.as_f64()).expect("histogram_sum");
    assert!((sum - 1.0).abs() < 1e-9, "histogram_sum = {sum}");

    let svg = std::fs::read_to_string(&plot).expect("plot file");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("N = 2"));

    let _ = std::fs::remove_file(&sample);
    let _ = std::fs::remove_file(&plot);
}

#[test]
fn eec_identical_inputs_give_identical_artifacts() {
    let sample = simulate(300, 21);
    let plot_a = tmp_path("a.svg");
    let plot_b = tmp_path("b.svg");
    let art_a = tmp_path("a.json");
    let art_b = tmp_path("b.json");

    for (plot, art) in [(&plot_a, &art_a), (&plot_b, &art_b)] {
        let out = run(&[
            "eec",
            "--input",
            sample.to_str().unwrap(),
            "--output",
            plot.to_str().unwrap(),
            "--artifact",
            art.to_str().unwrap(),
        ]);
        assert!(out.status.success(), "eec failed: {}", String::from_utf8_lossy(&out.stderr));
    }

    let a = std::fs::read_to_string(&art_a).unwrap();
    let b = std::fs::read_to_string(&art_b).unwrap();
    assert_eq!(a, b, "artifact must be deterministic");

    for p in [&sample, &plot_a, &plot_b, &art_a, &art_b] {
        let _ = std::fs::remove_file(p);
    }
}

#[test]
fn eec_empty_selection_fails_with_message() {
    let sample = simulate(50, 5);
    let plot = tmp_path("never.svg");

    // An impossible pt window: nothing survives.
    let out = run(&[
        "eec",
        "--input",
        sample.to_str().unwrap(),
        "--min-jet-pt",
        "100000",
        "--max-jet-pt",
        "100001",
        "--output",
        plot.to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no jet passed the selection"), "stderr: {stderr}");
    assert!(!plot.exists());

    let _ = std::fs::remove_file(&sample);
}

#[test]
fn eec_missing_input_fails() {
    let plot = tmp_path("never.svg");
    let out = run(&[
        "eec",
        "--input",
        "/nonexistent/jets.parquet",
        "--output",
        plot.to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nonexistent"));
}

#[test]
fn eec_respects_config_file_and_overrides() {
    let sample = simulate(400, 11);
    let plot = tmp_path("cfg.svg");
    let config = tmp_path("cuts.json");
    std::fs::write(
        &config,
        r#"{"cuts": {"min_jet_pt": 80.0, "max_jet_pt": 140.0, "min_jet_eta": -3.0, "max_jet_eta": 3.0}}"#,
    )
    .unwrap();

    let out = run(&[
        "eec",
        "--input",
        sample.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--bins",
        "50",
        "--output",
        plot.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "eec failed: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    // The wide window from the config keeps every toy jet.
    assert_eq!(v.get("jets_selected").and_then(|x| x.as_u64()), Some(400));
    // The flag override wins over the config default.
    assert_eq!(v.get("bins").and_then(|x| x.as_u64()), Some(50));

    for p in [&sample, &plot, &config] {
        let _ = std::fs::remove_file(p);
    }
}
