use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn spot_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_spot-sim"))
}

#[test]
fn version_prints_the_package_version() {
    let output = spot_sim().arg("version").output().expect("run spot-sim version");
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(body.trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn radius_job_writes_table_and_manifest() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("job.yaml");
    fs::write(
        &config,
        "a: 1.0e-7\nd: 1.0e-7\nr_steps: 5\nrho_values: [0.5, 2.0]\njobname: smoke\nsolver:\n  scheduler:\n    parallelism: 2\n",
    )
    .expect("write config");

    let status = spot_sim()
        .args(["radius", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(dir.path())
        .status()
        .expect("run spot-sim radius");
    assert!(status.success());

    let data = dir.path().join("smoke").join("Data");
    let table = fs::read_to_string(data.join("RAD_POW_ANALYTICAL.txt")).expect("table");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "radius_norm\tpower_rho0.5\tpower_rho2");
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("0\t"));

    let manifest: Value =
        serde_json::from_slice(&fs::read(data.join("run_manifest.json")).expect("manifest"))
            .expect("json");
    assert_eq!(manifest["provenance"]["command"], "radius");
    assert_eq!(manifest["outputs"][0], "RAD_POW_ANALYTICAL.txt");
    assert_eq!(manifest["config"]["r_steps"], 5);
}

#[test]
fn invalid_config_fails_without_output() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("job.yaml");
    fs::write(&config, "ad_ratios: []\njobname: broken\n").expect("write config");
    let output = spot_sim()
        .args(["min-power", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(dir.path())
        .output()
        .expect("run spot-sim min-power");
    assert!(!output.status.success());
    assert!(!dir.path().join("broken").exists());
}

#[test]
fn crossing_reports_nan_for_a_cold_field() {
    let dir = tempdir().expect("tempdir");
    let export = dir.path().join("field.txt");
    let mut text = "%\n".repeat(8);
    text.push_str("0 1000 300\n10 1000 299\n");
    fs::write(&export, text).expect("write export");

    let output = spot_sim()
        .args(["crossing", "--t0", "341", "--file"])
        .arg(&export)
        .output()
        .expect("run spot-sim crossing");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).expect("utf8").trim(), "NaN");
}

#[test]
fn crossing_of_a_missing_export_is_nan() {
    let dir = tempdir().expect("tempdir");
    let output = spot_sim()
        .args(["crossing", "--t0", "341", "--file"])
        .arg(dir.path().join("absent.txt"))
        .output()
        .expect("run spot-sim crossing");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).expect("utf8").trim(), "NaN");
}

#[test]
fn version_long_reports_build_metadata() {
    let output = spot_sim()
        .args(["version", "--long"])
        .output()
        .expect("run spot-sim version --long");
    assert!(output.status.success());
    let info: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(info["model_extension"], "mph");
    assert!(info.get("features").is_none());
}

#[test]
fn missing_simulator_aborts_the_fem_batch() {
    let dir = tempdir().expect("tempdir");
    let output = spot_sim()
        .args(["fem", "--program", "/nonexistent/field-driver", "--out"])
        .arg(dir.path())
        .output()
        .expect("run spot-sim fem");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulator-start"), "stderr: {stderr}");
}
