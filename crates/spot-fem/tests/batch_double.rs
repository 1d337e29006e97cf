use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use spot_core::{ErrorInfo, FemConfig, SpotError};
use spot_fem::{
    batch_rho_analysis, read_field_export, FemLayout, FieldSimulator, EXPORT_PREAMBLE_LINES,
};
use tempfile::tempdir;

const SURFACE: f64 = 250_000.0;

/// Writes a Gaussian hot spot whose peak rise scales with the laser power.
#[derive(Default)]
struct CannedSimulator {
    parameters: BTreeMap<String, f64>,
    calls: Vec<String>,
    skip_export_at: BTreeSet<u64>,
    fail_solve_at: Option<u64>,
}

impl CannedSimulator {
    fn power(&self) -> f64 {
        self.parameters.get("p_laser").copied().unwrap_or(0.0)
    }
}

impl FieldSimulator for CannedSimulator {
    fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), SpotError> {
        self.calls.push(format!("set {name}"));
        self.parameters.insert(name.to_string(), value);
        Ok(())
    }

    fn build_and_solve(&mut self, study: &str) -> Result<(), SpotError> {
        self.calls.push(format!("solve {study}"));
        if self.fail_solve_at == Some(self.power().to_bits()) {
            return Err(SpotError::Environment(ErrorInfo::new(
                "simulator-solve",
                "license checkout failed",
            )));
        }
        Ok(())
    }

    fn export_field(&mut self, plot: &str, path: &Path) -> Result<(), SpotError> {
        self.calls.push(format!("export {plot}"));
        if self.skip_export_at.contains(&self.power().to_bits()) {
            return Ok(());
        }
        let rise = 100.0 * self.power() / 0.0075;
        let mut text: String = (0..EXPORT_PREAMBLE_LINES)
            .map(|i| format!("% preamble {i}\n"))
            .collect();
        for step in 0..=10 {
            let radius = 100.0 * step as f64;
            let temperature = 293.15 + rise * (-(radius / 300.0).powi(2)).exp();
            text.push_str(&format!("{radius} {SURFACE} {temperature}\n"));
            text.push_str(&format!("{radius} 0 {}\n", temperature + 50.0));
        }
        fs::write(path, text).map_err(|err| SpotError::Io(ErrorInfo::new("write", err.to_string())))
    }
}

#[test]
fn batch_sets_parameters_once_per_rho_then_solves_each_power() {
    let dir = tempdir().expect("tempdir");
    let config = FemConfig {
        rho_values: vec![0.5, 2.0],
        ..FemConfig::default()
    };
    let mut simulator = CannedSimulator::default();
    let analyses = batch_rho_analysis(&mut simulator, &config, dir.path()).expect("batch");
    assert_eq!(analyses.len(), 2);

    let per_rho = [
        "set a",
        "set T_0",
        "set k_si",
        "set rho",
        "set p_laser",
        "solve Study 1",
        "export Plot 1",
        "set p_laser",
        "solve Study 1",
        "export Plot 1",
        "set p_laser",
        "solve Study 1",
        "export Plot 1",
    ];
    let expected: Vec<String> = per_rho
        .iter()
        .chain(per_rho.iter())
        .map(|call| call.to_string())
        .collect();
    assert_eq!(simulator.calls, expected);
    assert_eq!(simulator.parameters["rho"], 2.0);
    assert_relative_eq!(simulator.parameters["k_si"], 4.8 / 2.0, max_relative = 1e-12);
}

#[test]
fn crossings_are_normalized_and_written() {
    let dir = tempdir().expect("tempdir");
    let config = FemConfig::default();
    let mut simulator = CannedSimulator::default();
    let analyses = batch_rho_analysis(&mut simulator, &config, dir.path()).expect("batch");
    let analysis = &analyses[0];

    let radius_norm = analysis.result.radius_norm();
    assert_eq!(radius_norm[0], None);
    assert_relative_eq!(radius_norm[1].expect("crossing"), 0.0);
    assert_relative_eq!(radius_norm[2].expect("crossing"), 2.0, max_relative = 1e-12);

    let p_ref = 0.5 * 9.6 * (341.0 - 293.15) * 2.0 * std::f64::consts::PI * 1e-7;
    assert_relative_eq!(analysis.result.p_ref, p_ref, max_relative = 1e-12);
    assert_relative_eq!(analysis.result.power_norm()[2], 0.0075 / p_ref, max_relative = 1e-12);

    let layout = FemLayout::new(dir.path());
    assert_eq!(analysis.table, layout.plot_path(0.5));
    assert!(analysis
        .table
        .ends_with("PLOTDATA/RAD_POW_RHO0.5_COMSOL.txt"));
    assert!(analysis.exports[1].ends_with("RAWSOLVED/RHO_0.5/SOLVED_RHO0.5_P0.00375.txt"));
    let raw = read_field_export(&analysis.exports[2]).expect("raw export");
    assert_eq!(raw.len(), 22);

    let table = fs::read_to_string(&analysis.table).expect("table");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "q_norm\tr_norm");
    assert_eq!(lines[1], "0\tNaN");
    let last: Vec<f64> = lines[3]
        .split('\t')
        .map(|field| field.parse().expect("number"))
        .collect();
    assert_relative_eq!(last[1], 2.0, max_relative = 1e-12);
}

#[test]
fn missing_export_is_a_missing_radius() {
    let dir = tempdir().expect("tempdir");
    let config = FemConfig::default();
    let mut simulator = CannedSimulator {
        skip_export_at: [0.0075f64.to_bits()].into_iter().collect(),
        ..CannedSimulator::default()
    };
    let analyses = batch_rho_analysis(&mut simulator, &config, dir.path()).expect("batch");
    let radius_norm = analyses[0].result.radius_norm();
    assert_eq!(radius_norm[2], None);
    assert!(radius_norm[1].is_some());
}

#[test]
fn simulator_failures_abort_the_batch() {
    let dir = tempdir().expect("tempdir");
    let config = FemConfig::default();
    let mut simulator = CannedSimulator {
        fail_solve_at: Some(0.00375f64.to_bits()),
        ..CannedSimulator::default()
    };
    let err = batch_rho_analysis(&mut simulator, &config, dir.path()).expect_err("aborts");
    assert!(matches!(err, SpotError::Environment(_)));
    assert_eq!(err.info().context.get("rho").map(String::as_str), Some("0.5"));
    assert_eq!(err.info().context.get("p_laser").map(String::as_str), Some("0.00375"));
    assert!(!FemLayout::new(dir.path()).plot_path(0.5).exists());
}

#[test]
fn degenerate_reference_power_is_rejected_before_solving() {
    let dir = tempdir().expect("tempdir");
    let config = FemConfig {
        t0: 293.15,
        ..FemConfig::default()
    };
    let mut simulator = CannedSimulator::default();
    let err = batch_rho_analysis(&mut simulator, &config, dir.path()).expect_err("P_ref is zero");
    assert_eq!(err.info().code, "degenerate-reference-power");
    assert!(simulator.calls.is_empty());
}
