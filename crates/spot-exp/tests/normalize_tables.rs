use std::f64::consts::PI;
use std::fs;

use approx::assert_relative_eq;
use spot_exp::{
    artefact_name, ensure_dir, normalize_crossings, reference_power, substrate_conductivity,
    write_table, Normalization, NORMALIZED_HEADER,
};
use tempfile::tempdir;

#[test]
fn reference_power_follows_the_conduction_scale() {
    assert_relative_eq!(substrate_conductivity(0.5, None), 9.6, max_relative = 1e-12);
    assert_eq!(substrate_conductivity(0.5, Some(1.3)), 1.3);
    let expected = 0.5 * 9.6 * (341.0 - 293.15) * 2.0 * PI * 1e-7;
    assert_relative_eq!(reference_power(0.5, 9.6, 341.0, 1e-7), expected, max_relative = 1e-12);

    let norm = Normalization::new(0.5, 1e-7, 341.0, None, 1e-9).expect("normalization");
    assert_relative_eq!(norm.reference_power(), expected, max_relative = 1e-12);
}

#[test]
fn ambient_transition_temperature_is_degenerate() {
    let err = Normalization::new(0.5, 1e-7, 293.15, None, 1e-9).expect_err("zero P_ref");
    assert_eq!(err.info().code, "degenerate-reference-power");
    let err = Normalization::new(0.5, 1e-7, 341.0, None, 0.0).expect_err("zero scale");
    assert_eq!(err.info().code, "invalid-length-scale");
}

#[test]
fn missing_crossings_stay_missing_after_normalization() {
    let norm = Normalization::new(0.5, 1e-7, 341.0, None, 1e-9).expect("normalization");
    let powers = [0.0, 0.00375, 0.0075];
    let result = normalize_crossings(&norm, &powers, &[None, Some(150.0), Some(-300.0)])
        .expect("normalize");

    assert_eq!(result.power_norm()[0], 0.0);
    assert_relative_eq!(result.power_norm()[2], 0.0075 / result.p_ref, max_relative = 1e-12);
    assert_eq!(result.radius_norm()[0], None);
    assert_relative_eq!(result.radius_norm()[1].expect("radius"), 1.5, max_relative = 1e-12);
    assert_relative_eq!(result.radius_norm()[2].expect("radius"), 3.0, max_relative = 1e-12);

    let rows = result.rows();
    assert_eq!(rows.len(), 3);
    assert!(rows[0][1].is_nan());
    assert_eq!(rows[0][0], 0.0);
}

#[test]
fn each_power_needs_a_radius() {
    let norm = Normalization::new(2.0, 1e-7, 341.0, Some(3.0), 1e-9).expect("normalization");
    let err = normalize_crossings(&norm, &[0.1, 0.2], &[None]).expect_err("mismatch");
    assert_eq!(err.info().code, "length-mismatch");
}

#[test]
fn tables_are_written_tab_separated() {
    let dir = tempdir().expect("tempdir");
    let data = ensure_dir(dir.path().join("job").join("Data")).expect("dir");
    let path = data.join("RAD_POW_ANALYTICAL.txt");
    write_table(
        &path,
        Some("radius_norm\tpower_rho0.5"),
        &[vec![0.0, 0.25], vec![2.5, f64::NAN]],
    )
    .expect("write");

    let text = fs::read_to_string(&path).expect("read");
    assert_eq!(text, "radius_norm\tpower_rho0.5\n0\t0.25\n2.5\tNaN\n");
}

#[test]
fn headerless_tables_have_only_rows() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plain.txt");
    write_table(&path, None, &[vec![1.0, 2.0]]).expect("write");
    assert_eq!(fs::read_to_string(&path).expect("read"), "1\t2\n");

    write_table(&path, Some(NORMALIZED_HEADER), &[]).expect("write");
    assert_eq!(fs::read_to_string(&path).expect("read"), "q_norm\tr_norm\n");
}

#[test]
fn artefact_names_carry_rho_and_power() {
    assert_eq!(
        artefact_name("SOLVED", 0.5, Some(0.0075), "txt"),
        "SOLVED_RHO0.5_P0.0075.txt"
    );
    assert_eq!(artefact_name("RAD_POW", 2.0, None, "txt"), "RAD_POW_RHO2.txt");
}
