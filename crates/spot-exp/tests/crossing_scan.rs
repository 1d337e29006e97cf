use spot_exp::{surface_crossing, FieldSample};

const TOP: f64 = 250_000.0;

fn sample(radius: f64, height: f64, temperature: f64) -> FieldSample {
    FieldSample {
        radius,
        height,
        temperature,
    }
}

fn hot_spot() -> Vec<FieldSample> {
    vec![
        sample(0.0, TOP, 400.0),
        sample(100.0, TOP, 380.0),
        sample(200.0, TOP, 360.0),
        sample(300.0, TOP, 340.0),
        sample(400.0, TOP, 320.0),
    ]
}

#[test]
fn edge_of_the_hot_spot_is_the_coolest_sample_above_threshold() {
    assert_eq!(surface_crossing(&hot_spot(), 341.0, 1e-9), Some(200.0));
}

#[test]
fn subsurface_rows_are_ignored() {
    let mut field = hot_spot();
    field.push(sample(1000.0, 0.0, 345.0));
    field.push(sample(1200.0, TOP - 500.0, 342.0));
    assert_eq!(surface_crossing(&field, 341.0, 1e-9), Some(200.0));
}

#[test]
fn surface_tolerance_scales_with_height() {
    let mut field = hot_spot();
    // 1e-5 · TOP = 2.5, so a node 1 unit below the top still counts as surface.
    field.push(sample(250.0, TOP - 1.0, 350.0));
    assert_eq!(surface_crossing(&field, 341.0, 1e-9), Some(250.0));
}

#[test]
fn negative_radii_are_dropped() {
    let mut field = hot_spot();
    field.push(sample(-200.0, TOP, 345.0));
    assert_eq!(surface_crossing(&field, 341.0, 1e-9), Some(200.0));
}

#[test]
fn cold_surface_has_no_crossing() {
    let field: Vec<_> = hot_spot()
        .into_iter()
        .map(|s| sample(s.radius, s.height, 300.0))
        .collect();
    assert_eq!(surface_crossing(&field, 341.0, 1e-9), None);
}

#[test]
fn threshold_equality_is_not_a_crossing() {
    let field = vec![sample(0.0, TOP, 341.0), sample(50.0, TOP, 330.0)];
    assert_eq!(surface_crossing(&field, 341.0, 1e-9), None);
}

#[test]
fn non_finite_heights_do_not_define_the_surface() {
    let mut field = hot_spot();
    field.push(sample(900.0, f64::NAN, 500.0));
    field.push(sample(950.0, f64::INFINITY, 500.0));
    assert_eq!(surface_crossing(&field, 341.0, 1e-9), Some(200.0));
}
