use spot_core::errors::{ErrorInfo, SpotError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("rho", "0.5")
        .with_context("cell", "3")
}

#[test]
fn parameter_error_surface() {
    let err = SpotError::Parameter(sample_info("P001", "a must be positive"));
    assert_eq!(err.info().code, "P001");
    assert!(err.info().context.contains_key("rho"));
    assert!(!err.is_numerical());
}

#[test]
fn numerical_error_surface() {
    let err = SpotError::Numerical(sample_info("N001", "no convergence"));
    assert_eq!(err.info().code, "N001");
    assert!(err.is_numerical());
}

#[test]
fn environment_error_surface() {
    let err = SpotError::Environment(sample_info("E001", "simulator missing"));
    assert_eq!(err.info().code, "E001");
}

#[test]
fn display_lists_context_and_hint() {
    let err = SpotError::Io(sample_info("IO1", "export missing").with_hint("rerun the solve"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("io error: export missing (code: IO1)"));
    assert!(rendered.contains("cell=3, rho=0.5"));
    assert!(rendered.ends_with("hint: rerun the solve"));
}

#[test]
fn with_context_keeps_family() {
    let err = SpotError::Numerical(ErrorInfo::new("zero-integral", "integral is zero"))
        .with_context("radius_norm", "1.5");
    assert!(err.is_numerical());
    assert_eq!(err.info().context["radius_norm"], "1.5");
}

#[test]
fn serde_roundtrip_keeps_family_tag() {
    let err = SpotError::Serde(sample_info("S001", "schema mismatch"));
    let json = serde_json::to_string(&err).expect("encode");
    assert!(json.contains("\"family\":\"Serde\""));
    let decoded: SpotError = serde_json::from_str(&json).expect("decode");
    assert_eq!(decoded, err);
}
