use crate::estimate::{ConfigError, DEFAULT_COMM_RANGE_M, EstimatorConfig};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "prr-rs-{}-{nanos}-{name}",
        std::process::id()
    ));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn default_config_uses_pairwise_range() {
    let cfg = EstimatorConfig::default();
    assert_eq!(cfg.comm_range_m, DEFAULT_COMM_RANGE_M);
    assert!(cfg.require_direct);
    assert_eq!(cfg.comm_range_sq(), DEFAULT_COMM_RANGE_M * DEFAULT_COMM_RANGE_M);
}

#[test]
fn config_json_fills_missing_fields_with_defaults() {
    let cfg: EstimatorConfig = serde_json::from_str("{}").expect("parse config");
    assert_eq!(cfg, EstimatorConfig::default());

    let cfg: EstimatorConfig =
        serde_json::from_str(r#"{ "comm_range_m": 250.0 }"#).expect("parse config");
    assert_eq!(cfg.comm_range_m, 250.0);
    assert!(cfg.require_direct);
}

#[test]
fn cli_overrides_take_precedence_over_file() {
    let path = temp_file(
        "cfg.json",
        r#"{ "comm_range_m": 250.0, "require_direct": true }"#,
    );

    let cfg = EstimatorConfig::resolve(Some(path.as_path()), None, None).expect("resolve");
    assert_eq!(cfg.comm_range_m, 250.0);

    let cfg = EstimatorConfig::resolve(Some(path.as_path()), Some(100.0), Some(false)).expect("resolve");
    assert_eq!(cfg.comm_range_m, 100.0);
    assert!(!cfg.require_direct);

    let _ = fs::remove_file(&path);
}

#[test]
fn invalid_range_is_rejected() {
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = EstimatorConfig::resolve(None, Some(bad), None).expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidRange(_)));
    }
}

#[test]
fn unreadable_or_malformed_config_is_reported() {
    let err = EstimatorConfig::from_json_file(&PathBuf::from("/nonexistent/prr-rs/cfg.json"))
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::Io { .. }));

    let path = temp_file("bad.json", "{ comm_range_m: ");
    let err = EstimatorConfig::from_json_file(&path).expect_err("must fail");
    assert!(matches!(err, ConfigError::Json { .. }));
    let _ = fs::remove_file(&path);
}
