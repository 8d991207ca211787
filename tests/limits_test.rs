//! Tests for the configurable structural limits.

mod common;

use bidcheck::openrtb::RequestValidator;
use bidcheck::{EngineConfig, EngineError, ViolationKind};

use common::valid_request;

fn validator(toml: &str) -> RequestValidator {
    RequestValidator::new(&EngineConfig::from_toml_str(toml).unwrap())
}

fn limit_paths(validator: &RequestValidator) -> Vec<String> {
    let report = validator.validate(&valid_request()).unwrap();
    assert!(report
        .iter()
        .all(|v| v.kind == ViolationKind::StructuralLimitExceeded));
    report.iter().map(|v| v.path.to_string()).collect()
}

#[test]
fn test_default_limits_accept_valid_request() {
    let defaults = validator("");
    assert_eq!(defaults.limits().max_depth, 32);
    assert!(limit_paths(&defaults).is_empty());
}

#[test]
fn test_depth_limit_stops_at_deepest_entities() {
    let two_levels = validator("[limits]\nmax_depth = 2\n");
    assert_eq!(limit_paths(&two_levels), ["app.publisher.ext"]);

    let one_level = validator("[limits]\nmax_depth = 1\n");
    assert_eq!(limit_paths(&one_level), ["imp[0].video", "app.publisher"]);
}

#[test]
fn test_array_limit_applies_to_every_array() {
    let single_item = validator("[limits]\nmax_array_len = 1\n");
    assert_eq!(
        limit_paths(&single_item),
        ["imp[0].video.protocols", "imp[0].video.playbackmethod"]
    );
}

#[test]
fn test_oversized_impression_list() {
    let two_items = validator("[limits]\nmax_array_len = 2\n");
    let mut request = valid_request();
    request.imp = vec![request.imp[0].clone(); 3];

    let report = two_items.validate(&request).unwrap();
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.path.to_string(), "imp");
    assert_eq!(violation.kind, ViolationKind::StructuralLimitExceeded);
    assert_eq!(violation.offending_value.as_deref(), Some("3 items"));
}

#[test]
fn test_invalid_config_is_an_error() {
    assert!(matches!(
        EngineConfig::from_toml_str("[limits]\nmax_depth = 0\n"),
        Err(EngineError::Config(_))
    ));
    assert!(matches!(
        EngineConfig::from_toml_str("[limits]\nmax_width = 4\n"),
        Err(EngineError::ConfigParse(_))
    ));
}
