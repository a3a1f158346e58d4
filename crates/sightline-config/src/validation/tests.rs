//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = SightlineConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_duplicate_surface_names() {
    let mut config = SightlineConfig::default();
    config.surfaces[1].name = "main".into();
    config.bridge.reveal_surface = "main".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("duplicate surface 'main'"), "got: {err}");
}

#[test]
fn catches_empty_surface_list() {
    let mut config = SightlineConfig::default();
    config.surfaces.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("at least one surface"));
}

#[test]
fn catches_missing_interactive_surface() {
    let mut config = SightlineConfig::default();
    for s in &mut config.surfaces {
        s.interactive = false;
    }
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("must be interactive"));
}

#[test]
fn catches_zero_width() {
    let mut config = SightlineConfig::default();
    config.surfaces[0].width = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("surfaces[0].width"));
}

#[test]
fn catches_oversized_height() {
    let mut config = SightlineConfig::default();
    config.surfaces[1].height = 20_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("surfaces[1].height"));
}

#[test]
fn catches_empty_name_and_route() {
    let mut config = SightlineConfig::default();
    config.surfaces[0].name = " ".into();
    config.surfaces[0].route = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("surfaces[0].name"));
    assert!(err.contains("surfaces[0].route"));
}

#[test]
fn catches_route_traversal() {
    let mut config = SightlineConfig::default();
    config.routes.insert("home", "../../etc/passwd");
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("routes.home"));
}

#[test]
fn catches_unknown_reveal_surface() {
    let mut config = SightlineConfig::default();
    config.bridge.reveal_surface = "camera".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.reveal_surface"));
}

#[test]
fn unmapped_surface_route_is_left_to_the_loader() {
    let mut config = SightlineConfig::default();
    config.surfaces[1].route = "settings".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn collects_multiple_errors() {
    let mut config = SightlineConfig::default();
    config.surfaces[0].width = 0;
    config.bridge.reveal_surface = "camera".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("; "), "errors should be joined: {err}");
}
