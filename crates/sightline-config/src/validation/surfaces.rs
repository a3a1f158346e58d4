//! Surface list, route table and bridge validation.

use std::collections::HashSet;

use super::helpers::validate_range;
use crate::schema::SightlineConfig;

/// Largest window edge accepted from config, in logical pixels.
const MAX_EDGE: u32 = 16_384;

pub(super) fn validate_surfaces(errors: &mut Vec<String>, config: &SightlineConfig) {
    if config.surfaces.is_empty() {
        errors.push("surfaces: at least one surface is required".into());
        return;
    }

    let mut seen = HashSet::new();
    for (i, surface) in config.surfaces.iter().enumerate() {
        if surface.name.trim().is_empty() {
            errors.push(format!("surfaces[{i}].name must not be empty"));
        } else if !seen.insert(surface.name.as_str()) {
            errors.push(format!("surfaces[{i}]: duplicate surface '{}'", surface.name));
        }
        if surface.route.trim().is_empty() {
            errors.push(format!("surfaces[{i}].route must not be empty"));
        }
        validate_range(errors, &format!("surfaces[{i}].width"), surface.width, 1, MAX_EDGE);
        validate_range(errors, &format!("surfaces[{i}].height"), surface.height, 1, MAX_EDGE);
    }

    if !config.surfaces.iter().any(|s| s.interactive) {
        errors.push("surfaces: at least one surface must be interactive".into());
    }
}

pub(super) fn validate_routes(errors: &mut Vec<String>, config: &SightlineConfig) {
    for (page, path) in config.routes.iter() {
        if path.trim().is_empty() {
            errors.push(format!("routes.{page} must not be empty"));
        }
        if path.split('/').any(|seg| seg == "..") {
            errors.push(format!("routes.{page} = \"{path}\" must not contain '..'"));
        }
    }
}

pub(super) fn validate_bridge(errors: &mut Vec<String>, config: &SightlineConfig) {
    let target = &config.bridge.reveal_surface;
    if config.surface(target).is_none() {
        errors.push(format!(
            "bridge.reveal_surface = \"{target}\" does not name a configured surface"
        ));
    }
}
