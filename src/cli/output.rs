//! Output formatting helpers for CLI commands

use crate::flavor::{Flavor, FlavorOutcome};
use serde_json::json;
use std::path::Path;

/// Render a check result: the bare flavor, or a JSON object.
pub fn format_outcome(outcome: &FlavorOutcome, json: bool) -> serde_json::Result<String> {
    if !json {
        return Ok(outcome.flavor.to_string());
    }

    let mut value = serde_json::to_value(outcome)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("exit_code".to_string(), json!(outcome.exit_code()));
    }
    serde_json::to_string_pretty(&value)
}

/// Render the cached flavor.
pub fn format_cached(flavor: Flavor, path: &Path, json: bool) -> serde_json::Result<String> {
    if !json {
        return Ok(flavor.to_string());
    }

    serde_json::to_string_pretty(&json!({
        "flavor": flavor,
        "path": path.display().to_string(),
    }))
}
