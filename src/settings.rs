//! Interpreter configuration files.
//!
//! TOML or JSON, chosen by extension (anything else is tried as TOML).
//! A file only overrides the keys it names; the rest come from the
//! selected preset.

use crate::error::SessionError;
use orrery_input::InterpreterConfig;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Start from `preset` (default `classic`), overlay `file`, validate.
pub fn resolve(preset: Option<&str>, file: Option<&Path>) -> Result<InterpreterConfig, SessionError> {
    let base = match preset {
        Some(name) => InterpreterConfig::from_preset(name)?,
        None => InterpreterConfig::classic(),
    };
    let config = match file {
        Some(path) => overlay_file(base, path)?,
        None => base,
    };
    config.validate()?;
    Ok(config)
}

/// Load a config file on top of the defaults.
pub fn load(path: &Path) -> Result<InterpreterConfig, SessionError> {
    resolve(None, Some(path))
}

fn overlay_file(base: InterpreterConfig, path: &Path) -> Result<InterpreterConfig, SessionError> {
    let text = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
    let overrides = parse_document(&text, path)?;
    let config = overlay(base, overrides).map_err(|reason| SessionError::Config {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(path = %path.display(), "config file applied");
    Ok(config)
}

fn parse_document(text: &str, path: &Path) -> Result<Value, SessionError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str::<Value>(text).map_err(|e| e.to_string())
    } else {
        toml::from_str::<Value>(text).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| SessionError::Config {
        path: path.to_path_buf(),
        reason,
    })
}

/// Replace top-level keys of `base` with those in `overrides`.
pub fn overlay(base: InterpreterConfig, overrides: Value) -> Result<InterpreterConfig, String> {
    let Value::Object(overrides) = overrides else {
        return Err("expected a table of settings".to_string());
    };
    let mut merged = serde_json::to_value(&base).map_err(|e| e.to_string())?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            if !fields.contains_key(&key) {
                return Err(format!("unknown setting `{key}`"));
            }
            fields.insert(key, value);
        }
    }
    serde_json::from_value(merged).map_err(|e| e.to_string())
}
