//! Simulator configuration files
//!
//! A configuration file is the JSON form of
//! [`SimulatorConfig`](lumisim_core::SimulatorConfig). Every field is
//! optional. Instead of spelling out coefficients, a file may name a preset:
//!
//! ```json
//! { "model_preset": "ls_interaction", "unit_rounding": "ceiling" }
//! ```
//!
//! A base name resolves to the latest version; a qualified name such as
//! `ls_interaction_v1` pins one. Naming a preset and giving `model` in the
//! same file is an error.

use std::fs;
use std::path::Path;

use lumisim_core::SimulatorConfig;
use serde_json::Value;

use crate::{registry::PresetRegistry, PresetError, GLOBAL_PRESETS};

const PRESET_KEY: &str = "model_preset";

/// Read and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulatorConfig, PresetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PresetError::io(path, &e))?;
    let config = config_from_json(&text)?;
    log::debug!("Loaded simulator configuration from {}", path.display());
    Ok(config)
}

/// Parse and validate configuration text, resolving presets globally
pub fn config_from_json(json: &str) -> Result<SimulatorConfig, PresetError> {
    config_from_json_with(json, &GLOBAL_PRESETS)
}

/// Parse and validate configuration text against a specific registry
pub fn config_from_json_with(
    json: &str,
    registry: &PresetRegistry,
) -> Result<SimulatorConfig, PresetError> {
    let mut value: Value = serde_json::from_str(json)?;

    let preset = match value.as_object_mut() {
        Some(object) => object.remove(PRESET_KEY),
        None => return Err(PresetError::Parse("configuration must be a JSON object".into())),
    };

    let preset_name = match preset {
        None => None,
        Some(Value::String(name)) => Some(name),
        Some(_) => {
            return Err(PresetError::Parse(format!("'{PRESET_KEY}' must be a string")));
        }
    };
    if preset_name.is_some() && value.get("model").is_some() {
        return Err(PresetError::Parse(format!(
            "give either 'model' or '{PRESET_KEY}', not both"
        )));
    }

    let mut config: SimulatorConfig = serde_json::from_value(value)?;
    if let Some(name) = preset_name {
        config.model = registry.resolve(&name)?;
        log::debug!("Using model preset {}", name);
    }

    config.validate()?;
    Ok(config)
}
