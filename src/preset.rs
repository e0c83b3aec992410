//! Visual preset selection, either by name or from an advanced-mode JSON blob.

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::options::{OptionControl, Rs2Option, first_supporting};

/// Presets shipped with D400 firmware that the harness knows by name.
pub const KNOWN_PRESETS: [&str; 3] = ["High Accuracy", "High Density", "Hand"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetOutcome {
    AlreadyActive,
    Applied { index: i32 },
}

/// Enable the visual preset whose description starts with `name`.
///
/// Only the first sensor supporting [`Rs2Option::VisualPreset`] is considered.
/// Candidate indices run from the option range minimum up to, but excluding,
/// its maximum.
pub fn apply_named_preset<S: OptionControl>(sensors: &[S], name: &str) -> Result<PresetOutcome> {
    info!("Enabling preset {name}");

    let sensor = first_supporting(sensors, Rs2Option::VisualPreset)?.ok_or_else(|| {
        Error::MissingCapability("Did not find sensor that supports visual preset option".to_string())
    })?;

    let current = sensor.get(Rs2Option::VisualPreset)?;
    let current_desc = sensor.value_description(Rs2Option::VisualPreset, current)?;
    if current_desc.starts_with(name) {
        info!("already using desired preset");
        return Ok(PresetOutcome::AlreadyActive);
    }

    let range = sensor.range(Rs2Option::VisualPreset)?;
    for index in (range.min as i32)..(range.max as i32) {
        let desc = sensor.value_description(Rs2Option::VisualPreset, index as f32)?;
        debug!(index, %desc, "visual preset candidate");
        if desc.starts_with(name) {
            sensor.set(Rs2Option::VisualPreset, index as f32)?;
            info!("Enabled desired preset");
            return Ok(PresetOutcome::Applied { index });
        }
    }

    Err(Error::MissingCapability(format!(
        "Sensor {} has no visual preset named {name:?}",
        sensor.name()
    )))
}

/// Parse an advanced-mode settings blob and check it is a JSON object.
pub fn parse_json_preset(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) => Err(Error::PresetFormat("preset holds no settings".to_string())),
        other => Err(Error::PresetFormat(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate `json` and load it into the device through advanced mode.
///
/// Returns the number of settings in the blob.
#[cfg(feature = "native")]
pub fn load_json_preset(advanced: &crate::advanced_mode::AdvancedMode<'_>, json: &str) -> Result<usize> {
    let settings = parse_json_preset(json)?;
    info!("Loading JSON preset with {} settings", settings.len());
    advanced.load_json(json)?;
    info!("Loaded JSON preset");
    debug!("advanced mode settings now: {}", advanced.serialize_json()?);
    Ok(settings.len())
}
