mod support;

use realsense_smoke::preset::{KNOWN_PRESETS, PresetOutcome, apply_named_preset, parse_json_preset};
use realsense_smoke::{Error, Rs2Option};
use support::MockSensor;

const D415_PRESETS: [&str; 6] = [
    "Custom",
    "Default",
    "Hand",
    "High Accuracy",
    "High Density",
    "Medium Density",
];

const HIGH_ACCURACY_JSON: &str = include_str!("../presets/high_accuracy.json");

#[test]
fn preset_already_active_is_left_alone() -> realsense_smoke::Result<()> {
    let sensors = vec![MockSensor::depth(&D415_PRESETS, 3)];

    let outcome = apply_named_preset(&sensors, "High Accuracy")?;

    assert_eq!(outcome, PresetOutcome::AlreadyActive);
    assert!(sensors[0].set_calls.borrow().is_empty(), "no write expected");
    Ok(())
}

#[test]
fn preset_is_matched_by_description_prefix() -> realsense_smoke::Result<()> {
    let presets = ["Custom", "Default", "High Density (D415)", "High Accuracy (D415)"];
    let sensors = vec![MockSensor::depth(&presets, 0)];

    let outcome = apply_named_preset(&sensors, KNOWN_PRESETS[1])?;

    assert_eq!(outcome, PresetOutcome::Applied { index: 2 });
    assert_eq!(sensors[0].value(Rs2Option::VisualPreset), Some(2.0));
    Ok(())
}

#[test]
fn only_first_capable_sensor_is_used() -> realsense_smoke::Result<()> {
    let sensors = vec![
        MockSensor::new("RGB Camera"),
        MockSensor::depth(&D415_PRESETS, 1),
        MockSensor::depth(&D415_PRESETS, 1),
    ];

    apply_named_preset(&sensors, "Hand")?;

    assert_eq!(sensors[1].value(Rs2Option::VisualPreset), Some(2.0));
    assert_eq!(sensors[2].value(Rs2Option::VisualPreset), Some(1.0));
    Ok(())
}

#[test]
fn unknown_preset_is_an_error() {
    let sensors = vec![MockSensor::depth(&D415_PRESETS, 1)];

    let err = apply_named_preset(&sensors, "Ultra Mode").unwrap_err();

    assert!(matches!(err, Error::MissingCapability(_)), "got {err}");
    assert_eq!(sensors[0].value(Rs2Option::VisualPreset), Some(1.0));
}

#[test]
fn no_preset_capable_sensor_is_an_error() {
    let sensors = vec![MockSensor::new("RGB Camera")];

    let err = apply_named_preset(&sensors, "High Accuracy").unwrap_err();

    assert_eq!(
        err.to_string(),
        "Missing capability: Did not find sensor that supports visual preset option"
    );
}

#[test]
fn failed_capability_query_is_reported_as_is() {
    let mut broken = MockSensor::depth(&D415_PRESETS, 1);
    broken.broken_queries = true;
    let sensors = vec![broken, MockSensor::depth(&D415_PRESETS, 1)];

    let err = apply_named_preset(&sensors, "High Accuracy").unwrap_err();

    assert!(matches!(err, Error::Device(_)), "got {err}");
    assert_eq!(sensors[1].value(Rs2Option::VisualPreset), Some(1.0), "later sensors untouched");
}

#[test]
fn bundled_json_preset_parses() -> realsense_smoke::Result<()> {
    let settings = parse_json_preset(HIGH_ACCURACY_JSON)?;
    assert!(!settings.is_empty());
    assert!(settings.keys().any(|k| k.starts_with("param-")));
    Ok(())
}

#[test]
fn malformed_json_preset_is_rejected() {
    assert!(matches!(parse_json_preset("{ \"param-a\": "), Err(Error::InvalidPreset(_))));
    assert!(matches!(parse_json_preset("[1, 2]"), Err(Error::PresetFormat(_))));
    assert!(matches!(parse_json_preset("{}"), Err(Error::PresetFormat(_))));
}
