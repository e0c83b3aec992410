//! Sensor options and the traits the tuning code is written against.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::RegionOfInterest;
use crate::error::Result;

/// Sensor options used by the harness.
///
/// Values match `rs2_option`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rs2Option {
    BacklightCompensation = 0,
    Brightness = 1,
    Contrast = 2,
    Exposure = 3,
    Gain = 4,
    Gamma = 5,
    Hue = 6,
    Saturation = 7,
    Sharpness = 8,
    WhiteBalance = 9,
    EnableAutoExposure = 10,
    EnableAutoWhiteBalance = 11,
    VisualPreset = 12,
    LaserPower = 13,
    Accuracy = 14,
    MotionRange = 15,
    FilterOption = 16,
    ConfidenceThreshold = 17,
    EmitterEnabled = 18,
}

impl Rs2Option {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Rs2Option::BacklightCompensation => "backlight compensation",
            Rs2Option::Brightness => "brightness",
            Rs2Option::Contrast => "contrast",
            Rs2Option::Exposure => "exposure",
            Rs2Option::Gain => "gain",
            Rs2Option::Gamma => "gamma",
            Rs2Option::Hue => "hue",
            Rs2Option::Saturation => "saturation",
            Rs2Option::Sharpness => "sharpness",
            Rs2Option::WhiteBalance => "white balance",
            Rs2Option::EnableAutoExposure => "auto exposure",
            Rs2Option::EnableAutoWhiteBalance => "auto white balance",
            Rs2Option::VisualPreset => "visual preset",
            Rs2Option::LaserPower => "laser power",
            Rs2Option::Accuracy => "accuracy",
            Rs2Option::MotionRange => "motion range",
            Rs2Option::FilterOption => "filter option",
            Rs2Option::ConfidenceThreshold => "confidence threshold",
            Rs2Option::EmitterEnabled => "emitter",
        }
    }
}

impl fmt::Display for Rs2Option {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Valid range of a sensor option (`rs2::option_range`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

/// Named option access on a sensor.
///
/// Implemented by [`crate::sensor::Sensor`]; the preset and tuning logic only
/// depends on this trait.
pub trait OptionControl {
    fn name(&self) -> String;
    /// A failed query is an error, not "unsupported".
    fn supports(&self, option: Rs2Option) -> Result<bool>;
    fn get(&self, option: Rs2Option) -> Result<f32>;
    fn set(&self, option: Rs2Option, value: f32) -> Result<()>;
    fn range(&self, option: Rs2Option) -> Result<OptionRange>;
    fn value_description(&self, option: Rs2Option, value: f32) -> Result<String>;
}

/// Sensors that weight auto-exposure by a region of interest.
pub trait RoiControl {
    fn set_region_of_interest(&self, roi: RegionOfInterest) -> Result<()>;
    fn region_of_interest(&self) -> Result<RegionOfInterest>;
}

/// First sensor in `sensors` for which `pred` holds. Stops at the first failing query.
pub fn find_sensor<S, F>(sensors: &[S], mut pred: F) -> Result<Option<&S>>
where
    F: FnMut(&S) -> Result<bool>,
{
    for sensor in sensors {
        if pred(sensor)? {
            return Ok(Some(sensor));
        }
    }
    Ok(None)
}

/// First sensor in `sensors` supporting `option`.
pub fn first_supporting<S: OptionControl>(sensors: &[S], option: Rs2Option) -> Result<Option<&S>> {
    find_sensor(sensors, |s| s.supports(option))
}

/// Every sensor in `sensors` supporting `option`, in order.
pub fn all_supporting<S: OptionControl>(sensors: &[S], option: Rs2Option) -> Result<Vec<&S>> {
    let mut found = Vec::new();
    for sensor in sensors {
        if sensor.supports(option)? {
            found.push(sensor);
        }
    }
    Ok(found)
}
