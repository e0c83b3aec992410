//! Option writes with retry, plus the periodic toggles driven from the capture loop.

use tracing::info;

use crate::common::{DepthControlGroup, RegionOfInterest};
use crate::error::{Error, Result};
use crate::options::{OptionControl, RoiControl, Rs2Option, all_supporting};
use crate::retry::{RetryPolicy, retry_with};

pub fn set_option_with_retry<S: OptionControl>(
    sensor: &S,
    option: Rs2Option,
    value: f32,
    policy: &RetryPolicy,
) -> Result<()> {
    retry_with(policy, &format!("setting {option}"), || sensor.set(option, value))
}

/// Turn the emitter on for every sensor that has one. Returns how many were set.
pub fn enable_emitter<S: OptionControl>(sensors: &[S], policy: &RetryPolicy) -> Result<usize> {
    let mut count = 0;
    for sensor in all_supporting(sensors, Rs2Option::EmitterEnabled)? {
        set_option_with_retry(sensor, Rs2Option::EmitterEnabled, 1.0, policy)?;
        info!("emitter enabled");
        count += 1;
    }
    Ok(count)
}

/// Set laser power to its range maximum and read it back.
///
/// A read-back mismatch is a [`Error::Verification`] and is not retried.
pub fn max_laser_power<S: OptionControl>(sensors: &[S], policy: &RetryPolicy) -> Result<usize> {
    let mut count = 0;
    for sensor in all_supporting(sensors, Rs2Option::LaserPower)? {
        retry_with(policy, "setting laser power", || {
            let range = sensor.range(Rs2Option::LaserPower)?;
            sensor.set(Rs2Option::LaserPower, range.max)?;
            let now = sensor.get(Rs2Option::LaserPower)?;
            if now != range.max {
                return Err(Error::Verification(format!(
                    "Failed setting max laser power: wanted {}, device reports {now}",
                    range.max
                )));
            }
            Ok(())
        })?;
        info!("set laser power");
        count += 1;
    }
    Ok(count)
}

pub fn set_emitter<S: OptionControl>(sensor: &S, on: bool, policy: &RetryPolicy) -> Result<()> {
    set_option_with_retry(sensor, Rs2Option::EmitterEnabled, on_off(on), policy)?;
    info!("emitter {}", if on { "enabled" } else { "disabled" });
    Ok(())
}

pub fn set_auto_exposure<S: OptionControl>(sensor: &S, on: bool, policy: &RetryPolicy) -> Result<()> {
    set_option_with_retry(sensor, Rs2Option::EnableAutoExposure, on_off(on), policy)?;
    info!("auto exposure {}", if on { "enabled" } else { "disabled" });
    Ok(())
}

pub fn set_auto_exposure_roi<S: RoiControl>(
    sensor: &S,
    roi: RegionOfInterest,
    policy: &RetryPolicy,
) -> Result<()> {
    retry_with(policy, "setting auto exposure ROI", || sensor.set_region_of_interest(roi))?;
    info!(
        "auto exposure ROI set to ({}, {})-({}, {})",
        roi.min_x, roi.min_y, roi.max_x, roi.max_y
    );
    Ok(())
}

#[cfg(feature = "native")]
pub fn apply_depth_control(
    advanced: &crate::advanced_mode::AdvancedMode<'_>,
    group: &DepthControlGroup,
    policy: &RetryPolicy,
) -> Result<()> {
    retry_with(policy, "setting depth control", || advanced.set_depth_control(group))?;
    verify_depth_control(group, &advanced.depth_control()?)?;
    info!("depth control applied");
    Ok(())
}

/// Compare a depth control group read back from the device with the one written.
pub fn verify_depth_control(wanted: &DepthControlGroup, actual: &DepthControlGroup) -> Result<()> {
    if wanted == actual {
        return Ok(());
    }
    let wanted = wanted.to_values();
    let actual = actual.to_values();
    let field = wanted.iter().zip(actual.iter()).position(|(w, a)| w != a).unwrap_or(0);
    Err(Error::Verification(format!(
        "Failed setting depth control: field {field} wanted {}, device reports {}",
        wanted[field], actual[field]
    )))
}

fn on_off(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

/// Boolean that flips every `every` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicToggle {
    every: u64,
    state: bool,
}

impl PeriodicToggle {
    pub fn new(every: u64, initial: bool) -> Self {
        Self { every, state: initial }
    }

    /// Returns the new state when `frame_number` is a positive multiple of the period.
    pub fn tick(&mut self, frame_number: u64) -> Option<bool> {
        if self.every == 0 || frame_number == 0 || frame_number % self.every != 0 {
            return None;
        }
        self.state = !self.state;
        Some(self.state)
    }

    pub fn state(&self) -> bool {
        self.state
    }

    pub fn every(&self) -> u64 {
        self.every
    }
}
