//! Streams depth and color after loading an advanced-mode JSON preset, moving
//! the depth auto-exposure region of interest back and forth while streaming.

use std::process::ExitCode;

use anyhow::{Context as _, anyhow};
use realsense_smoke::app::run_main;
use realsense_smoke::options::find_sensor;
use realsense_smoke::preset::load_json_preset;
use realsense_smoke::tuning::{PeriodicToggle, set_auto_exposure, set_auto_exposure_roi};
use realsense_smoke::{
    Config, Context, FrameBuffers, Pipeline, RegionOfInterest, Resolution, RetryPolicy,
    ShutdownFlag, StreamProfile, run_capture,
};

const PROFILE: StreamProfile =
    StreamProfile::new(Resolution::new(848, 480), Resolution::new(1280, 720), 30);

const PRESET_JSON: &str = include_str!("../../presets/high_accuracy.json");

const ROI_TOGGLE_EVERY: u64 = 100;

fn main() -> ExitCode {
    run_main(run)
}

fn run() -> anyhow::Result<()> {
    let shutdown = ShutdownFlag::install()?;

    let buffers = FrameBuffers::new(PROFILE);

    let context = Context::new()?;
    let pipeline = Pipeline::new(&context)?;

    let device = context.open_single_device()?;
    let serial = device.serial_number()?;
    let sensors = device.sensors()?;

    let advanced = device.advanced_mode();
    advanced.ensure_enabled()?;
    load_json_preset(&advanced, PRESET_JSON).context("loading JSON preset")?;

    let depth_sensor = find_sensor(&sensors, |s| Ok(s.is_depth_sensor()? && s.is_roi_sensor()?))?
        .ok_or_else(|| anyhow!("Did not find a depth sensor with region of interest support"))?;

    let config = Config::for_profile(&serial, &PROFILE)?;
    let pipeline = pipeline.start(&config)?;

    let policy = RetryPolicy::default();
    set_auto_exposure(depth_sensor, true, &policy)?;

    let full = RegionOfInterest::full_frame(PROFILE.depth);
    let center = RegionOfInterest::center_quarter(PROFILE.depth);
    set_auto_exposure_roi(depth_sensor, full, &policy)?;

    // `true` while the ROI is the center quarter.
    let mut roi_toggle = PeriodicToggle::new(ROI_TOGGLE_EVERY, false);

    run_capture(&pipeline, buffers, shutdown, |frame| {
        if let Some(centered) = roi_toggle.tick(frame) {
            let roi = if centered { center } else { full };
            set_auto_exposure_roi(depth_sensor, roi, &policy)?;
        }
        Ok(())
    })?;

    pipeline.stop()?;
    Ok(())
}
