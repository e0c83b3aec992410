//! Streams VGA depth and color with the "High Density" preset, switching the
//! emitter and depth auto-exposure on and off while streaming.

use std::process::ExitCode;

use anyhow::{Context as _, anyhow};
use realsense_smoke::app::run_main;
use realsense_smoke::options::{find_sensor, first_supporting};
use realsense_smoke::preset::{KNOWN_PRESETS, apply_named_preset};
use realsense_smoke::tuning::{PeriodicToggle, set_auto_exposure, set_emitter};
use realsense_smoke::{
    Config, Context, FrameBuffers, Pipeline, Resolution, RetryPolicy, Rs2Option, ShutdownFlag,
    StreamProfile, run_capture,
};

const PROFILE: StreamProfile =
    StreamProfile::new(Resolution::new(640, 480), Resolution::new(640, 480), 30);

const EMITTER_TOGGLE_EVERY: u64 = 150;
const AUTO_EXPOSURE_TOGGLE_EVERY: u64 = 300;

fn main() -> ExitCode {
    run_main(run)
}

fn run() -> anyhow::Result<()> {
    let shutdown = ShutdownFlag::install()?;
    let desired_preset = KNOWN_PRESETS[1];

    let buffers = FrameBuffers::new(PROFILE);

    let context = Context::new()?;
    let pipeline = Pipeline::new(&context)?;

    let device = context.open_single_device()?;
    let serial = device.serial_number()?;
    let sensors = device.sensors()?;

    device.advanced_mode().ensure_enabled()?;
    apply_named_preset(&sensors, desired_preset)
        .with_context(|| format!("enabling preset {desired_preset}"))?;

    let emitter_sensor = first_supporting(&sensors, Rs2Option::EmitterEnabled)?
        .ok_or_else(|| anyhow!("Did not find sensor that supports the emitter option"))?;
    let exposure_sensor = find_sensor(&sensors, |s| s.is_depth_sensor())?
        .ok_or_else(|| anyhow!("Did not find a depth sensor"))?;

    let config = Config::for_profile(&serial, &PROFILE)?;
    let pipeline = pipeline.start(&config)?;

    let policy = RetryPolicy::default();
    set_emitter(emitter_sensor, true, &policy)?;
    set_auto_exposure(exposure_sensor, true, &policy)?;

    let mut emitter = PeriodicToggle::new(EMITTER_TOGGLE_EVERY, true);
    let mut auto_exposure = PeriodicToggle::new(AUTO_EXPOSURE_TOGGLE_EVERY, true);

    run_capture(&pipeline, buffers, shutdown, |frame| {
        if let Some(on) = emitter.tick(frame) {
            set_emitter(emitter_sensor, on, &policy)?;
        }
        if let Some(on) = auto_exposure.tick(frame) {
            set_auto_exposure(exposure_sensor, on, &policy)?;
        }
        Ok(())
    })?;

    pipeline.stop()?;
    Ok(())
}
