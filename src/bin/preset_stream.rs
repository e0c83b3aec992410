//! Streams depth and color from a D400 device after enabling advanced mode and
//! a named visual preset. Useful to check that the installed librealsense SDK,
//! kernel and firmware handle advanced mode properly.
//!
//! No GUI; everything goes to the log.

use std::process::ExitCode;

use anyhow::Context as _;
use realsense_smoke::app::run_main;
use realsense_smoke::preset::{KNOWN_PRESETS, apply_named_preset};
use realsense_smoke::tuning::{apply_depth_control, enable_emitter, max_laser_power};
use realsense_smoke::{
    Config, Context, DepthControlGroup, FrameBuffers, Pipeline, Resolution, RetryPolicy,
    ShutdownFlag, StreamProfile, run_capture,
};
use tracing::warn;

const PROFILE: StreamProfile =
    StreamProfile::new(Resolution::new(1280, 720), Resolution::new(1920, 1080), 30);

const DEPTH_CONTROL: DepthControlGroup = DepthControlGroup {
    deep_sea_second_peak_threshold: 575,
    deep_sea_neighbor_threshold: 701,
    deep_sea_median_threshold: 796,
    plus_increment: 2,
    minus_decrement: 25,
    score_thresh_a: 4,
    score_thresh_b: 2893,
    lr_agree_threshold: 10,
    texture_count_threshold: 0,
    texture_difference_threshold: 1722,
};

fn main() -> ExitCode {
    run_main(run)
}

fn run() -> anyhow::Result<()> {
    let shutdown = ShutdownFlag::install()?;
    let desired_preset = KNOWN_PRESETS[0];

    let buffers = FrameBuffers::new(PROFILE);

    let context = Context::new()?;
    let pipeline = Pipeline::new(&context)?;

    let device = context.open_single_device()?;
    let serial = device.serial_number()?;
    let sensors = device.sensors()?;

    let advanced = device.advanced_mode();
    advanced.ensure_enabled()?;

    apply_named_preset(&sensors, desired_preset)
        .with_context(|| format!("enabling preset {desired_preset}"))?;

    let config = Config::for_profile(&serial, &PROFILE)?;
    let pipeline = pipeline.start(&config)?;

    let policy = RetryPolicy::default();
    if enable_emitter(&sensors, &policy)? == 0 {
        warn!("no sensor exposes an emitter");
    }
    max_laser_power(&sensors, &policy)?;
    apply_depth_control(&advanced, &DEPTH_CONTROL, &policy)?;

    run_capture(&pipeline, buffers, shutdown, |_| Ok(()))?;

    pipeline.stop()?;
    Ok(())
}
