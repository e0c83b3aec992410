#![cfg(feature = "hit")]
//! Hardware-in-the-loop tests. They need exactly one D400 camera on USB and are
//! only compiled with the "hit" feature.

#[cfg(test)]
mod hardware_integration_tests {
    use std::time::Duration;

    use realsense_smoke::preset::{KNOWN_PRESETS, apply_named_preset};
    use realsense_smoke::tuning::{enable_emitter, set_auto_exposure_roi};
    use realsense_smoke::{
        CaptureLoop, Config, Context, FrameBuffers, LoopExit, OptionControl, Pipeline,
        RegionOfInterest, Resolution, RetryPolicy, RoiControl, Rs2Option, ShutdownFlag,
        StreamProfile,
    };

    const PROFILE: StreamProfile =
        StreamProfile::new(Resolution::new(640, 480), Resolution::new(640, 480), 30);

    #[test]
    fn test_single_device_is_found() {
        let context = Context::new().expect("Failed to create context");
        let device = context
            .open_single_device()
            .expect("Expecting exactly one camera connected");

        let serial = device.serial_number().expect("Device has no serial number");
        assert!(!serial.is_empty(), "serial number should not be empty");
        assert!(device.sensor_count().expect("sensor count") > 0);
    }

    #[test]
    fn test_advanced_mode_and_preset() {
        let context = Context::new().expect("Failed to create context");
        let device = context.open_single_device().expect("open device");

        let advanced = device.advanced_mode();
        assert!(advanced.is_supported().expect("advanced mode query"));
        advanced.ensure_enabled().expect("enable advanced mode");
        assert!(advanced.is_enabled().expect("advanced mode query"));

        let sensors = device.sensors().expect("sensors");
        apply_named_preset(&sensors, KNOWN_PRESETS[0]).expect("apply preset");

        let sensor = sensors
            .iter()
            .find(|s| s.supports(Rs2Option::VisualPreset).expect("query option support"))
            .expect("preset sensor");
        let value = sensor.get(Rs2Option::VisualPreset).expect("read preset");
        let desc = sensor
            .value_description(Rs2Option::VisualPreset, value)
            .expect("describe preset");
        assert!(desc.starts_with(KNOWN_PRESETS[0]), "active preset is {desc}");
    }

    #[test]
    fn test_stream_and_toggle_roi() {
        let context = Context::new().expect("Failed to create context");
        let pipeline = Pipeline::new(&context).expect("pipeline");
        let device = context.open_single_device().expect("open device");
        let serial = device.serial_number().expect("serial");
        let sensors = device.sensors().expect("sensors");

        let policy = RetryPolicy::default();
        enable_emitter(&sensors, &policy).expect("enable emitter");

        let config = Config::for_profile(&serial, &PROFILE).expect("config");
        let pipeline = pipeline.start(&config).expect("start pipeline");

        let depth = sensors
            .iter()
            .find(|s| {
                s.is_depth_sensor().expect("query sensor kind")
                    && s.is_roi_sensor().expect("query ROI support")
            })
            .expect("depth sensor with ROI");
        let center = RegionOfInterest::center_quarter(PROFILE.depth);
        set_auto_exposure_roi(depth, center, &policy).expect("set ROI");
        assert_eq!(depth.region_of_interest().expect("read ROI"), center);

        let shutdown = ShutdownFlag::new();
        let stopper = shutdown.clone();
        let mut capture = CaptureLoop::new(&pipeline, FrameBuffers::new(PROFILE), shutdown)
            .with_timeout(Duration::from_secs(5));
        let exit = capture
            .run(|frame| {
                if frame >= 30 {
                    stopper.request();
                }
                Ok(())
            })
            .expect("capture loop");

        assert_eq!(exit, LoopExit::Shutdown);
        assert_eq!(capture.frames_got(), 30);
        assert!(capture.buffers().depth().iter().any(|&d| d != 0), "depth should not be all zero");
        drop(capture);

        pipeline.stop().expect("stop pipeline");
    }
}
