//! In-memory sensor and frame source used to exercise the harness without hardware.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use realsense_smoke::{
    Error, FrameBuffers, FrameData, FrameSource, FrameView, Ingested, OptionControl, OptionRange,
    RegionOfInterest, Result, RoiControl, Rs2Error, Rs2Option, ingest_frames,
};

pub struct MockSensor {
    pub name: String,
    pub values: RefCell<HashMap<Rs2Option, f32>>,
    pub ranges: HashMap<Rs2Option, OptionRange>,
    /// Visual preset descriptions, indexed by preset value.
    pub presets: Vec<&'static str>,
    /// Number of upcoming `set` / ROI calls that fail with a busy-device SDK error.
    pub busy_failures: Cell<u32>,
    /// Value reported by `get(LaserPower)` regardless of what was set.
    pub sticky_laser_power: Option<f32>,
    pub set_calls: RefCell<Vec<(Rs2Option, f32)>>,
    pub roi: RefCell<Option<RegionOfInterest>>,
    pub roi_calls: Cell<u32>,
    /// When set, every capability query fails with an SDK error.
    pub broken_queries: bool,
}

impl MockSensor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: RefCell::new(HashMap::new()),
            ranges: HashMap::new(),
            presets: Vec::new(),
            busy_failures: Cell::new(0),
            sticky_laser_power: None,
            set_calls: RefCell::new(Vec::new()),
            roi: RefCell::new(None),
            roi_calls: Cell::new(0),
            broken_queries: false,
        }
    }

    /// Depth sensor exposing visual presets, emitter and laser power like a D415.
    pub fn depth(presets: &[&'static str], current: usize) -> Self {
        let mut sensor = Self::new("Stereo Module");
        sensor.presets = presets.to_vec();
        sensor.with_option(
            Rs2Option::VisualPreset,
            current as f32,
            OptionRange { min: 0.0, max: presets.len() as f32, step: 1.0, default: 0.0 },
        )
        .with_option(
            Rs2Option::EmitterEnabled,
            0.0,
            OptionRange { min: 0.0, max: 2.0, step: 1.0, default: 1.0 },
        )
        .with_option(
            Rs2Option::LaserPower,
            150.0,
            OptionRange { min: 0.0, max: 360.0, step: 30.0, default: 150.0 },
        )
        .with_option(
            Rs2Option::EnableAutoExposure,
            1.0,
            OptionRange { min: 0.0, max: 1.0, step: 1.0, default: 1.0 },
        )
    }

    pub fn with_option(mut self, option: Rs2Option, value: f32, range: OptionRange) -> Self {
        self.values.get_mut().insert(option, value);
        self.ranges.insert(option, range);
        self
    }

    pub fn value(&self, option: Rs2Option) -> Option<f32> {
        self.values.borrow().get(&option).copied()
    }

    fn busy(&self) -> Option<Error> {
        let left = self.busy_failures.get();
        if left == 0 {
            return None;
        }
        self.busy_failures.set(left - 1);
        Some(Error::Device(
            Rs2Error::new("mock", "Device or resource busy").with_call("rs2_set_option", "option:x"),
        ))
    }

    fn unsupported(&self, option: Rs2Option) -> Error {
        Error::Device(Rs2Error::new("mock", format!("{option} not supported")))
    }
}

impl OptionControl for MockSensor {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports(&self, option: Rs2Option) -> Result<bool> {
        if self.broken_queries {
            return Err(Error::Device(
                Rs2Error::new("mock", "failed to communicate with device")
                    .with_call("rs2_supports_option", "option:x"),
            ));
        }
        Ok(self.ranges.contains_key(&option))
    }

    fn get(&self, option: Rs2Option) -> Result<f32> {
        if option == Rs2Option::LaserPower {
            if let Some(v) = self.sticky_laser_power {
                return Ok(v);
            }
        }
        self.value(option).ok_or_else(|| self.unsupported(option))
    }

    fn set(&self, option: Rs2Option, value: f32) -> Result<()> {
        if !self.ranges.contains_key(&option) {
            return Err(self.unsupported(option));
        }
        self.set_calls.borrow_mut().push((option, value));
        if let Some(err) = self.busy() {
            return Err(err);
        }
        self.values.borrow_mut().insert(option, value);
        Ok(())
    }

    fn range(&self, option: Rs2Option) -> Result<OptionRange> {
        self.ranges.get(&option).copied().ok_or_else(|| self.unsupported(option))
    }

    fn value_description(&self, option: Rs2Option, value: f32) -> Result<String> {
        if option != Rs2Option::VisualPreset {
            return Ok(format!("{value}"));
        }
        self.presets
            .get(value as usize)
            .map(|s| s.to_string())
            .ok_or_else(|| self.unsupported(option))
    }
}

impl RoiControl for MockSensor {
    fn set_region_of_interest(&self, roi: RegionOfInterest) -> Result<()> {
        self.roi_calls.set(self.roi_calls.get() + 1);
        if let Some(err) = self.busy() {
            return Err(err);
        }
        *self.roi.borrow_mut() = Some(roi);
        Ok(())
    }

    fn region_of_interest(&self) -> Result<RegionOfInterest> {
        (*self.roi.borrow())
            .ok_or_else(|| Error::Device(Rs2Error::new("mock", "no ROI set")))
    }
}

/// What [`ScriptedSource`] delivers on one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Complete,
    DepthOnly,
    Timeout,
}

/// Frame source replaying a fixed script. Runs out into timeouts.
///
/// Every sample of wait `n` holds the value `n`.
pub struct ScriptedSource {
    script: RefCell<VecDeque<Delivery>>,
    pub waits: Cell<u32>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Delivery>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
            waits: Cell::new(0),
        }
    }

    pub fn complete(count: usize) -> Self {
        Self::new(std::iter::repeat_n(Delivery::Complete, count))
    }
}

impl FrameSource for ScriptedSource {
    fn next_frameset(&self, _timeout: Duration, buffers: &mut FrameBuffers) -> Result<Ingested> {
        let wait = self.waits.get() + 1;
        self.waits.set(wait);
        let step = self.script.borrow_mut().pop_front().unwrap_or(Delivery::Timeout);

        let profile = *buffers.profile();
        let depth = vec![wait as u16; profile.depth_samples()];
        let color = vec![wait as u8; profile.color_bytes()];
        let depth_view = FrameView {
            width: profile.depth.width,
            height: profile.depth.height,
            data: FrameData::Depth(&depth),
        };
        let color_view = FrameView {
            width: profile.color.width,
            height: profile.color.height,
            data: FrameData::Color(&color),
        };

        match step {
            Delivery::Complete => ingest_frames(buffers, [depth_view, color_view]),
            Delivery::DepthOnly => ingest_frames(buffers, [depth_view]),
            Delivery::Timeout => Err(Error::Device(Rs2Error::new(
                "failed waiting for frames",
                "Frame didn't arrive within 3000",
            ))),
        }
    }
}
