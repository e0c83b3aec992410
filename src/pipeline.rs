use std::ffi::CString;
use std::time::Duration;

use autocxx::c_int;
use realsense_smoke_sys::{RsConfig, RsPipeline, realsense};
use tracing::{info, warn};

use crate::buffers::FrameBuffers;
use crate::capture::{FrameSource, Ingested, ingest_frames};
use crate::common::{Format, StreamKind, StreamProfile};
use crate::context::Context;
use crate::error::{Error, Result, clear_error_flag, last_error};
use crate::frame::FrameSet;

/// Stream configuration for [`Pipeline::start`] (`rs2::config`).
pub struct Config {
    handle: RsConfig,
}

unsafe impl Send for Config {}

impl Drop for Config {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_config_delete(self.handle) };
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        clear_error_flag();
        let handle = unsafe { realsense::rsw_config_new() };
        if handle.is_null() {
            Err(last_error("failed to create config"))
        } else {
            Ok(Self { handle })
        }
    }

    /// Depth (Z16) and color (RGB8) streams of `profile` on the device `serial`.
    pub fn for_profile(serial: &str, profile: &StreamProfile) -> Result<Self> {
        let mut config = Self::new()?;
        config
            .enable_device(serial)?
            .enable_stream(
                StreamKind::Depth,
                None,
                profile.depth.width,
                profile.depth.height,
                StreamProfile::DEPTH_FORMAT,
                profile.fps,
            )?
            .enable_stream(
                StreamKind::Color,
                None,
                profile.color.width,
                profile.color.height,
                StreamProfile::COLOR_FORMAT,
                profile.fps,
            )?;
        info!("streams enabled");
        Ok(config)
    }

    pub fn enable_device(&mut self, serial: &str) -> Result<&mut Self> {
        let serial = CString::new(serial).map_err(|e| Error::Other(format!("invalid serial number: {e}")))?;
        clear_error_flag();
        let ok = unsafe { realsense::rsw_config_enable_device(self.handle, serial.as_ptr()) };
        if !ok {
            return Err(last_error("failed to select device"));
        }
        Ok(self)
    }

    /// `index` of `None` lets the SDK pick any stream of that kind.
    pub fn enable_stream(
        &mut self,
        kind: StreamKind,
        index: Option<i32>,
        width: u32,
        height: u32,
        format: Format,
        fps: u32,
    ) -> Result<&mut Self> {
        clear_error_flag();
        let ok = unsafe {
            realsense::rsw_config_enable_stream(
                self.handle,
                c_int(kind.as_raw()),
                c_int(index.unwrap_or(-1)),
                c_int(width as i32),
                c_int(height as i32),
                c_int(format.as_raw()),
                c_int(fps as i32),
            )
        };
        if !ok {
            return Err(last_error(&format!("failed to enable {kind} stream")));
        }
        Ok(self)
    }
}

/// An idle capture pipeline (`rs2::pipeline`).
pub struct Pipeline {
    handle: RsPipeline,
}

unsafe impl Send for Pipeline {}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_pipeline_delete(self.handle) };
        }
    }
}

impl Pipeline {
    pub fn new(context: &Context) -> Result<Self> {
        clear_error_flag();
        let handle = unsafe { realsense::rsw_pipeline_new(context.handle()) };
        if handle.is_null() {
            Err(last_error("failed to create pipeline"))
        } else {
            info!("Created pipeline");
            Ok(Self { handle })
        }
    }

    pub fn start(self, config: &Config) -> Result<ActivePipeline> {
        clear_error_flag();
        let ok = unsafe { realsense::rsw_pipeline_start(self.handle, config.handle) };
        if !ok {
            return Err(last_error("failed to start pipeline"));
        }
        info!("pipeline started");
        Ok(ActivePipeline {
            inner: self,
            stopped: false,
        })
    }
}

/// A streaming pipeline. Dropping it stops streaming.
pub struct ActivePipeline {
    inner: Pipeline,
    stopped: bool,
}

impl ActivePipeline {
    /// Block until the next synchronized frameset. A timeout is an error.
    pub fn wait_for_frames(&self, timeout: Duration) -> Result<FrameSet> {
        let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        clear_error_flag();
        let h = unsafe { realsense::rsw_pipeline_wait_for_frames(self.inner.handle, timeout_ms) };
        if h.is_null() {
            return Err(last_error("failed waiting for frames"));
        }
        Ok(FrameSet::from_handle(h))
    }

    pub fn stop(mut self) -> Result<()> {
        self.stopped = true;
        clear_error_flag();
        let ok = unsafe { realsense::rsw_pipeline_stop(self.inner.handle) };
        if !ok {
            return Err(last_error("failed to stop pipeline"));
        }
        info!("pipeline stopped");
        Ok(())
    }
}

impl FrameSource for ActivePipeline {
    fn next_frameset(&self, timeout: Duration, buffers: &mut FrameBuffers) -> Result<Ingested> {
        let frameset = self.wait_for_frames(timeout)?;
        let frames = frameset.frames()?;
        let mut views = Vec::with_capacity(frames.len());
        for frame in &frames {
            if let Some(view) = frame.view()? {
                views.push(view);
            }
        }
        ingest_frames(buffers, views)
    }
}

impl Drop for ActivePipeline {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }
        clear_error_flag();
        let ok = unsafe { realsense::rsw_pipeline_stop(self.inner.handle) };
        if ok {
            info!("pipeline stopped");
        } else {
            warn!("{}", last_error("failed to stop pipeline"));
        }
    }
}
