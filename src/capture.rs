//! The blocking capture loop.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::buffers::FrameBuffers;
use crate::common::StreamKind;
use crate::error::{Error, Result};
use crate::fps::{FrameRateMeter, FrameStats};
use crate::shutdown::ShutdownFlag;

/// How long to wait for a frameset before treating the device as failed.
pub const FRAME_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy)]
pub enum FrameData<'a> {
    Depth(&'a [u16]),
    Color(&'a [u8]),
}

/// A frame borrowed from the SDK (or a test fixture), ready to be copied.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub width: u32,
    pub height: u32,
    pub data: FrameData<'a>,
}

/// Which stream types a frameset delivered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ingested {
    pub depth: bool,
    pub color: bool,
}

impl Ingested {
    pub fn is_complete(&self) -> bool {
        self.depth && self.color
    }
}

/// Why the loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    IncompleteFrameset,
}

/// Reinterpret raw Z16 frame bytes as samples without copying.
///
/// Data that is not 2-byte aligned, or holds an odd number of bytes, is rejected.
pub fn z16_samples(bytes: &[u8]) -> Result<&[u16]> {
    // Any bit pattern is a valid u16.
    let (head, samples, tail) = unsafe { bytes.align_to::<u16>() };
    if !head.is_empty() || !tail.is_empty() {
        return Err(Error::UnalignedFrame {
            stream: StreamKind::Depth,
            len: bytes.len(),
        });
    }
    Ok(samples)
}

/// Copy every frame of a frameset into `buffers`.
///
/// A frame whose resolution differs from the negotiated one is an error.
pub fn ingest_frames<'a, I>(buffers: &mut FrameBuffers, frames: I) -> Result<Ingested>
where
    I: IntoIterator<Item = FrameView<'a>>,
{
    let mut got = Ingested::default();
    for frame in frames {
        match frame.data {
            FrameData::Depth(samples) => {
                buffers.copy_depth(frame.width, frame.height, samples)?;
                got.depth = true;
            }
            FrameData::Color(bytes) => {
                buffers.copy_color(frame.width, frame.height, bytes)?;
                got.color = true;
            }
        }
    }
    Ok(got)
}

/// Something that blocks for the next frameset and copies it into the buffers.
///
/// Implemented by the SDK's `ActivePipeline`.
pub trait FrameSource {
    fn next_frameset(&self, timeout: Duration, buffers: &mut FrameBuffers) -> Result<Ingested>;
}

pub struct CaptureLoop<'p, S: FrameSource> {
    source: &'p S,
    buffers: FrameBuffers,
    meter: FrameRateMeter,
    shutdown: ShutdownFlag,
    timeout: Duration,
    frames_got: u64,
}

impl<'p, S: FrameSource> CaptureLoop<'p, S> {
    pub fn new(source: &'p S, buffers: FrameBuffers, shutdown: ShutdownFlag) -> Self {
        Self {
            source,
            buffers,
            meter: FrameRateMeter::new(),
            shutdown,
            timeout: FRAME_TIMEOUT,
            frames_got: 0,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    pub fn frames_got(&self) -> u64 {
        self.frames_got
    }

    /// Pull framesets until shutdown is requested or a frameset lacks a stream.
    ///
    /// `on_frame` runs after every complete frameset with the frame count and is
    /// where each program applies its runtime option toggles.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<LoopExit>
    where
        F: FnMut(u64) -> Result<()>,
    {
        info!("entering main loop");
        let exit = loop {
            let started = Instant::now();

            if self.shutdown.is_requested() {
                break LoopExit::Shutdown;
            }

            let got = self.source.next_frameset(self.timeout, &mut self.buffers)?;
            if !got.is_complete() {
                warn!("Did not get all frame types");
                break LoopExit::IncompleteFrameset;
            }

            self.frames_got += 1;
            on_frame(self.frames_got)?;

            let stats = self.meter.record(started.elapsed());
            log_stats(self.frames_got, &stats);
        };
        info!("exited main loop");
        Ok(exit)
    }
}

fn log_stats(frame: u64, stats: &FrameStats) {
    info!(
        "Finished frame {frame} in {} milliseconds ({:.0} fps)",
        stats.frame_ms, stats.fps
    );
}

/// Run a [`CaptureLoop`] over `source` until it ends and log why it ended.
///
/// Returns the number of complete framesets received.
pub fn run_capture<S, F>(
    source: &S,
    buffers: FrameBuffers,
    shutdown: ShutdownFlag,
    on_frame: F,
) -> Result<u64>
where
    S: FrameSource,
    F: FnMut(u64) -> Result<()>,
{
    let mut capture = CaptureLoop::new(source, buffers, shutdown);
    let exit = capture.run(on_frame)?;
    let frames = capture.frames_got();
    match exit {
        LoopExit::Shutdown => info!("shutdown requested after {frames} frames"),
        LoopExit::IncompleteFrameset => warn!("stopping after {frames} frames"),
    }
    Ok(frames)
}
