//! Trailing frame-time average.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

/// Number of recent frame durations kept for the average.
pub const WINDOW_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameStats {
    pub frame_number: u64,
    /// Duration of this frame, clamped to at least 1 ms.
    pub frame_ms: u64,
    pub average_ms: f64,
    pub fps: f64,
}

#[derive(Debug, Clone)]
pub struct FrameRateMeter {
    window: VecDeque<u64>,
    capacity: usize,
    sum_ms: u64,
    frames: u64,
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRateMeter {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
            sum_ms: 0,
            frames: 0,
        }
    }

    pub fn record(&mut self, duration: Duration) -> FrameStats {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.record_ms(ms)
    }

    pub fn record_ms(&mut self, ms: u64) -> FrameStats {
        let ms = ms.max(1);

        self.window.push_back(ms);
        self.sum_ms = self.sum_ms.saturating_add(ms);
        if self.window.len() > self.capacity {
            if let Some(oldest) = self.window.pop_front() {
                self.sum_ms -= oldest;
            }
        }
        self.frames += 1;

        // Window is non-empty here and every entry is >= 1 ms.
        let average_ms = self.sum_ms as f64 / self.window.len() as f64;
        FrameStats {
            frame_number: self.frames,
            frame_ms: ms,
            average_ms,
            fps: 1000.0 / average_ms,
        }
    }

    pub fn average_ms(&self) -> Option<f64> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.sum_ms as f64 / self.window.len() as f64)
        }
    }

    pub fn fps(&self) -> Option<f64> {
        self.average_ms().map(|avg| 1000.0 / avg)
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
