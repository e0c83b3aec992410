//! Frames returned by [`crate::pipeline::ActivePipeline::wait_for_frames`].

use autocxx::c_int;
use realsense_smoke_sys::{RsFrame, RsFrameSet, realsense};

use crate::capture::{FrameData, FrameView, z16_samples};
use crate::error::{Result, clear_error_flag, last_error, take_error_if_any};

pub struct FrameSet {
    handle: RsFrameSet,
}

unsafe impl Send for FrameSet {}

impl Drop for FrameSet {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_frameset_delete(self.handle) };
        }
    }
}

impl FrameSet {
    pub(crate) fn from_handle(handle: RsFrameSet) -> Self {
        Self { handle }
    }

    pub fn len(&self) -> Result<usize> {
        clear_error_flag();
        let n: i32 = unsafe { realsense::rsw_frameset_size(self.handle) }.into();
        if let Some(err) = take_error_if_any("failed to read frameset size") {
            return Err(err);
        }
        Ok(n.max(0) as usize)
    }

    pub fn frame(&self, index: usize) -> Result<Frame> {
        clear_error_flag();
        let h = unsafe { realsense::rsw_frameset_get_frame(self.handle, c_int(index as i32)) };
        if h.is_null() {
            return Err(last_error("failed to get frame from frameset"));
        }
        Ok(Frame { handle: h })
    }

    pub fn frames(&self) -> Result<Vec<Frame>> {
        (0..self.len()?).map(|i| self.frame(i)).collect()
    }
}

pub struct Frame {
    handle: RsFrame,
}

unsafe impl Send for Frame {}

impl Drop for Frame {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_frame_delete(self.handle) };
        }
    }
}

impl Frame {
    pub fn is_depth(&self) -> bool {
        unsafe { realsense::rsw_frame_is_depth(self.handle) }
    }

    pub fn is_video(&self) -> bool {
        unsafe { realsense::rsw_frame_is_video(self.handle) }
    }

    pub fn width(&self) -> Result<u32> {
        self.read_dimension("width", |h| unsafe { realsense::rsw_frame_get_width(h) })
    }

    pub fn height(&self) -> Result<u32> {
        self.read_dimension("height", |h| unsafe { realsense::rsw_frame_get_height(h) })
    }

    fn read_dimension(&self, what: &str, read: impl Fn(RsFrame) -> c_int) -> Result<u32> {
        clear_error_flag();
        let v: i32 = read(self.handle).into();
        if let Some(err) = take_error_if_any(&format!("failed to read frame {what}")) {
            return Err(err);
        }
        Ok(v.max(0) as u32)
    }

    /// Raw frame bytes, valid as long as the frame is alive.
    pub fn bytes(&self) -> Result<&[u8]> {
        clear_error_flag();
        let ptr = unsafe { realsense::rsw_frame_get_data(self.handle) };
        let size: i32 = unsafe { realsense::rsw_frame_get_data_size(self.handle) }.into();
        if ptr.is_null() || size < 0 {
            return Err(last_error("failed to access frame data"));
        }
        Ok(unsafe { std::slice::from_raw_parts(ptr as *const u8, size as usize) })
    }

    /// Z16 samples of a depth frame.
    pub fn depth_samples(&self) -> Result<Option<&[u16]>> {
        if !self.is_depth() {
            return Ok(None);
        }
        Ok(Some(z16_samples(self.bytes()?)?))
    }

    /// Borrowed view for [`crate::capture::ingest_frames`]. `None` for non-video frames.
    pub fn view(&self) -> Result<Option<FrameView<'_>>> {
        let data = if let Some(samples) = self.depth_samples()? {
            FrameData::Depth(samples)
        } else if self.is_video() {
            FrameData::Color(self.bytes()?)
        } else {
            return Ok(None);
        };
        Ok(Some(FrameView {
            width: self.width()?,
            height: self.height()?,
            data,
        }))
    }
}
