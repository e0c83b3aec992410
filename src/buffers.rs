//! Preallocated color and depth buffers, overwritten in place every frame.

use ndarray::{Array2, Array3};
use tracing::info;

use crate::common::{StreamKind, StreamProfile};
use crate::error::{Error, Result};

pub struct FrameBuffers {
    profile: StreamProfile,
    /// `height x width x 3` RGB8.
    color: Array3<u8>,
    /// `height x width` Z16.
    depth: Array2<u16>,
}

impl FrameBuffers {
    pub fn new(profile: StreamProfile) -> Self {
        let color = Array3::zeros((
            profile.color.height as usize,
            profile.color.width as usize,
            StreamProfile::COLOR_FORMAT.bytes_per_pixel(),
        ));
        let depth = Array2::zeros((profile.depth.height as usize, profile.depth.width as usize));
        info!(
            "Allocated memory: colorbuffer ({} bytes), depthbuffer ({} samples)",
            profile.color_bytes(),
            profile.depth_samples()
        );
        Self { profile, color, depth }
    }

    pub fn profile(&self) -> &StreamProfile {
        &self.profile
    }

    pub fn color(&self) -> &Array3<u8> {
        &self.color
    }

    pub fn depth(&self) -> &Array2<u16> {
        &self.depth
    }

    pub fn copy_depth(&mut self, width: u32, height: u32, samples: &[u16]) -> Result<()> {
        if !self.profile.depth.matches(width, height) {
            return Err(Error::UnexpectedResolution {
                stream: StreamKind::Depth,
                width,
                height,
            });
        }
        let expected = self.profile.depth_samples();
        if samples.len() != expected {
            return Err(Error::FrameSize {
                stream: StreamKind::Depth,
                expected,
                actual: samples.len(),
            });
        }
        let dst = self
            .depth
            .as_slice_mut()
            .ok_or_else(|| Error::Other("depth buffer is not contiguous".to_string()))?;
        dst.copy_from_slice(samples);
        Ok(())
    }

    pub fn copy_color(&mut self, width: u32, height: u32, bytes: &[u8]) -> Result<()> {
        if !self.profile.color.matches(width, height) {
            return Err(Error::UnexpectedResolution {
                stream: StreamKind::Color,
                width,
                height,
            });
        }
        let expected = self.profile.color_bytes();
        if bytes.len() != expected {
            return Err(Error::FrameSize {
                stream: StreamKind::Color,
                expected,
                actual: bytes.len(),
            });
        }
        let dst = self
            .color
            .as_slice_mut()
            .ok_or_else(|| Error::Other("color buffer is not contiguous".to_string()))?;
        dst.copy_from_slice(bytes);
        Ok(())
    }
}

impl Drop for FrameBuffers {
    fn drop(&mut self) {
        info!("freeing memory: colorbuffer ({} bytes)", self.color.len());
        info!("freeing memory: depthbuffer ({} samples)", self.depth.len());
    }
}
