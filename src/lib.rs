pub mod app;
pub mod buffers;
pub mod capture;
pub mod common;
pub mod error;
pub mod fps;
pub mod logging;
pub mod options;
pub mod preset;
pub mod retry;
pub mod shutdown;
pub mod tuning;

#[cfg(feature = "native")]
pub mod advanced_mode;
#[cfg(feature = "native")]
pub mod context;
#[cfg(feature = "native")]
pub mod device;
#[cfg(feature = "native")]
pub mod frame;
#[cfg(feature = "native")]
pub mod pipeline;
#[cfg(feature = "native")]
pub mod sensor;

#[cfg(feature = "native")]
pub use realsense_smoke_sys as bindings;

// Re-export main types for convenience
pub use crate::buffers::FrameBuffers;
pub use crate::capture::{
    CaptureLoop, FrameData, FrameSource, FrameView, Ingested, LoopExit, ingest_frames, run_capture,
    z16_samples,
};
pub use crate::common::{
    CameraInfo, DepthControlGroup, Format, RegionOfInterest, Resolution, StreamKind, StreamProfile,
};
pub use crate::error::{Error, Result, Rs2Error};
pub use crate::fps::{FrameRateMeter, FrameStats};
pub use crate::options::{OptionControl, OptionRange, RoiControl, Rs2Option};
pub use crate::retry::{RetryPolicy, retry, retry_with};
pub use crate::shutdown::ShutdownFlag;

#[cfg(feature = "native")]
pub use crate::{
    advanced_mode::AdvancedMode,
    context::Context,
    device::Device,
    frame::{Frame, FrameSet},
    pipeline::{ActivePipeline, Config, Pipeline},
    sensor::Sensor,
};
