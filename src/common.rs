use std::fmt;

use serde::{Deserialize, Serialize};

/// Device information fields.
///
/// Values match `rs2_camera_info`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraInfo {
    Name = 0,
    SerialNumber = 1,
    FirmwareVersion = 2,
    RecommendedFirmwareVersion = 3,
    PhysicalPort = 4,
    DebugOpCode = 5,
    AdvancedMode = 6,
    ProductId = 7,
    CameraLocked = 8,
    UsbTypeDescriptor = 9,
    ProductLine = 10,
}

impl CameraInfo {
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Stream types. Values match `rs2_stream`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    Any = 0,
    Depth = 1,
    Color = 2,
    Infrared = 3,
}

impl StreamKind {
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamKind::Any => "any",
            StreamKind::Depth => "depth",
            StreamKind::Color => "color",
            StreamKind::Infrared => "infrared",
        };
        f.write_str(name)
    }
}

/// Pixel formats. Values match `rs2_format`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Any = 0,
    Z16 = 1,
    Rgb8 = 5,
    Bgr8 = 6,
    Rgba8 = 7,
    Bgra8 = 8,
    Y8 = 9,
}

impl Format {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Format::Any => 0,
            Format::Y8 => 1,
            Format::Z16 => 2,
            Format::Rgb8 | Format::Bgr8 => 3,
            Format::Rgba8 | Format::Bgra8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The negotiated depth (Z16) and color (RGB8) stream setup of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamProfile {
    pub depth: Resolution,
    pub color: Resolution,
    pub fps: u32,
}

impl StreamProfile {
    pub const DEPTH_FORMAT: Format = Format::Z16;
    pub const COLOR_FORMAT: Format = Format::Rgb8;

    pub const fn new(depth: Resolution, color: Resolution, fps: u32) -> Self {
        Self { depth, color, fps }
    }

    pub fn color_bytes(&self) -> usize {
        self.color.pixels() * Self::COLOR_FORMAT.bytes_per_pixel()
    }

    pub fn depth_samples(&self) -> usize {
        self.depth.pixels()
    }
}

/// Sub-rectangle of the depth image weighting auto-exposure, in pixels (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl RegionOfInterest {
    pub fn full_frame(resolution: Resolution) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: resolution.width as i32 - 1,
            max_y: resolution.height as i32 - 1,
        }
    }

    /// Centered rectangle covering half the width and half the height.
    pub fn center_quarter(resolution: Resolution) -> Self {
        let w = resolution.width as i32;
        let h = resolution.height as i32;
        Self {
            min_x: w / 4,
            min_y: h / 4,
            max_x: w * 3 / 4 - 1,
            max_y: h * 3 / 4 - 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

/// Advanced-mode depth control thresholds (`STDepthControlGroup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepthControlGroup {
    pub deep_sea_second_peak_threshold: u32,
    pub deep_sea_neighbor_threshold: u32,
    pub deep_sea_median_threshold: u32,
    pub plus_increment: u32,
    pub minus_decrement: u32,
    pub score_thresh_a: u32,
    pub score_thresh_b: u32,
    pub lr_agree_threshold: u32,
    pub texture_count_threshold: u32,
    pub texture_difference_threshold: u32,
}

impl DepthControlGroup {
    pub const FIELD_COUNT: usize = 10;

    /// Field values in `STDepthControlGroup` declaration order.
    pub fn to_values(&self) -> [u32; Self::FIELD_COUNT] {
        [
            self.deep_sea_second_peak_threshold,
            self.deep_sea_neighbor_threshold,
            self.deep_sea_median_threshold,
            self.plus_increment,
            self.minus_decrement,
            self.score_thresh_a,
            self.score_thresh_b,
            self.lr_agree_threshold,
            self.texture_count_threshold,
            self.texture_difference_threshold,
        ]
    }

    pub fn from_values(v: [u32; Self::FIELD_COUNT]) -> Self {
        Self {
            deep_sea_second_peak_threshold: v[0],
            deep_sea_neighbor_threshold: v[1],
            deep_sea_median_threshold: v[2],
            plus_increment: v[3],
            minus_decrement: v[4],
            score_thresh_a: v[5],
            score_thresh_b: v[6],
            lr_agree_threshold: v[7],
            texture_count_threshold: v[8],
            texture_difference_threshold: v[9],
        }
    }
}
