//! Error handling for the RealSense smoke harness

use std::fmt;

use thiserror::Error;

use crate::common::StreamKind;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised by librealsense2 (`rs2::error`) and captured by the shim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rs2Error {
    /// What the harness was doing when the SDK failed.
    pub context: String,
    pub message: String,
    /// SDK function that failed, when the SDK reported one.
    pub function: Option<String>,
    pub args: Option<String>,
}

impl Rs2Error {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
            function: None,
            args: None,
        }
    }

    pub fn with_call(mut self, function: impl Into<String>, args: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self.args = Some(args.into());
        self
    }
}

impl fmt::Display for Rs2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(function) if !function.is_empty() => write!(
                f,
                "{}: RealSense error calling {}({}): {}",
                self.context,
                function,
                self.args.as_deref().unwrap_or(""),
                self.message
            ),
            _ => write!(f, "{}: {}", self.context, self.message),
        }
    }
}

impl std::error::Error for Rs2Error {}

/// Errors that can occur while driving the device
#[derive(Debug, Error)]
pub enum Error {
    /// The SDK rejected a call. These are the only errors worth retrying.
    #[error(transparent)]
    Device(#[from] Rs2Error),
    /// The shim caught a non-SDK exception.
    #[error("{context}: {message}")]
    Native { context: String, message: String },
    #[error("Expecting to find one device connected to the computer, found {0}")]
    DeviceCount(usize),
    #[error("Invalid {stream} frame resolution: {width}, {height}")]
    UnexpectedResolution {
        stream: StreamKind,
        width: u32,
        height: u32,
    },
    #[error("{stream} frame holds {actual} samples, expected {expected}")]
    FrameSize {
        stream: StreamKind,
        expected: usize,
        actual: usize,
    },
    #[error("{stream} frame data of {len} bytes is not an aligned buffer of whole samples")]
    UnalignedFrame { stream: StreamKind, len: usize },
    #[error("Missing capability: {0}")]
    MissingCapability(String),
    #[error("Verification failed: {0}")]
    Verification(String),
    #[error("Failed {operation} after {attempts} attempts")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },
    #[error("Invalid JSON preset: {0}")]
    InvalidPreset(#[from] serde_json::Error),
    #[error("Invalid preset: {0}")]
    PresetFormat(String),
    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether retrying the same call may succeed ("device busy" and friends).
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Device(_))
    }
}

#[cfg(feature = "native")]
pub(crate) use native::{clear_error_flag, last_error, take_error_if_any, take_owned_string};

#[cfg(feature = "native")]
mod native {
    use std::ffi::{CStr, c_char};

    use realsense_smoke_sys::realsense;

    use super::{Error, Result, Rs2Error};

    fn read_cstr(ptr: *const c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    pub(crate) fn clear_error_flag() {
        unsafe { realsense::rsw_clear_last_error() };
    }

    /// Turn the shim's last error, if any, into an [`Error`] and clear it.
    pub(crate) fn take_error_if_any(context: &str) -> Option<Error> {
        if !unsafe { realsense::rsw_has_last_error() } {
            return None;
        }

        let from_sdk = unsafe { realsense::rsw_last_error_is_sdk() };
        let message = read_cstr(unsafe { realsense::rsw_last_error_message() })
            .unwrap_or_else(|| "unknown error".to_string());

        let err = if from_sdk {
            let mut rs = Rs2Error::new(context, message);
            rs.function = read_cstr(unsafe { realsense::rsw_last_error_function() });
            rs.args = read_cstr(unsafe { realsense::rsw_last_error_args() });
            Error::Device(rs)
        } else {
            Error::Native {
                context: context.to_string(),
                message,
            }
        };

        clear_error_flag();
        Some(err)
    }

    /// Like [`take_error_if_any`] but always yields an error.
    pub(crate) fn last_error(context: &str) -> Error {
        take_error_if_any(context).unwrap_or_else(|| Error::Native {
            context: context.to_string(),
            message: "unknown error".to_string(),
        })
    }

    /// Copy a shim-allocated C string into a `String` and free it.
    pub(crate) fn take_owned_string(ptr: *mut c_char, context: &str) -> Result<String> {
        if ptr.is_null() {
            return Err(last_error(context));
        }
        let s = unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() };
        unsafe { realsense::rsw_free_cstring(ptr) };
        Ok(s)
    }
}
