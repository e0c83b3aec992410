use autocxx::c_int;
use realsense_smoke_sys::{RsContext, realsense};
use tracing::info;

use crate::common::CameraInfo;
use crate::device::Device;
use crate::error::{Error, Result, clear_error_flag, last_error, take_error_if_any};

/// Safe Rust wrapper for `rs2::context`
pub struct Context {
    handle: RsContext,
}

unsafe impl Send for Context {}

impl Drop for Context {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_context_delete(self.handle) };
        }
    }
}

impl Context {
    pub fn new() -> Result<Self> {
        clear_error_flag();
        let handle = unsafe { realsense::rsw_context_new() };
        if handle.is_null() {
            Err(last_error("failed to create context"))
        } else {
            Ok(Self { handle })
        }
    }

    pub(crate) fn handle(&self) -> RsContext {
        self.handle
    }

    pub fn device_count(&self) -> Result<usize> {
        clear_error_flag();
        let n: i32 = unsafe { realsense::rsw_context_device_count(self.handle) }.into();
        if let Some(err) = take_error_if_any("failed to query devices") {
            return Err(err);
        }
        Ok(n.max(0) as usize)
    }

    pub fn query_devices(&self) -> Result<Vec<Device>> {
        let count = self.device_count()?;
        let mut devices = Vec::with_capacity(count);
        for index in 0..count {
            clear_error_flag();
            let h = unsafe { realsense::rsw_context_get_device(self.handle, c_int(index as i32)) };
            if h.is_null() {
                return Err(last_error("failed to get device"));
            }
            devices.push(Device::from_handle(h));
        }
        Ok(devices)
    }

    /// The one attached device. Any other device count is an error.
    pub fn open_single_device(&self) -> Result<Device> {
        let mut devices = self.query_devices()?;
        if devices.len() != 1 {
            return Err(Error::DeviceCount(devices.len()));
        }
        let device = devices.remove(0);

        let serial = device.info(CameraInfo::SerialNumber)?;
        info!("Using camera: {serial}");
        if device.supports_info(CameraInfo::Name)? {
            info!("Camera model: {}", device.name()?);
        }
        info!("Device has {} sensors", device.sensor_count()?);
        Ok(device)
    }
}
