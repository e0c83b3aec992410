use autocxx::c_int;
use realsense_smoke_sys::{RsDevice, realsense};

use crate::advanced_mode::AdvancedMode;
use crate::common::CameraInfo;
use crate::error::{Result, clear_error_flag, last_error, take_error_if_any, take_owned_string};
use crate::sensor::Sensor;

/// Safe Rust wrapper for `rs2::device`
pub struct Device {
    handle: RsDevice,
}

unsafe impl Send for Device {}

impl Drop for Device {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_device_delete(self.handle) };
        }
    }
}

impl Device {
    pub(crate) fn from_handle(handle: RsDevice) -> Self {
        Self { handle }
    }

    pub(crate) fn handle(&self) -> RsDevice {
        self.handle
    }

    pub fn supports_info(&self, info: CameraInfo) -> Result<bool> {
        clear_error_flag();
        let supported = unsafe { realsense::rsw_device_supports_info(self.handle, c_int(info.as_raw())) };
        match take_error_if_any("failed to query device info support") {
            Some(err) => Err(err),
            None => Ok(supported),
        }
    }

    pub fn info(&self, info: CameraInfo) -> Result<String> {
        clear_error_flag();
        let ptr = unsafe { realsense::rsw_device_get_info(self.handle, c_int(info.as_raw())) };
        take_owned_string(ptr, &format!("failed to read device info {info:?}"))
    }

    pub fn serial_number(&self) -> Result<String> {
        self.info(CameraInfo::SerialNumber)
    }

    pub fn name(&self) -> Result<String> {
        self.info(CameraInfo::Name)
    }

    pub fn sensor_count(&self) -> Result<usize> {
        clear_error_flag();
        let n: i32 = unsafe { realsense::rsw_device_sensor_count(self.handle) }.into();
        if let Some(err) = take_error_if_any("failed to query sensors") {
            return Err(err);
        }
        Ok(n.max(0) as usize)
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        let count = self.sensor_count()?;
        let mut sensors = Vec::with_capacity(count);
        for index in 0..count {
            clear_error_flag();
            let h = unsafe { realsense::rsw_device_get_sensor(self.handle, c_int(index as i32)) };
            if h.is_null() {
                return Err(last_error("failed to get sensor"));
            }
            sensors.push(Sensor::from_handle(h));
        }
        Ok(sensors)
    }

    pub fn advanced_mode(&self) -> AdvancedMode<'_> {
        AdvancedMode::new(self)
    }
}
