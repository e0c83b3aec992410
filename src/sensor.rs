use autocxx::c_int;
use realsense_smoke_sys::{RsSensor, realsense};

use crate::common::RegionOfInterest;
use crate::error::{Result, clear_error_flag, last_error, take_error_if_any, take_owned_string};
use crate::options::{OptionControl, OptionRange, RoiControl, Rs2Option};

/// Safe Rust wrapper for `rs2::sensor`
pub struct Sensor {
    handle: RsSensor,
}

unsafe impl Send for Sensor {}

impl Drop for Sensor {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { realsense::rsw_sensor_delete(self.handle) };
        }
    }
}

impl Sensor {
    pub(crate) fn from_handle(handle: RsSensor) -> Self {
        Self { handle }
    }

    pub fn is_depth_sensor(&self) -> Result<bool> {
        clear_error_flag();
        let v = unsafe { realsense::rsw_sensor_is_depth_sensor(self.handle) };
        match take_error_if_any("failed to check sensor kind") {
            Some(err) => Err(err),
            None => Ok(v),
        }
    }

    pub fn is_roi_sensor(&self) -> Result<bool> {
        clear_error_flag();
        let v = unsafe { realsense::rsw_sensor_is_roi_sensor(self.handle) };
        match take_error_if_any("failed to check ROI support") {
            Some(err) => Err(err),
            None => Ok(v),
        }
    }
}

impl OptionControl for Sensor {
    fn name(&self) -> String {
        clear_error_flag();
        let ptr = unsafe { realsense::rsw_sensor_get_name(self.handle) };
        take_owned_string(ptr, "failed to read sensor name").unwrap_or_else(|_| "unknown sensor".to_string())
    }

    fn supports(&self, option: Rs2Option) -> Result<bool> {
        clear_error_flag();
        let v = unsafe { realsense::rsw_sensor_supports_option(self.handle, c_int(option.as_raw())) };
        match take_error_if_any(&format!("failed to query {option} support")) {
            Some(err) => Err(err),
            None => Ok(v),
        }
    }

    fn get(&self, option: Rs2Option) -> Result<f32> {
        clear_error_flag();
        let v = unsafe { realsense::rsw_sensor_get_option(self.handle, c_int(option.as_raw())) };
        if let Some(err) = take_error_if_any(&format!("failed to get {option}")) {
            return Err(err);
        }
        Ok(v)
    }

    fn set(&self, option: Rs2Option, value: f32) -> Result<()> {
        clear_error_flag();
        let ok = unsafe { realsense::rsw_sensor_set_option(self.handle, c_int(option.as_raw()), value) };
        if !ok {
            return Err(last_error(&format!("failed setting {option}")));
        }
        Ok(())
    }

    fn range(&self, option: Rs2Option) -> Result<OptionRange> {
        let (mut min, mut max, mut step, mut default) = (0f32, 0f32, 0f32, 0f32);
        clear_error_flag();
        let ok = unsafe {
            realsense::rsw_sensor_get_option_range(
                self.handle,
                c_int(option.as_raw()),
                &mut min as *mut f32,
                &mut max as *mut f32,
                &mut step as *mut f32,
                &mut default as *mut f32,
            )
        };
        if !ok {
            return Err(last_error(&format!("failed to get {option} range")));
        }
        Ok(OptionRange { min, max, step, default })
    }

    fn value_description(&self, option: Rs2Option, value: f32) -> Result<String> {
        clear_error_flag();
        let ptr = unsafe {
            realsense::rsw_sensor_get_option_value_description(self.handle, c_int(option.as_raw()), value)
        };
        take_owned_string(ptr, &format!("failed to describe {option} value {value}"))
    }
}

impl RoiControl for Sensor {
    fn set_region_of_interest(&self, roi: RegionOfInterest) -> Result<()> {
        clear_error_flag();
        let ok = unsafe {
            realsense::rsw_sensor_set_roi(
                self.handle,
                c_int(roi.min_x),
                c_int(roi.min_y),
                c_int(roi.max_x),
                c_int(roi.max_y),
            )
        };
        if !ok {
            return Err(last_error("failed setting region of interest"));
        }
        Ok(())
    }

    fn region_of_interest(&self) -> Result<RegionOfInterest> {
        let mut out = [c_int(0); 4];
        clear_error_flag();
        let ok = unsafe { realsense::rsw_sensor_get_roi(self.handle, out.as_mut_ptr()) };
        if !ok {
            return Err(last_error("failed reading region of interest"));
        }
        Ok(RegionOfInterest {
            min_x: out[0].into(),
            min_y: out[1].into(),
            max_x: out[2].into(),
            max_y: out[3].into(),
        })
    }
}
