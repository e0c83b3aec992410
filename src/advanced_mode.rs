//! D400 advanced mode (`rs400::advanced_mode`).

use std::ffi::CString;

use autocxx::c_int;
use realsense_smoke_sys::realsense;
use tracing::info;

use crate::common::DepthControlGroup;
use crate::device::Device;
use crate::error::{
    Error, Result, clear_error_flag, last_error, take_error_if_any, take_owned_string,
};

pub struct AdvancedMode<'a> {
    device: &'a Device,
}

impl<'a> AdvancedMode<'a> {
    pub(crate) fn new(device: &'a Device) -> Self {
        Self { device }
    }

    pub fn is_supported(&self) -> Result<bool> {
        clear_error_flag();
        let v = unsafe { realsense::rsw_advanced_mode_is_supported(self.device.handle()) };
        if let Some(err) = take_error_if_any("failed to check advanced mode support") {
            return Err(err);
        }
        Ok(v)
    }

    pub fn is_enabled(&self) -> Result<bool> {
        clear_error_flag();
        let v = unsafe { realsense::rsw_advanced_mode_is_enabled(self.device.handle()) };
        if let Some(err) = take_error_if_any("failed to read advanced mode state") {
            return Err(err);
        }
        Ok(v)
    }

    pub fn toggle(&self, enable: bool) -> Result<()> {
        clear_error_flag();
        let ok = unsafe { realsense::rsw_advanced_mode_toggle(self.device.handle(), enable) };
        if !ok {
            return Err(last_error("failed to toggle advanced mode"));
        }
        Ok(())
    }

    /// Enable advanced mode unless it already is. Returns whether it was toggled.
    pub fn ensure_enabled(&self) -> Result<bool> {
        if !self.is_supported()? {
            return Err(Error::MissingCapability("device does not support advanced mode".to_string()));
        }
        if self.is_enabled()? {
            info!("advanced mode is already enabled");
            return Ok(false);
        }
        info!("advanced mode is not enabled -> enabling it");
        self.toggle(true)?;
        info!("Finished toggling advanced mode");
        Ok(true)
    }

    pub fn load_json(&self, json: &str) -> Result<()> {
        let json = CString::new(json)
            .map_err(|e| Error::PresetFormat(format!("preset contains a NUL byte: {e}")))?;
        clear_error_flag();
        let ok = unsafe { realsense::rsw_advanced_mode_load_json(self.device.handle(), json.as_ptr()) };
        if !ok {
            return Err(last_error("failed to load JSON settings"));
        }
        Ok(())
    }

    /// Current advanced-mode settings as JSON.
    pub fn serialize_json(&self) -> Result<serde_json::Value> {
        clear_error_flag();
        let ptr = unsafe { realsense::rsw_advanced_mode_serialize_json(self.device.handle()) };
        let s = take_owned_string(ptr, "failed to serialize advanced mode settings")?;
        Ok(serde_json::from_str(&s)?)
    }

    pub fn set_depth_control(&self, group: &DepthControlGroup) -> Result<()> {
        let values = group.to_values();
        clear_error_flag();
        let ok = unsafe {
            realsense::rsw_advanced_mode_set_depth_control(
                self.device.handle(),
                values.as_ptr(),
                c_int(values.len() as i32),
            )
        };
        if !ok {
            return Err(last_error("failed setting depth control"));
        }
        Ok(())
    }

    pub fn depth_control(&self) -> Result<DepthControlGroup> {
        let mut values = [0u32; DepthControlGroup::FIELD_COUNT];
        clear_error_flag();
        let ok = unsafe {
            realsense::rsw_advanced_mode_get_depth_control(
                self.device.handle(),
                values.as_mut_ptr(),
                c_int(values.len() as i32),
            )
        };
        if !ok {
            return Err(last_error("failed reading depth control"));
        }
        Ok(DepthControlGroup::from_values(values))
    }
}
