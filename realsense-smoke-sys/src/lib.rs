// Use autocxx to generate C++ bindings over the librealsense2 shim
use autocxx::prelude::*;

include_cpp! {
    #include "autocxx_wrapper.h"

    // Error helpers
    generate!("rsw::rsw_has_last_error")
    generate!("rsw::rsw_last_error_is_sdk")
    generate!("rsw::rsw_last_error_message")
    generate!("rsw::rsw_last_error_function")
    generate!("rsw::rsw_last_error_args")
    generate!("rsw::rsw_clear_last_error")
    generate!("rsw::rsw_free_cstring")

    // Context functions
    generate!("rsw::rsw_context_new")
    generate!("rsw::rsw_context_delete")
    generate!("rsw::rsw_context_device_count")
    generate!("rsw::rsw_context_get_device")

    // Device functions
    generate!("rsw::rsw_device_delete")
    generate!("rsw::rsw_device_supports_info")
    generate!("rsw::rsw_device_get_info")
    generate!("rsw::rsw_device_sensor_count")
    generate!("rsw::rsw_device_get_sensor")

    // Advanced mode
    generate!("rsw::rsw_advanced_mode_is_supported")
    generate!("rsw::rsw_advanced_mode_is_enabled")
    generate!("rsw::rsw_advanced_mode_toggle")
    generate!("rsw::rsw_advanced_mode_load_json")
    generate!("rsw::rsw_advanced_mode_serialize_json")
    generate!("rsw::rsw_advanced_mode_set_depth_control")
    generate!("rsw::rsw_advanced_mode_get_depth_control")

    // Sensor functions
    generate!("rsw::rsw_sensor_delete")
    generate!("rsw::rsw_sensor_get_name")
    generate!("rsw::rsw_sensor_is_depth_sensor")
    generate!("rsw::rsw_sensor_supports_option")
    generate!("rsw::rsw_sensor_get_option")
    generate!("rsw::rsw_sensor_set_option")
    generate!("rsw::rsw_sensor_get_option_range")
    generate!("rsw::rsw_sensor_get_option_value_description")
    generate!("rsw::rsw_sensor_is_roi_sensor")
    generate!("rsw::rsw_sensor_set_roi")
    generate!("rsw::rsw_sensor_get_roi")

    // Config / pipeline functions
    generate!("rsw::rsw_config_new")
    generate!("rsw::rsw_config_delete")
    generate!("rsw::rsw_config_enable_device")
    generate!("rsw::rsw_config_enable_stream")
    generate!("rsw::rsw_pipeline_new")
    generate!("rsw::rsw_pipeline_delete")
    generate!("rsw::rsw_pipeline_start")
    generate!("rsw::rsw_pipeline_stop")
    generate!("rsw::rsw_pipeline_wait_for_frames")

    // Frame helpers
    generate!("rsw::rsw_frameset_delete")
    generate!("rsw::rsw_frameset_size")
    generate!("rsw::rsw_frameset_get_frame")
    generate!("rsw::rsw_frame_delete")
    generate!("rsw::rsw_frame_is_depth")
    generate!("rsw::rsw_frame_is_video")
    generate!("rsw::rsw_frame_get_width")
    generate!("rsw::rsw_frame_get_height")
    generate!("rsw::rsw_frame_get_data")
    generate!("rsw::rsw_frame_get_data_size")

    safety!(unsafe_ffi)
}

// Opaque handle types. These are all `void*` on the C++ side, the aliases only
// keep the Rust wrappers readable.
pub type RsContext = *mut autocxx::c_void;
pub type RsDevice = *mut autocxx::c_void;
pub type RsSensor = *mut autocxx::c_void;
pub type RsConfig = *mut autocxx::c_void;
pub type RsPipeline = *mut autocxx::c_void;
pub type RsFrameSet = *mut autocxx::c_void;
pub type RsFrame = *mut autocxx::c_void;

// Re-export for convenience
pub use ffi::*;
pub use ffi::rsw as realsense;
