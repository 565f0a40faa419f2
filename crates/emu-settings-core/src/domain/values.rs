//! The configuration value aggregate.
//!
//! [`Values`] is a flat struct of every user-configurable field: renderer
//! flags, layout, audio, cameras, system region and the debug server.  One
//! instance exists per process; it is owned by the frontend and passed by
//! reference to the apply engine, the profile manager and the diagnostic dump.
//!
//! # Serde default values
//!
//! The struct is annotated with `#[serde(default)]`, so any field missing from
//! a persisted settings file takes the value from [`Values::default`].  This
//! lets older settings files keep loading after new fields are added.

use serde::{Deserialize, Serialize};

use super::input_profile::InputProfile;

/// Number of camera slots on the emulated console.
pub const NUM_CAMERAS: usize = 3;

/// Arrangement of the two emulated screens in the host window.
///
/// The discriminants are part of the diagnostic dump (`Layout_LayoutOption`
/// is written as an integer) and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutOption {
    /// Top screen above bottom screen, both at the same scale.
    #[default]
    Default = 0,
    /// Only one screen visible at a time.
    SingleScreen = 1,
    /// Top screen enlarged with the bottom screen beside it.
    LargeScreen = 2,
    /// Both screens side by side.
    SideScreen = 3,
}

impl LayoutOption {
    /// Integer form used by the diagnostic dump.
    pub fn as_int(self) -> i32 {
        self as i32
    }
}

/// Source of audio for the emulated microphone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicInputType {
    /// The microphone always reports silence.
    #[default]
    None,
    /// Samples are captured from a host input device.
    Real,
    /// Samples come from a fixed, built-in noise buffer.
    Static,
}

impl std::fmt::Display for MicInputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MicInputType::None => "none",
            MicInputType::Real => "real",
            MicInputType::Static => "static",
        };
        f.write_str(name)
    }
}

/// One of the three camera slots, in the order the console numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraSlot {
    OuterRight = 0,
    Inner = 1,
    OuterLeft = 2,
}

impl CameraSlot {
    /// All slots in index order.
    pub const ALL: [CameraSlot; NUM_CAMERAS] =
        [CameraSlot::OuterRight, CameraSlot::Inner, CameraSlot::OuterLeft];

    /// Array index of this slot in the per-camera fields of [`Values`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Every user-configurable value of the emulator.
///
/// Field groups follow the sections of the settings file.  `current_input_profile`
/// is the working copy of the active input profile: it is filled in by
/// [`ProfileManager::load_profile`](super::profiles::ProfileManager::load_profile)
/// and is never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Values {
    // Core
    pub use_cpu_jit: bool,

    // Renderer
    pub use_gles: bool,
    pub use_hw_renderer: bool,
    pub use_hw_shader: bool,
    pub shaders_accurate_gs: bool,
    pub shaders_accurate_mul: bool,
    pub use_shader_jit: bool,
    /// Internal resolution multiplier; `0` means "match the window".
    pub resolution_factor: u16,
    pub vsync_enabled: bool,
    pub use_frame_limit: bool,
    /// Speed limit in percent of native speed.
    pub frame_limit: u16,
    /// Background clear colour, each channel in `0.0..=1.0`.
    pub bg_red: f32,
    pub bg_green: f32,
    pub bg_blue: f32,

    // Layout
    pub toggle_3d: bool,
    /// Stereoscopic depth in percent.
    pub factor_3d: u8,
    pub layout_option: LayoutOption,
    pub swap_screen: bool,

    // Audio
    pub enable_dsp_lle: bool,
    pub enable_dsp_lle_multithread: bool,
    /// Output engine identifier, `"auto"` picks the first available sink.
    pub sink_id: String,
    pub enable_audio_stretching: bool,
    /// Output device name, `"auto"` picks the system default.
    pub audio_device_id: String,
    pub mic_input_type: MicInputType,
    pub mic_input_device: String,

    // Camera, indexed by [`CameraSlot::index`]
    pub camera_name: [String; NUM_CAMERAS],
    pub camera_config: [String; NUM_CAMERAS],
    pub camera_flip: [i32; NUM_CAMERAS],

    // Data storage
    pub use_virtual_sd: bool,

    // System
    pub is_new_3ds: bool,
    /// Console region; `-1` selects the region automatically from the title.
    pub region_value: i32,

    // Debugging
    pub use_gdbstub: bool,
    pub gdbstub_port: u16,

    // Controls
    #[serde(skip)]
    pub current_input_profile: InputProfile,
}

/// Region value that lets the emulator pick the region from the loaded title.
pub const REGION_AUTO_SELECT: i32 = -1;

impl Default for Values {
    fn default() -> Self {
        Self {
            use_cpu_jit: true,

            use_gles: false,
            use_hw_renderer: true,
            use_hw_shader: true,
            shaders_accurate_gs: true,
            shaders_accurate_mul: false,
            use_shader_jit: true,
            resolution_factor: 1,
            vsync_enabled: false,
            use_frame_limit: true,
            frame_limit: 100,
            bg_red: 0.0,
            bg_green: 0.0,
            bg_blue: 0.0,

            toggle_3d: false,
            factor_3d: 0,
            layout_option: LayoutOption::Default,
            swap_screen: false,

            enable_dsp_lle: false,
            enable_dsp_lle_multithread: false,
            sink_id: "auto".to_string(),
            enable_audio_stretching: true,
            audio_device_id: "auto".to_string(),
            mic_input_type: MicInputType::None,
            mic_input_device: "Default".to_string(),

            camera_name: std::array::from_fn(|_| "blank".to_string()),
            camera_config: Default::default(),
            camera_flip: [0; NUM_CAMERAS],

            use_virtual_sd: true,

            is_new_3ds: false,
            region_value: REGION_AUTO_SELECT,

            use_gdbstub: false,
            gdbstub_port: 24689,

            current_input_profile: InputProfile::default(),
        }
    }
}

impl Values {
    /// Camera implementation name for `slot`.
    pub fn camera_name(&self, slot: CameraSlot) -> &str {
        &self.camera_name[slot.index()]
    }

    /// Implementation-specific configuration string for `slot`.
    pub fn camera_config(&self, slot: CameraSlot) -> &str {
        &self.camera_config[slot.index()]
    }

    /// Image flip setting for `slot`.
    pub fn camera_flip(&self, slot: CameraSlot) -> i32 {
        self.camera_flip[slot.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_enable_hardware_rendering() {
        let values = Values::default();
        assert!(values.use_hw_renderer);
        assert!(values.use_hw_shader);
        assert!(values.use_shader_jit);
        assert!(!values.shaders_accurate_mul);
    }

    #[test]
    fn test_default_values_use_auto_audio_and_silent_mic() {
        let values = Values::default();
        assert_eq!(values.sink_id, "auto");
        assert_eq!(values.audio_device_id, "auto");
        assert_eq!(values.mic_input_type, MicInputType::None);
    }

    #[test]
    fn test_default_cameras_are_blank() {
        let values = Values::default();
        for slot in CameraSlot::ALL {
            assert_eq!(values.camera_name(slot), "blank");
            assert_eq!(values.camera_config(slot), "");
            assert_eq!(values.camera_flip(slot), 0);
        }
    }

    #[test]
    fn test_default_region_is_auto_select() {
        assert_eq!(Values::default().region_value, REGION_AUTO_SELECT);
    }

    #[test]
    fn test_camera_slot_indices_follow_console_order() {
        assert_eq!(CameraSlot::OuterRight.index(), 0);
        assert_eq!(CameraSlot::Inner.index(), 1);
        assert_eq!(CameraSlot::OuterLeft.index(), 2);
    }

    #[test]
    fn test_layout_option_integer_form() {
        assert_eq!(LayoutOption::Default.as_int(), 0);
        assert_eq!(LayoutOption::SingleScreen.as_int(), 1);
        assert_eq!(LayoutOption::LargeScreen.as_int(), 2);
        assert_eq!(LayoutOption::SideScreen.as_int(), 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_fields() {
        // Arrange
        let toml_str = r#"
use_hw_renderer = false
layout_option = "side_screen"
mic_input_type = "static"
camera_name = ["image", "blank", "blank"]
"#;

        // Act
        let values: Values = toml::from_str(toml_str).expect("deserialize partial values");

        // Assert
        assert!(!values.use_hw_renderer);
        assert_eq!(values.layout_option, LayoutOption::SideScreen);
        assert_eq!(values.mic_input_type, MicInputType::Static);
        assert_eq!(values.camera_name(CameraSlot::OuterRight), "image");
        // Unspecified fields keep their defaults
        assert_eq!(values.frame_limit, 100);
        assert_eq!(values.gdbstub_port, 24689);
    }

    #[test]
    fn test_working_profile_copy_is_not_serialized() {
        let mut values = Values::default();
        values.current_input_profile.name = "unsaved".to_string();

        let toml_str = toml::to_string(&values).expect("serialize");

        assert!(!toml_str.contains("current_input_profile"));
        assert!(!toml_str.contains("unsaved"));
    }
}
