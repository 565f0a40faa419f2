//! Ordered name/value view of [`Values`] for the diagnostic log.
//!
//! Tools that scrape user logs rely on both the record names and their order,
//! so [`setting_records`] is the single place that defines them.

use serde::Serialize;

use super::values::{CameraSlot, Values};

/// One line of the configuration dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingRecord {
    pub name: &'static str,
    pub value: String,
}

impl SettingRecord {
    fn new(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

/// Record names for the per-camera fields, in [`CameraSlot::ALL`] order.
const CAMERA_RECORD_NAMES: [[&str; 3]; 3] = [
    [
        "Camera_OuterRightName",
        "Camera_OuterRightConfig",
        "Camera_OuterRightFlip",
    ],
    ["Camera_InnerName", "Camera_InnerConfig", "Camera_InnerFlip"],
    [
        "Camera_OuterLeftName",
        "Camera_OuterLeftConfig",
        "Camera_OuterLeftFlip",
    ],
];

/// Returns every tracked setting as a name/value pair in dump order.
pub fn setting_records(values: &Values) -> Vec<SettingRecord> {
    let mut records = vec![
        SettingRecord::new("Core_UseCpuJit", values.use_cpu_jit),
        SettingRecord::new("Renderer_UseGLES", values.use_gles),
        SettingRecord::new("Renderer_UseHwRenderer", values.use_hw_renderer),
        SettingRecord::new("Renderer_UseHwShader", values.use_hw_shader),
        SettingRecord::new("Renderer_ShadersAccurateGs", values.shaders_accurate_gs),
        SettingRecord::new("Renderer_ShadersAccurateMul", values.shaders_accurate_mul),
        SettingRecord::new("Renderer_UseShaderJit", values.use_shader_jit),
        SettingRecord::new("Renderer_UseResolutionFactor", values.resolution_factor),
        SettingRecord::new("Renderer_VsyncEnabled", values.vsync_enabled),
        SettingRecord::new("Renderer_UseFrameLimit", values.use_frame_limit),
        SettingRecord::new("Renderer_FrameLimit", values.frame_limit),
        SettingRecord::new("Layout_Toggle3d", values.toggle_3d),
        SettingRecord::new("Layout_Factor3d", values.factor_3d),
        SettingRecord::new("Layout_LayoutOption", values.layout_option.as_int()),
        SettingRecord::new("Layout_SwapScreen", values.swap_screen),
        SettingRecord::new("Audio_EnableDspLle", values.enable_dsp_lle),
        SettingRecord::new(
            "Audio_EnableDspLleMultithread",
            values.enable_dsp_lle_multithread,
        ),
        SettingRecord::new("Audio_OutputEngine", &values.sink_id),
        SettingRecord::new("Audio_EnableAudioStretching", values.enable_audio_stretching),
        SettingRecord::new("Audio_OutputDevice", &values.audio_device_id),
    ];

    for slot in CameraSlot::ALL {
        let [name, config, flip] = CAMERA_RECORD_NAMES[slot.index()];
        records.push(SettingRecord::new(name, values.camera_name(slot)));
        records.push(SettingRecord::new(config, values.camera_config(slot)));
        records.push(SettingRecord::new(flip, values.camera_flip(slot)));
    }

    records.extend([
        SettingRecord::new("DataStorage_UseVirtualSd", values.use_virtual_sd),
        SettingRecord::new("System_IsNew3ds", values.is_new_3ds),
        SettingRecord::new("System_RegionValue", values.region_value),
        SettingRecord::new("Debugging_UseGdbstub", values.use_gdbstub),
        SettingRecord::new("Debugging_GdbstubPort", values.gdbstub_port),
    ]);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::LayoutOption;

    fn value_of<'a>(records: &'a [SettingRecord], name: &str) -> &'a str {
        &records
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("record {name} missing"))
            .value
    }

    #[test]
    fn test_dump_has_one_record_per_tracked_field() {
        assert_eq!(setting_records(&Values::default()).len(), 34);
    }

    #[test]
    fn test_dump_lists_every_record_in_fixed_order() {
        let names: Vec<&str> = setting_records(&Values::default())
            .iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(
            names,
            [
                "Core_UseCpuJit",
                "Renderer_UseGLES",
                "Renderer_UseHwRenderer",
                "Renderer_UseHwShader",
                "Renderer_ShadersAccurateGs",
                "Renderer_ShadersAccurateMul",
                "Renderer_UseShaderJit",
                "Renderer_UseResolutionFactor",
                "Renderer_VsyncEnabled",
                "Renderer_UseFrameLimit",
                "Renderer_FrameLimit",
                "Layout_Toggle3d",
                "Layout_Factor3d",
                "Layout_LayoutOption",
                "Layout_SwapScreen",
                "Audio_EnableDspLle",
                "Audio_EnableDspLleMultithread",
                "Audio_OutputEngine",
                "Audio_EnableAudioStretching",
                "Audio_OutputDevice",
                "Camera_OuterRightName",
                "Camera_OuterRightConfig",
                "Camera_OuterRightFlip",
                "Camera_InnerName",
                "Camera_InnerConfig",
                "Camera_InnerFlip",
                "Camera_OuterLeftName",
                "Camera_OuterLeftConfig",
                "Camera_OuterLeftFlip",
                "DataStorage_UseVirtualSd",
                "System_IsNew3ds",
                "System_RegionValue",
                "Debugging_UseGdbstub",
                "Debugging_GdbstubPort",
            ]
        );
    }

    #[test]
    fn test_dump_starts_with_cpu_jit_and_ends_with_gdbstub_port() {
        let records = setting_records(&Values::default());
        assert_eq!(records.first().unwrap().name, "Core_UseCpuJit");
        assert_eq!(records.last().unwrap().name, "Debugging_GdbstubPort");
        assert_eq!(records.last().unwrap().value, "24689");
    }

    #[test]
    fn test_booleans_render_as_words() {
        let records = setting_records(&Values::default());
        assert_eq!(value_of(&records, "Core_UseCpuJit"), "true");
        assert_eq!(value_of(&records, "Renderer_UseGLES"), "false");
    }

    #[test]
    fn test_layout_option_renders_as_integer() {
        let values = Values {
            layout_option: LayoutOption::LargeScreen,
            ..Values::default()
        };
        let records = setting_records(&values);
        assert_eq!(value_of(&records, "Layout_LayoutOption"), "2");
    }

    #[test]
    fn test_camera_records_follow_slot_order() {
        let mut values = Values::default();
        values.camera_name = ["image".into(), "qt".into(), "blank".into()];
        values.camera_flip = [1, 2, 3];

        let records = setting_records(&values);
        let camera: Vec<(&str, &str)> = records
            .iter()
            .filter(|r| r.name.starts_with("Camera_"))
            .map(|r| (r.name, r.value.as_str()))
            .collect();

        assert_eq!(
            camera,
            vec![
                ("Camera_OuterRightName", "image"),
                ("Camera_OuterRightConfig", ""),
                ("Camera_OuterRightFlip", "1"),
                ("Camera_InnerName", "qt"),
                ("Camera_InnerConfig", ""),
                ("Camera_InnerFlip", "2"),
                ("Camera_OuterLeftName", "blank"),
                ("Camera_OuterLeftConfig", ""),
                ("Camera_OuterLeftFlip", "3"),
            ]
        );
    }

    #[test]
    fn test_region_value_keeps_sign() {
        let records = setting_records(&Values::default());
        assert_eq!(value_of(&records, "System_RegionValue"), "-1");
    }
}
