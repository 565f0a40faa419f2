//! Named bundles of input-device bindings.
//!
//! The settings layer treats the binding strings as opaque: it copies whole
//! profiles between the profile list and the working copy in [`Values`], but
//! the parameter strings are only ever interpreted by the input subsystem.
//!
//! [`Values`]: super::values::Values

use serde::{Deserialize, Serialize};

/// Number of digital buttons on the emulated console (including Home and the
/// debug/GPIO lines).
pub const NUM_BUTTONS: usize = 17;

/// Number of analog sticks (Circle Pad and C-Stick).
pub const NUM_ANALOGS: usize = 2;

/// Default keyboard key codes for each button, in console button order:
/// A, B, X, Y, Up, Down, Left, Right, L, R, Start, Select, Debug, GPIO14,
/// ZL, ZR, Home.
const DEFAULT_BUTTON_KEYS: [u32; NUM_BUTTONS] = [
    65, 83, 90, 88, 84, 71, 70, 72, 81, 87, 77, 78, 79, 80, 49, 50, 66,
];

/// Default (up, down, left, right, modifier) key codes for each analog stick.
const DEFAULT_ANALOG_KEYS: [[u32; 5]; NUM_ANALOGS] = [
    [0x0100_0013, 0x0100_0015, 0x0100_0012, 0x0100_0014, 68],
    [73, 75, 74, 76, 68],
];

/// A named set of input bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputProfile {
    pub name: String,
    /// Input parameter string per console button.
    pub buttons: Vec<String>,
    /// Input parameter string per analog stick.
    pub analogs: Vec<String>,
    pub motion_device: String,
    pub touch_device: String,
    pub use_touch_from_button: bool,
    pub touch_from_button_map_index: usize,
    pub udp_input_address: String,
    pub udp_input_port: u16,
    pub udp_pad_index: u8,
}

impl InputProfile {
    /// Creates a profile with the default keyboard bindings and the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for InputProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            buttons: DEFAULT_BUTTON_KEYS
                .iter()
                .map(|code| keyboard_param(*code))
                .collect(),
            analogs: DEFAULT_ANALOG_KEYS
                .iter()
                .map(|keys| analog_from_buttons_param(keys))
                .collect(),
            motion_device: "engine:motion_emu,update_period:100,sensitivity:0.01".to_string(),
            touch_device: "engine:emu_window".to_string(),
            use_touch_from_button: false,
            touch_from_button_map_index: 0,
            udp_input_address: "127.0.0.1".to_string(),
            udp_input_port: 26760,
            udp_pad_index: 0,
        }
    }
}

fn keyboard_param(code: u32) -> String {
    format!("engine:keyboard,code:{code}")
}

/// Nested parameters escape `:` as `$0` and `,` as `$1`.
fn analog_from_buttons_param(keys: &[u32; 5]) -> String {
    let nested = |code: u32| format!("engine$0keyboard$1code$0{code}");
    format!(
        "engine:analog_from_button,up:{},down:{},left:{},right:{},modifier:{},modifier_scale:0.5",
        nested(keys[0]),
        nested(keys[1]),
        nested(keys[2]),
        nested(keys[3]),
        nested(keys[4]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_binds_every_button_and_stick() {
        let profile = InputProfile::default();
        assert_eq!(profile.buttons.len(), NUM_BUTTONS);
        assert_eq!(profile.analogs.len(), NUM_ANALOGS);
    }

    #[test]
    fn test_default_button_a_is_keyboard_a() {
        let profile = InputProfile::default();
        assert_eq!(profile.buttons[0], "engine:keyboard,code:65");
    }

    #[test]
    fn test_analog_param_escapes_nested_separators() {
        let profile = InputProfile::default();
        let c_stick = &profile.analogs[1];
        assert!(c_stick.starts_with("engine:analog_from_button,up:engine$0keyboard$1code$073,"));
        assert!(c_stick.ends_with(",modifier_scale:0.5"));
    }

    #[test]
    fn test_named_keeps_default_bindings() {
        let profile = InputProfile::named("Player 2");
        assert_eq!(profile.name, "Player 2");
        assert_eq!(profile.buttons, InputProfile::default().buttons);
        assert_eq!(profile.udp_input_port, 26760);
    }
}
