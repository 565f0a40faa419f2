//! # emu-settings-core
//!
//! Shared library holding the emulator's user-configurable values, the named
//! input profiles that can be swapped at runtime, and the fixed order in which
//! the configuration is written to the diagnostic log.
//!
//! This crate has zero dependencies on renderers, audio backends, files or
//! the emulated system.  Those live behind traits in the `emu-settings` crate.
//!
//! # Architecture overview (for beginners)
//!
//! Every frontend of the emulator (desktop UI, command line, test harness)
//! edits one configuration object and then asks the settings layer to push
//! the new values into the running subsystems.  This crate is the shared
//! foundation of that flow.  It defines:
//!
//! - **`domain::values`** – [`Values`], the aggregate of every configurable
//!   field, plus the small enumerations it uses.
//!
//! - **`domain::input_profile`** – [`InputProfile`], a named bundle of
//!   controller bindings.  The settings layer copies profiles around but never
//!   looks inside the bindings.
//!
//! - **`domain::profiles`** – [`ProfileManager`], the ordered profile list and
//!   the index of the active entry, with the load/save/create/delete/rename
//!   operations that keep the two consistent.
//!
//! - **`domain::dump`** – [`setting_records`], the ordered name/value pairs
//!   that make up the configuration dump.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `emu_settings_core::Values` instead of `emu_settings_core::domain::values::Values`.
pub use domain::dump::{setting_records, SettingRecord};
pub use domain::input_profile::{InputProfile, NUM_ANALOGS, NUM_BUTTONS};
pub use domain::profiles::{ProfileError, ProfileManager};
pub use domain::values::{CameraSlot, LayoutOption, MicInputType, Values, NUM_CAMERAS};
