//! Infrastructure layer for the settings layer.
//!
//! Contains the adapters around the application layer: settings file
//! storage, the process-wide microphone registry, diagnostic log sinks,
//! headless collaborators for the CLI, and recording doubles for tests.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `emu_settings_core`, but MUST NOT be imported by the `application` or
//! domain layers.

pub mod diagnostics;
pub mod headless;
pub mod mic_registry;
pub mod mock;
pub mod storage;
