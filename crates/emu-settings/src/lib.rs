//! emu-settings library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does emu-settings do? (for beginners)
//!
//! The user edits configuration while the emulator may already be running.
//! Changing a value in [`Values`](emu_settings_core::Values) does nothing by
//! itself: something has to tell the renderer, the audio output, the input
//! services and the debug server about it.  This crate is that something.
//!
//! 1. [`application::apply::ApplyEngine`] pushes the current values into the
//!    live subsystems, skipping the ones that do not exist right now.
//! 2. [`application::manage_profiles`] runs the profile operations requested
//!    by a frontend and reports what changed.
//! 3. [`application::log_settings`] writes the configuration to the log in a
//!    fixed order so bug reports always carry it.
//!
//! The subsystems themselves are reached through traits, so the same code
//! runs against the real emulator, the headless CLI and test doubles.

/// Application layer: apply engine, microphones, profile use cases, diagnostics.
pub mod application;

/// Infrastructure layer: settings file storage, registries, sinks and doubles.
pub mod infrastructure;
