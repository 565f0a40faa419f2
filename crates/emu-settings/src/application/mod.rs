//! Application layer use cases for the settings layer.
//!
//! Use cases in this layer orchestrate the domain types from
//! `emu-settings-core` and reach the outside world only through traits
//! defined here.  They contain no file system access and no knowledge of a
//! particular renderer or audio backend.
//!
//! # Sub-modules
//!
//! - **`apply`** – Pushes [`Values`](emu_settings_core::Values) into the live
//!   subsystems.  Some effects always happen; the rest only while an emulated
//!   session is running.
//!
//! - **`microphone`** – The microphone interface, the built-in silent and
//!   static-noise microphones, and the factory that maps a configured mode to
//!   an implementation.
//!
//! - **`manage_profiles`** – Profile commands (list, load, save, create,
//!   delete, rename) as issued by a frontend.
//!
//! - **`log_settings`** – Writes the configuration dump to a diagnostic sink.

pub mod apply;
pub mod log_settings;
pub mod manage_profiles;
pub mod microphone;
