//! Domain entities for the emulator settings layer.
//!
//! This module contains pure data and state transitions with no
//! infrastructure dependencies.
//!
//! # What is "domain" here? (for beginners)
//!
//! The innermost layer holds the rules that make the settings layer what it
//! is: which fields exist, what their defaults are, how the active input
//! profile relates to the profile list, and in what order the configuration
//! is dumped.  Nothing in here talks to a renderer, an audio device or the
//! file system, so every rule can be unit-tested on any machine.
//!
//! Code in outer layers (application, infrastructure, CLI) depends on the
//! domain, but the domain never depends on them.

/// Ordered diagnostic dump of the configuration.
pub mod dump;

/// Named bundles of input-device bindings.
pub mod input_profile;

/// Profile list plus active-selection state machine.
///
/// See [`profiles::ProfileManager`] for the main type.
pub mod profiles;

/// The configuration value aggregate.
pub mod values;
