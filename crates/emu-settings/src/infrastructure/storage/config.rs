//! TOML-based persistence of the emulator settings.
//!
//! Reads and writes a [`SettingsDocument`] to the platform-appropriate file:
//! - Windows:  `%APPDATA%\EmuSettings\settings.toml`
//! - Linux:    `~/.config/emu-settings/settings.toml`
//! - macOS:    `~/Library/Application Support/EmuSettings/settings.toml`
//!
//! # File layout
//!
//! ```toml
//! [values]
//! use_hw_renderer = true
//! sink_id = "auto"
//! mic_input_type = "none"
//!
//! [input]
//! current_profile_index = 0
//!
//! [[input.profiles]]
//! name = "default"
//! buttons = ["engine:keyboard,code:65", ...]
//! ```
//!
//! Every field has a serde default, so a partial or empty file still loads.
//! The working copy of the active profile is not stored; it is rebuilt from
//! `input.profiles[current_profile_index]` when the document is loaded.

use std::path::{Path, PathBuf};

use emu_settings_core::{InputProfile, ProfileError, ProfileManager, Values};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the settings document inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The stored profile list violates the profile invariants.
    #[error("invalid input profiles in settings: {0}")]
    Profile(#[from] ProfileError),
}

// ── Document schema ───────────────────────────────────────────────────────────

/// Top-level settings document stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsDocument {
    #[serde(default)]
    pub values: Values,
    #[serde(default)]
    pub input: InputSection,
}

/// Stored input profiles and the selected one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSection {
    #[serde(default)]
    pub current_profile_index: usize,
    #[serde(default = "default_profiles")]
    pub profiles: Vec<InputProfile>,
}

fn default_profiles() -> Vec<InputProfile> {
    vec![InputProfile::default()]
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            current_profile_index: 0,
            profiles: default_profiles(),
        }
    }
}

impl SettingsDocument {
    /// Splits the document into live values and a profile manager, with the
    /// selected profile loaded into the working copy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Profile`] for an empty profile list or an
    /// out-of-range selection.
    pub fn into_state(self) -> Result<(Values, ProfileManager), ConfigError> {
        let mut values = self.values;
        let mut manager =
            ProfileManager::new(self.input.profiles, self.input.current_profile_index)?;
        let active = manager.active_index();
        manager.load_profile(&mut values, active)?;
        Ok((values, manager))
    }

    /// Builds a document from live state.
    pub fn from_state(values: &Values, manager: &ProfileManager) -> Self {
        Self {
            values: values.clone(),
            input: InputSection {
                current_profile_index: manager.active_index(),
                profiles: manager.profiles().to_vec(),
            },
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the settings file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn settings_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(SETTINGS_FILE_NAME))
}

/// Loads a [`SettingsDocument`] from `path`, returning the default document
/// if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_settings(path: &Path) -> Result<SettingsDocument, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SettingsDocument::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `document` to `path`.
///
/// Creates the parent directory if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_settings(path: &Path, document: &SettingsDocument) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(document)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory including the application subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("EmuSettings"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("emu-settings"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("EmuSettings")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
