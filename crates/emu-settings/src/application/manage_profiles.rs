//! ManageProfilesUseCase: profile commands issued by a frontend.
//!
//! A frontend (the CLI here, a settings dialog elsewhere) turns a user action
//! into a [`ProfileCommand`] and hands it to [`execute`] together with the
//! current [`Values`] and [`ProfileManager`].  The result is a listing of the
//! profiles after the command ran, which the frontend can display directly.
//!
//! Whether the change is persisted is up to the caller; see
//! [`ProfileCommand::is_mutating`].

use emu_settings_core::{ProfileError, ProfileManager, Values};
use serde::Serialize;

/// One requested profile operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    List,
    Load(usize),
    Save(usize),
    Create(String),
    Delete(usize),
    Rename(String),
}

impl ProfileCommand {
    /// Returns `true` if the command can change the profile list or selection.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, ProfileCommand::List)
    }
}

/// A row of the profile listing returned to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub index: usize,
    pub name: String,
    pub active: bool,
}

/// Lists every profile, marking the active one.
pub fn summarize(manager: &ProfileManager) -> Vec<ProfileSummary> {
    manager
        .profiles()
        .iter()
        .enumerate()
        .map(|(index, profile)| ProfileSummary {
            index,
            name: profile.name.clone(),
            active: index == manager.active_index(),
        })
        .collect()
}

/// Runs `command` and returns the resulting profile listing.
///
/// # Errors
///
/// Propagates [`ProfileError`] from the profile manager; on error nothing
/// has changed.
pub fn execute(
    command: ProfileCommand,
    values: &mut Values,
    manager: &mut ProfileManager,
) -> Result<Vec<ProfileSummary>, ProfileError> {
    match command {
        ProfileCommand::List => {}
        ProfileCommand::Load(index) => manager.load_profile(values, index)?,
        ProfileCommand::Save(index) => manager.save_profile(values, index)?,
        ProfileCommand::Create(name) => {
            manager.create_profile(values, name);
        }
        ProfileCommand::Delete(index) => manager.delete_profile(values, index)?,
        ProfileCommand::Rename(name) => manager.rename_current_profile(values, name),
    }
    Ok(summarize(manager))
}
