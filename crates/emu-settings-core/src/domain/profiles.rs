//! Input profile list and active-selection state machine.
//!
//! The [`ProfileManager`] owns the ordered list of [`InputProfile`]s and the
//! index of the active one.  The working copy of the active profile lives in
//! [`Values::current_input_profile`]; every operation that changes which
//! profile is active also refreshes that copy.
//!
//! # State (for beginners)
//!
//! ```text
//! profiles:  [ A, B, C ]        Values::current_input_profile
//!                 ▲                         │
//! active:  ───────┘ (1)  ◄── load ──────────┘  (copy of B, may hold edits)
//!                        ─── save ──►  overwrites an entry with the copy
//! ```
//!
//! Invariants held after every successful call:
//!
//! - the list is never empty;
//! - `active < profiles.len()`.
//!
//! Calls that would break an invariant are rejected with a [`ProfileError`]
//! and leave the state untouched.

use thiserror::Error;
use tracing::info;

use super::input_profile::InputProfile;
use super::values::Values;

/// Errors returned by profile operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The index does not name an entry of the profile list.
    #[error("invalid profile index {index}: {len} profile(s) available")]
    InvalidProfileIndex { index: usize, len: usize },

    /// Deleting would leave the profile list empty.
    #[error("cannot delete the last remaining input profile")]
    LastProfileDeletion,

    /// A profile manager was constructed from an empty list.
    #[error("the input profile list must contain at least one profile")]
    NoProfiles,
}

/// Ordered list of named input profiles plus the active selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileManager {
    profiles: Vec<InputProfile>,
    active: usize,
}

impl Default for ProfileManager {
    /// A single default profile, selected.
    fn default() -> Self {
        Self {
            profiles: vec![InputProfile::default()],
            active: 0,
        }
    }
}

impl ProfileManager {
    /// Creates a manager from a loaded profile list and selection.
    ///
    /// The working copy in [`Values`] is not touched; call
    /// [`load_profile`](Self::load_profile) with [`active_index`](Self::active_index)
    /// afterwards to populate it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NoProfiles`] for an empty list and
    /// [`ProfileError::InvalidProfileIndex`] if `active` is out of range.
    pub fn new(profiles: Vec<InputProfile>, active: usize) -> Result<Self, ProfileError> {
        if profiles.is_empty() {
            return Err(ProfileError::NoProfiles);
        }
        check_index(active, profiles.len())?;
        Ok(Self { profiles, active })
    }

    /// All profiles in list order.
    pub fn profiles(&self) -> &[InputProfile] {
        &self.profiles
    }

    /// Number of profiles; always at least one.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if there are no profiles; never the case after construction.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Index of the active profile.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The list entry for the active profile (not the working copy).
    pub fn active(&self) -> &InputProfile {
        &self.profiles[self.active]
    }

    /// Copies `profiles[index]` into the working copy and selects it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfileIndex`] if `index` is out of range.
    pub fn load_profile(&mut self, values: &mut Values, index: usize) -> Result<(), ProfileError> {
        check_index(index, self.profiles.len())?;
        self.select(values, index);
        Ok(())
    }

    /// Overwrites `profiles[index]` with the working copy.
    ///
    /// The selection is not consulted, so the working copy can be saved into
    /// any slot.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfileIndex`] if `index` is out of range.
    pub fn save_profile(&mut self, values: &Values, index: usize) -> Result<(), ProfileError> {
        check_index(index, self.profiles.len())?;
        self.profiles[index] = values.current_input_profile.clone();
        info!(
            "saved working input profile ({}) into slot {index}",
            values.current_input_profile.name
        );
        Ok(())
    }

    /// Appends a copy of the working profile under a new name and makes it
    /// active.
    ///
    /// The copy is taken from the working copy, so unsaved edits carry over
    /// into the new profile.  Returns the index of the new entry.
    pub fn create_profile(&mut self, values: &mut Values, name: impl Into<String>) -> usize {
        let mut profile = values.current_input_profile.clone();
        profile.name = name.into();
        self.profiles.push(profile);
        let index = self.profiles.len() - 1;
        info!("created input profile {index} ({})", self.profiles[index].name);
        self.select(values, index);
        index
    }

    /// Removes `profiles[index]` and selects the first remaining profile.
    ///
    /// Selection always resets to index 0, whichever entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfileIndex`] if `index` is out of range
    /// and [`ProfileError::LastProfileDeletion`] if only one profile is left.
    pub fn delete_profile(&mut self, values: &mut Values, index: usize) -> Result<(), ProfileError> {
        check_index(index, self.profiles.len())?;
        if self.profiles.len() == 1 {
            return Err(ProfileError::LastProfileDeletion);
        }
        let removed = self.profiles.remove(index);
        info!("deleted input profile {index} ({})", removed.name);
        self.load_profile(values, 0)
    }

    /// Renames the active list entry and the working copy together.
    pub fn rename_current_profile(&mut self, values: &mut Values, name: impl Into<String>) {
        let name = name.into();
        info!(
            "renamed input profile {} ({} -> {name})",
            self.active, self.profiles[self.active].name
        );
        values.current_input_profile.name.clone_from(&name);
        self.profiles[self.active].name = name;
    }

    /// Makes `profiles[index]` active and copies it into the working copy.
    /// `index` must be in range.
    fn select(&mut self, values: &mut Values, index: usize) {
        values.current_input_profile = self.profiles[index].clone();
        self.active = index;
        info!("loaded input profile {index} ({})", self.profiles[index].name);
    }
}

fn check_index(index: usize, len: usize) -> Result<(), ProfileError> {
    if index < len {
        Ok(())
    } else {
        Err(ProfileError::InvalidProfileIndex { index, len })
    }
}
