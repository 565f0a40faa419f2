//! Process-wide microphone registry.
//!
//! The emulated microphone service calls [`SharedMicRegistry::current`] when
//! it starts sampling and keeps the returned `Arc` for the duration of the
//! capture.  [`register`](MicrophoneRegistry::register) only swaps the
//! registry's own reference, so a capture in progress keeps reading from the
//! instance it started with.

use std::sync::{Arc, PoisonError, RwLock};

use crate::application::microphone::{Microphone, MicrophoneRegistry, NullMic};

/// Holds the single registered microphone.
pub struct SharedMicRegistry {
    current: RwLock<Arc<dyn Microphone>>,
}

impl SharedMicRegistry {
    /// Creates a registry holding a silent microphone.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(NullMic::new())),
        }
    }

    /// The registered microphone.
    pub fn current(&self) -> Arc<dyn Microphone> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for SharedMicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MicrophoneRegistry for SharedMicRegistry {
    fn register(&self, mic: Arc<dyn Microphone>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = mic;
    }
}
