//! Collaborators for running the settings layer without an emulated session.
//!
//! The `emu-settings` CLI edits and inspects configuration while no game is
//! running.  There is no renderer and no session, so [`HeadlessSystem`]
//! reports every optional subsystem as absent and the apply engine only
//! performs its unconditional effects.

use std::sync::{
    atomic::{AtomicBool, AtomicU16, Ordering},
    Arc,
};

use tracing::info;

use crate::application::apply::{
    AudioSink, CameraReloadable, DebugServer, EmulatedSystem, InputReloadable, IrService, Renderer,
};

/// An emulated system that is never powered on.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessSystem;

impl EmulatedSystem for HeadlessSystem {
    fn is_powered_on(&self) -> bool {
        false
    }

    fn renderer(&self) -> Option<Arc<dyn Renderer>> {
        None
    }

    fn audio_sink(&self) -> Option<Arc<dyn AudioSink>> {
        None
    }

    fn hid_module(&self) -> Option<Arc<dyn InputReloadable>> {
        None
    }

    fn ir_service(&self, _service: IrService) -> Option<Arc<dyn InputReloadable>> {
        None
    }

    fn camera_module(&self) -> Option<Arc<dyn CameraReloadable>> {
        None
    }
}

/// Debug server stand-in that records and logs the requested state.
#[derive(Debug, Default)]
pub struct LoggingDebugServer {
    port: AtomicU16,
    enabled: AtomicBool,
}

impl LoggingDebugServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(&self) -> u16 {
        self.port.load(Ordering::Relaxed)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl DebugServer for LoggingDebugServer {
    fn set_port(&self, port: u16) {
        self.port.store(port, Ordering::Relaxed);
        info!("gdb stub port set to {port}");
    }

    fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::Relaxed);
        if was != enabled {
            info!("gdb stub {}", if enabled { "enabled" } else { "disabled" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_system_has_no_subsystems() {
        let system = HeadlessSystem;
        assert!(!system.is_powered_on());
        assert!(system.renderer().is_none());
        assert!(system.audio_sink().is_none());
        assert!(system.hid_module().is_none());
        assert!(IrService::ALL.iter().all(|s| system.ir_service(*s).is_none()));
        assert!(system.camera_module().is_none());
    }

    #[test]
    fn test_logging_debug_server_remembers_last_state() {
        let server = LoggingDebugServer::new();

        server.set_port(24689);
        server.set_enabled(true);

        assert_eq!(server.port(), 24689);
        assert!(server.is_enabled());
    }
}
