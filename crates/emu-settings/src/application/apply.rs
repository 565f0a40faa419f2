//! ApplyEngine: propagates [`Values`] into the running subsystems.
//!
//! Settings are edited while the emulator may already be running.  After the
//! frontend changes [`Values`] it calls [`ApplyEngine::apply`], which pushes
//! every value that has a live consumer.
//!
//! # Two classes of effects (for beginners)
//!
//! ```text
//! apply()
//!  ├─ always
//!  │   ├─ debug server: port, enabled
//!  │   ├─ video feature flags (hardware renderer, shader JIT, ...)
//!  │   ├─ renderer (if one exists): recompute framebuffer layout
//!  │   ├─ request a background colour refresh on the next frame
//!  │   └─ microphone: build one for the configured mode and register it
//!  └─ only while a session is powered on
//!      ├─ audio sink: output engine + device, time stretching
//!      ├─ HID module (if instantiated): reload input devices
//!      ├─ ir:USER / ir:rst (each if instantiated): reload input devices
//!      └─ camera module (if instantiated): reload camera devices
//! ```
//!
//! A collaborator that does not exist yet is simply skipped.  That is normal
//! operation (no game running, service not started), never an error, so
//! `apply` returns `()`.
//!
//! # Threading
//!
//! `apply` samples the run state and the collaborator handles once, at call
//! time.  It is meant to be called from the same control thread that mutates
//! [`Values`]; no locking is done here.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use emu_settings_core::Values;
use tracing::{debug, warn};

use super::microphone::{MicFactory, Microphone, MicrophoneRegistry, NullMic};

// ── Collaborator interfaces ───────────────────────────────────────────────────

/// The GDB remote-debugging server.
#[cfg_attr(test, mockall::automock)]
pub trait DebugServer: Send + Sync {
    fn set_port(&self, port: u16);
    /// Starts or stops the server.
    fn set_enabled(&self, enabled: bool);
}

/// The active video renderer.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    /// Recomputes the framebuffer layout from the current layout settings.
    fn recompute_layout(&self);
}

/// The DSP's audio output.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink: Send + Sync {
    /// Switches to the output engine `sink_id` on device `device_id`.
    fn select(&self, sink_id: &str, device_id: &str);
    fn set_stretching_enabled(&self, enabled: bool);
}

/// An emulated service that reads host input devices.
#[cfg_attr(test, mockall::automock)]
pub trait InputReloadable: Send + Sync {
    /// Re-creates input devices from the current input profile.
    fn reload_input_devices(&self);
}

/// The emulated camera module.
#[cfg_attr(test, mockall::automock)]
pub trait CameraReloadable: Send + Sync {
    /// Re-creates camera devices from the current camera settings.
    fn reload_camera_devices(&self);
}

/// The two infrared services that consume input devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrService {
    /// `ir:USER`, the Circle Pad Pro / expansion port service.
    User,
    /// `ir:rst`, the New 3DS C-Stick and ZL/ZR service.
    Rst,
}

impl IrService {
    pub const ALL: [IrService; 2] = [IrService::User, IrService::Rst];

    /// Service port name as registered with the emulated service manager.
    pub fn port_name(self) -> &'static str {
        match self {
            IrService::User => "ir:USER",
            IrService::Rst => "ir:rst",
        }
    }
}

/// Access to the emulated system and the optional subsystems hanging off it.
///
/// Every accessor returns the handle that is live *now*; `None` means the
/// subsystem does not currently exist.
#[cfg_attr(test, mockall::automock)]
pub trait EmulatedSystem: Send + Sync {
    /// `true` while an emulated session is running.
    fn is_powered_on(&self) -> bool;
    fn renderer(&self) -> Option<Arc<dyn Renderer>>;
    fn audio_sink(&self) -> Option<Arc<dyn AudioSink>>;
    fn hid_module(&self) -> Option<Arc<dyn InputReloadable>>;
    fn ir_service(&self, service: IrService) -> Option<Arc<dyn InputReloadable>>;
    fn camera_module(&self) -> Option<Arc<dyn CameraReloadable>>;
}

// ── Video feature flags ───────────────────────────────────────────────────────

/// Process-wide renderer switches polled by the renderer's frame loop.
#[derive(Debug, Default)]
pub struct VideoFeatureFlags {
    hw_renderer_enabled: AtomicBool,
    shader_jit_enabled: AtomicBool,
    hw_shader_enabled: AtomicBool,
    hw_shader_accurate_gs: AtomicBool,
    hw_shader_accurate_mul: AtomicBool,
    bg_color_update_requested: AtomicBool,
}

/// Point-in-time copy of [`VideoFeatureFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoFlagsSnapshot {
    pub hw_renderer_enabled: bool,
    pub shader_jit_enabled: bool,
    pub hw_shader_enabled: bool,
    pub hw_shader_accurate_gs: bool,
    pub hw_shader_accurate_mul: bool,
    pub bg_color_update_requested: bool,
}

impl VideoFeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the renderer feature switches out of `values`.
    pub fn store(&self, values: &Values) {
        self.hw_renderer_enabled
            .store(values.use_hw_renderer, Ordering::Relaxed);
        self.shader_jit_enabled
            .store(values.use_shader_jit, Ordering::Relaxed);
        self.hw_shader_enabled
            .store(values.use_hw_shader, Ordering::Relaxed);
        self.hw_shader_accurate_gs
            .store(values.shaders_accurate_gs, Ordering::Relaxed);
        self.hw_shader_accurate_mul
            .store(values.shaders_accurate_mul, Ordering::Relaxed);
    }

    /// Asks the renderer to reload the background colour on its next frame.
    pub fn request_bg_color_update(&self) {
        self.bg_color_update_requested.store(true, Ordering::Relaxed);
    }

    /// Returns and clears a pending background colour request.
    ///
    /// Called by the renderer once per frame.
    pub fn take_bg_color_update_request(&self) -> bool {
        self.bg_color_update_requested.swap(false, Ordering::Relaxed)
    }

    pub fn hw_renderer_enabled(&self) -> bool {
        self.hw_renderer_enabled.load(Ordering::Relaxed)
    }

    pub fn shader_jit_enabled(&self) -> bool {
        self.shader_jit_enabled.load(Ordering::Relaxed)
    }

    pub fn hw_shader_enabled(&self) -> bool {
        self.hw_shader_enabled.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> VideoFlagsSnapshot {
        VideoFlagsSnapshot {
            hw_renderer_enabled: self.hw_renderer_enabled(),
            shader_jit_enabled: self.shader_jit_enabled(),
            hw_shader_enabled: self.hw_shader_enabled(),
            hw_shader_accurate_gs: self.hw_shader_accurate_gs.load(Ordering::Relaxed),
            hw_shader_accurate_mul: self.hw_shader_accurate_mul.load(Ordering::Relaxed),
            bg_color_update_requested: self.bg_color_update_requested.load(Ordering::Relaxed),
        }
    }
}

// ── The engine ────────────────────────────────────────────────────────────────

/// Pushes configuration values into live subsystems.
///
/// Holds only handles; the [`Values`] to apply are passed to each call.
pub struct ApplyEngine {
    debug_server: Arc<dyn DebugServer>,
    video: Arc<VideoFeatureFlags>,
    system: Arc<dyn EmulatedSystem>,
    microphones: Arc<dyn MicrophoneRegistry>,
    mic_factory: MicFactory,
}

impl ApplyEngine {
    pub fn new(
        debug_server: Arc<dyn DebugServer>,
        video: Arc<VideoFeatureFlags>,
        system: Arc<dyn EmulatedSystem>,
        microphones: Arc<dyn MicrophoneRegistry>,
        mic_factory: MicFactory,
    ) -> Self {
        Self {
            debug_server,
            video,
            system,
            microphones,
            mic_factory,
        }
    }

    /// The video flags this engine writes to.
    pub fn video_flags(&self) -> &Arc<VideoFeatureFlags> {
        &self.video
    }

    /// Applies `values` to every subsystem that currently exists.
    pub fn apply(&self, values: &Values) {
        debug!(
            "gdb stub: port {}, enabled {}",
            values.gdbstub_port, values.use_gdbstub
        );
        self.debug_server.set_port(values.gdbstub_port);
        self.debug_server.set_enabled(values.use_gdbstub);

        self.video.store(values);
        match self.system.renderer() {
            Some(renderer) => renderer.recompute_layout(),
            None => debug!("no active renderer; framebuffer layout update skipped"),
        }
        self.video.request_bg_color_update();

        if self.system.is_powered_on() {
            self.apply_to_session(values);
        } else {
            debug!("system powered off; audio and input reload skipped");
        }

        // TODO: hand the sampling parameters of the previous microphone over to
        // the new one so a running capture survives a mode change.
        self.replace_microphone(values);
    }

    fn apply_to_session(&self, values: &Values) {
        match self.system.audio_sink() {
            Some(sink) => {
                debug!(
                    "audio output: sink '{}', device '{}', stretching {}",
                    values.sink_id, values.audio_device_id, values.enable_audio_stretching
                );
                sink.select(&values.sink_id, &values.audio_device_id);
                sink.set_stretching_enabled(values.enable_audio_stretching);
            }
            None => debug!("no audio sink in the running session"),
        }

        if let Some(hid) = self.system.hid_module() {
            hid.reload_input_devices();
        } else {
            debug!("HID module not instantiated; input reload skipped");
        }

        for service in IrService::ALL {
            if let Some(ir) = self.system.ir_service(service) {
                ir.reload_input_devices();
            } else {
                debug!("{} not instantiated; input reload skipped", service.port_name());
            }
        }

        if let Some(cam) = self.system.camera_module() {
            cam.reload_camera_devices();
        } else {
            debug!("camera module not instantiated; camera reload skipped");
        }
    }

    fn replace_microphone(&self, values: &Values) {
        let mic: Arc<dyn Microphone> = match self
            .mic_factory
            .build(values.mic_input_type, &values.mic_input_device)
        {
            Ok(mic) => mic,
            Err(e) => {
                warn!("{e}; registering a silent microphone instead");
                Arc::new(NullMic::new())
            }
        };
        debug!("registering {} microphone", mic.kind());
        self.microphones.register(mic);
    }
}
