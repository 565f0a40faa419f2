//! Recording collaborators for tests.
//!
//! # Why recording doubles?
//!
//! The real collaborators (GPU renderer, DSP audio output, HLE services) need
//! a running emulated system.  These doubles replace them with in-memory
//! recording so tests can inspect exactly what [`ApplyEngine`] pushed, and in
//! what state each subsystem ended up.
//!
//! # Usage in tests
//!
//! ```ignore
//! let system = Arc::new(MockSystem::full_session());
//! let engine = ApplyEngine::new(..., Arc::clone(&system) as Arc<dyn EmulatedSystem>, ...);
//!
//! engine.apply(&values);
//!
//! assert_eq!(system.hid.as_ref().unwrap().reload_count(), 1);
//! ```
//!
//! [`ApplyEngine`]: crate::application::apply::ApplyEngine

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use emu_settings_core::MicInputType;

use crate::application::apply::{
    AudioSink, CameraReloadable, DebugServer, EmulatedSystem, InputReloadable, IrService, Renderer,
};
use crate::application::microphone::{
    MicFactory, MicParameters, Microphone, NullMic,
};

/// Records every call made to the debug server.
#[derive(Default)]
pub struct RecordingDebugServer {
    pub ports: Mutex<Vec<u16>>,
    pub enabled: Mutex<Vec<bool>>,
}

impl RecordingDebugServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls of either method.
    pub fn call_count(&self) -> usize {
        self.ports.lock().unwrap().len() + self.enabled.lock().unwrap().len()
    }

    /// The last `(port, enabled)` pair pushed, if any.
    pub fn last_state(&self) -> Option<(u16, bool)> {
        let port = *self.ports.lock().unwrap().last()?;
        let enabled = *self.enabled.lock().unwrap().last()?;
        Some((port, enabled))
    }
}

impl DebugServer for RecordingDebugServer {
    fn set_port(&self, port: u16) {
        self.ports.lock().unwrap().push(port);
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.lock().unwrap().push(enabled);
    }
}

/// Counts framebuffer layout recomputations.
#[derive(Default)]
pub struct RecordingRenderer {
    layout_updates: Mutex<u32>,
}

impl RecordingRenderer {
    pub fn layout_updates(&self) -> u32 {
        *self.layout_updates.lock().unwrap()
    }
}

impl Renderer for RecordingRenderer {
    fn recompute_layout(&self) {
        *self.layout_updates.lock().unwrap() += 1;
    }
}

/// Records sink selections and stretching toggles.
#[derive(Default)]
pub struct RecordingAudioSink {
    pub selections: Mutex<Vec<(String, String)>>,
    pub stretching: Mutex<Vec<bool>>,
}

impl RecordingAudioSink {
    pub fn call_count(&self) -> usize {
        self.selections.lock().unwrap().len() + self.stretching.lock().unwrap().len()
    }

    /// The last `(sink_id, device_id, stretching)` pushed, if any.
    pub fn last_state(&self) -> Option<(String, String, bool)> {
        let (sink, device) = self.selections.lock().unwrap().last()?.clone();
        let stretching = *self.stretching.lock().unwrap().last()?;
        Some((sink, device, stretching))
    }
}

impl AudioSink for RecordingAudioSink {
    fn select(&self, sink_id: &str, device_id: &str) {
        self.selections
            .lock()
            .unwrap()
            .push((sink_id.to_string(), device_id.to_string()));
    }

    fn set_stretching_enabled(&self, enabled: bool) {
        self.stretching.lock().unwrap().push(enabled);
    }
}

/// Counts device reloads; stands in for the HID, IR and camera modules.
#[derive(Default)]
pub struct RecordingReloadable {
    reloads: Mutex<u32>,
}

impl RecordingReloadable {
    pub fn reload_count(&self) -> u32 {
        *self.reloads.lock().unwrap()
    }

    fn bump(&self) {
        *self.reloads.lock().unwrap() += 1;
    }
}

impl InputReloadable for RecordingReloadable {
    fn reload_input_devices(&self) {
        self.bump();
    }
}

impl CameraReloadable for RecordingReloadable {
    fn reload_camera_devices(&self) {
        self.bump();
    }
}

/// A configurable emulated system whose subsystems are recording doubles.
///
/// Subsystem fields are `None` when that subsystem should appear absent.
#[derive(Default)]
pub struct MockSystem {
    powered_on: AtomicBool,
    /// Number of times [`EmulatedSystem::audio_sink`] or any input accessor was called.
    session_queries: Mutex<u32>,
    pub renderer: Option<Arc<RecordingRenderer>>,
    pub audio: Option<Arc<RecordingAudioSink>>,
    pub hid: Option<Arc<RecordingReloadable>>,
    pub ir_user: Option<Arc<RecordingReloadable>>,
    pub ir_rst: Option<Arc<RecordingReloadable>>,
    pub camera: Option<Arc<RecordingReloadable>>,
}

impl MockSystem {
    /// No renderer, no session, no services.
    pub fn powered_off() -> Self {
        Self::default()
    }

    /// A running session with a renderer and every service instantiated.
    pub fn full_session() -> Self {
        Self {
            powered_on: AtomicBool::new(true),
            session_queries: Mutex::new(0),
            renderer: Some(Arc::default()),
            audio: Some(Arc::default()),
            hid: Some(Arc::default()),
            ir_user: Some(Arc::default()),
            ir_rst: Some(Arc::default()),
            camera: Some(Arc::default()),
        }
    }

    pub fn set_powered_on(&self, on: bool) {
        self.powered_on.store(on, Ordering::Relaxed);
    }

    /// How often session-gated subsystems were looked up.
    pub fn session_queries(&self) -> u32 {
        *self.session_queries.lock().unwrap()
    }

    fn query(&self) {
        *self.session_queries.lock().unwrap() += 1;
    }
}

impl EmulatedSystem for MockSystem {
    fn is_powered_on(&self) -> bool {
        self.powered_on.load(Ordering::Relaxed)
    }

    fn renderer(&self) -> Option<Arc<dyn Renderer>> {
        self.renderer
            .as_ref()
            .map(|r| Arc::clone(r) as Arc<dyn Renderer>)
    }

    fn audio_sink(&self) -> Option<Arc<dyn AudioSink>> {
        self.query();
        self.audio.as_ref().map(|a| Arc::clone(a) as Arc<dyn AudioSink>)
    }

    fn hid_module(&self) -> Option<Arc<dyn InputReloadable>> {
        self.query();
        self.hid
            .as_ref()
            .map(|h| Arc::clone(h) as Arc<dyn InputReloadable>)
    }

    fn ir_service(&self, service: IrService) -> Option<Arc<dyn InputReloadable>> {
        self.query();
        let ir = match service {
            IrService::User => &self.ir_user,
            IrService::Rst => &self.ir_rst,
        };
        ir.as_ref().map(|s| Arc::clone(s) as Arc<dyn InputReloadable>)
    }

    fn camera_module(&self) -> Option<Arc<dyn CameraReloadable>> {
        self.query();
        self.camera
            .as_ref()
            .map(|c| Arc::clone(c) as Arc<dyn CameraReloadable>)
    }
}

/// Stand-in for a host capture backend; behaves like a silent microphone
/// but reports itself as live capture.
#[derive(Default)]
pub struct FakeLiveMic {
    inner: NullMic,
    /// Host device name the microphone was opened for.
    pub device: String,
}

impl FakeLiveMic {
    pub fn new(device: &str) -> Self {
        Self {
            inner: NullMic::new(),
            device: device.to_string(),
        }
    }
}

impl Microphone for FakeLiveMic {
    fn kind(&self) -> MicInputType {
        MicInputType::Real
    }

    fn start_sampling(&self, params: MicParameters) {
        self.inner.start_sampling(params);
    }

    fn stop_sampling(&self) {
        self.inner.stop_sampling();
    }

    fn is_sampling(&self) -> bool {
        self.inner.is_sampling()
    }

    fn adjust_sample_rate(&self, sample_rate: u32) {
        self.inner.adjust_sample_rate(sample_rate);
    }

    fn read(&self) -> Vec<u8> {
        self.inner.read()
    }
}

/// A factory whose `Real` mode builds [`FakeLiveMic`]s.
pub fn fake_live_mic_factory() -> MicFactory {
    MicFactory::with_live_capture(|device| Arc::new(FakeLiveMic::new(device)) as Arc<dyn Microphone>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powered_off_system_has_nothing() {
        let system = MockSystem::powered_off();
        assert!(!system.is_powered_on());
        assert!(system.renderer().is_none());
        assert!(system.audio_sink().is_none());
    }

    #[test]
    fn test_full_session_exposes_every_subsystem() {
        let system = MockSystem::full_session();
        assert!(system.is_powered_on());
        assert!(system.renderer().is_some());
        assert!(system.audio_sink().is_some());
        assert!(system.hid_module().is_some());
        assert!(system.ir_service(IrService::User).is_some());
        assert!(system.ir_service(IrService::Rst).is_some());
        assert!(system.camera_module().is_some());
        assert_eq!(system.session_queries(), 5);
    }

    #[test]
    fn test_recording_reloadable_counts_both_kinds_of_reload() {
        let reloadable = RecordingReloadable::default();
        reloadable.reload_input_devices();
        reloadable.reload_camera_devices();
        assert_eq!(reloadable.reload_count(), 2);
    }

    #[test]
    fn test_fake_live_mic_factory_builds_real_kind() {
        let factory = fake_live_mic_factory();
        let mic = factory.build(MicInputType::Real, "Headset").unwrap();
        assert_eq!(mic.kind(), MicInputType::Real);
    }
}
