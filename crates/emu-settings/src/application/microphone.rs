//! Emulated microphone frontends and the factory that picks one.
//!
//! The emulated console's microphone service pulls samples from whichever
//! [`Microphone`] is currently registered.  Three modes exist, mirroring
//! [`MicInputType`]:
//!
//! | Mode     | Implementation          | Availability                         |
//! |----------|-------------------------|--------------------------------------|
//! | `None`   | [`NullMic`]             | always                               |
//! | `Static` | [`StaticMic`]           | always                               |
//! | `Real`   | injected live backend   | only if a capture backend was wired  |
//!
//! # Lifetime of a replaced microphone
//!
//! Microphones are shared as `Arc<dyn Microphone>`.  A capture callback that
//! is reading from the old instance holds its own clone, so registering a new
//! microphone never frees an instance that is still in use; it is dropped
//! when the last reader lets go.

use std::sync::{Arc, Mutex, PoisonError};

use emu_settings_core::MicInputType;
use thiserror::Error;

/// Error type for microphone construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MicError {
    /// No backend for this mode was compiled in or wired up.
    #[error("microphone backend for mode '{0}' is not available")]
    Unavailable(MicInputType),
}

/// Encoding of the samples returned by [`Microphone::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSign {
    Signed,
    Unsigned,
}

/// Sampling parameters requested by the emulated microphone service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicParameters {
    /// Bits per sample, 8 or 16.
    pub sample_size: u8,
    pub sign: SampleSign,
    pub sample_rate: u32,
    /// Number of bytes returned by each [`Microphone::read`].
    pub buffer_size: usize,
}

impl Default for MicParameters {
    fn default() -> Self {
        Self {
            sample_size: 16,
            sign: SampleSign::Signed,
            sample_rate: 32_728,
            buffer_size: 0x1000,
        }
    }
}

/// A source of microphone samples.
///
/// Implementations are shared between the registry and the capture path, so
/// every method takes `&self` and uses interior mutability.
pub trait Microphone: Send + Sync {
    /// The configuration mode this implementation serves.
    fn kind(&self) -> MicInputType;

    /// Begins sampling with `params`.
    fn start_sampling(&self, params: MicParameters);

    /// Stops sampling; [`read`](Self::read) returns nothing until restarted.
    fn stop_sampling(&self);

    /// Returns `true` between `start_sampling` and `stop_sampling`.
    fn is_sampling(&self) -> bool;

    /// Changes the sample rate of an active sampling session.
    fn adjust_sample_rate(&self, sample_rate: u32);

    /// Returns the next buffer of samples, or an empty buffer when idle.
    fn read(&self) -> Vec<u8>;
}

/// The single globally registered microphone.
#[cfg_attr(test, mockall::automock)]
pub trait MicrophoneRegistry: Send + Sync {
    /// Replaces the registered microphone with `mic`.
    fn register(&self, mic: Arc<dyn Microphone>);
}

// ── Built-in microphones ──────────────────────────────────────────────────────

/// Shared sampling state for the built-in microphones.
#[derive(Default)]
struct SamplingState {
    params: Mutex<Option<MicParameters>>,
}

impl SamplingState {
    fn start(&self, params: MicParameters) {
        *self.lock() = Some(params);
    }

    fn stop(&self) {
        *self.lock() = None;
    }

    fn current(&self) -> Option<MicParameters> {
        *self.lock()
    }

    fn set_rate(&self, sample_rate: u32) {
        if let Some(params) = self.lock().as_mut() {
            params.sample_rate = sample_rate;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<MicParameters>> {
        self.params.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Encodes silence for the given sample format.
fn silence(params: &MicParameters) -> Vec<u8> {
    match (params.sign, params.sample_size) {
        (SampleSign::Signed, _) => vec![0; params.buffer_size],
        (SampleSign::Unsigned, 8) => vec![0x80; params.buffer_size],
        // Unsigned 16-bit midpoint 0x8000, little-endian.
        (SampleSign::Unsigned, _) => (0..params.buffer_size)
            .map(|i| if i % 2 == 0 { 0x00 } else { 0x80 })
            .collect(),
    }
}

/// Microphone that always reports silence.
#[derive(Default)]
pub struct NullMic {
    state: SamplingState,
}

impl NullMic {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Microphone for NullMic {
    fn kind(&self) -> MicInputType {
        MicInputType::None
    }

    fn start_sampling(&self, params: MicParameters) {
        self.state.start(params);
    }

    fn stop_sampling(&self) {
        self.state.stop();
    }

    fn is_sampling(&self) -> bool {
        self.state.current().is_some()
    }

    fn adjust_sample_rate(&self, sample_rate: u32) {
        self.state.set_rate(sample_rate);
    }

    fn read(&self) -> Vec<u8> {
        self.state
            .current()
            .map(|params| silence(&params))
            .unwrap_or_default()
    }
}

/// Length of the precomputed noise buffer used by [`StaticMic`].
const NOISE_LEN: usize = 1024;

/// Microphone that plays back a fixed noise buffer, for titles that refuse to
/// continue while the microphone is silent.
pub struct StaticMic {
    state: SamplingState,
    noise: Vec<u8>,
}

impl StaticMic {
    pub fn new() -> Self {
        Self {
            state: SamplingState::default(),
            noise: noise_table(),
        }
    }
}

impl Default for StaticMic {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic xorshift noise, one unsigned 8-bit sample per byte.
fn noise_table() -> Vec<u8> {
    let mut x: u32 = 0x2545_F491;
    (0..NOISE_LEN)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        })
        .collect()
}

impl Microphone for StaticMic {
    fn kind(&self) -> MicInputType {
        MicInputType::Static
    }

    fn start_sampling(&self, params: MicParameters) {
        self.state.start(params);
    }

    fn stop_sampling(&self) {
        self.state.stop();
    }

    fn is_sampling(&self) -> bool {
        self.state.current().is_some()
    }

    fn adjust_sample_rate(&self, sample_rate: u32) {
        self.state.set_rate(sample_rate);
    }

    fn read(&self) -> Vec<u8> {
        let Some(params) = self.state.current() else {
            return Vec::new();
        };
        let samples = self.noise.iter().cycle();
        match (params.sign, params.sample_size) {
            (SampleSign::Unsigned, 8) => samples.take(params.buffer_size).copied().collect(),
            (SampleSign::Signed, 8) => samples
                .take(params.buffer_size)
                .map(|s| s ^ 0x80)
                .collect(),
            (sign, _) => samples
                .flat_map(|s| {
                    let wide = u16::from(*s) << 8;
                    let wide = match sign {
                        SampleSign::Unsigned => wide,
                        SampleSign::Signed => wide ^ 0x8000,
                    };
                    wide.to_le_bytes()
                })
                .take(params.buffer_size)
                .collect(),
        }
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Builds a live-capture microphone for the named host input device.
pub type LiveMicBuilder = Box<dyn Fn(&str) -> Arc<dyn Microphone> + Send + Sync>;

/// Maps each [`MicInputType`] to a freshly constructed [`Microphone`].
///
/// The live-capture backend is optional: frontends built with a host audio
/// capture library pass a builder through [`with_live_capture`](Self::with_live_capture);
/// without one, `Real` yields [`MicError::Unavailable`].
#[derive(Default)]
pub struct MicFactory {
    live_capture: Option<LiveMicBuilder>,
}

impl MicFactory {
    /// Creates a factory with only the built-in microphones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory that builds live-capture microphones with `builder`.
    pub fn with_live_capture<F>(builder: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Microphone> + Send + Sync + 'static,
    {
        Self {
            live_capture: Some(Box::new(builder)),
        }
    }

    /// Returns `true` if `Real` mode can be served.
    pub fn has_live_capture(&self) -> bool {
        self.live_capture.is_some()
    }

    /// Constructs a new microphone for `kind`.
    ///
    /// `device` names the host input device and is only used by `Real`.
    ///
    /// # Errors
    ///
    /// Returns [`MicError::Unavailable`] for `Real` when no live backend is wired.
    pub fn build(&self, kind: MicInputType, device: &str) -> Result<Arc<dyn Microphone>, MicError> {
        match kind {
            MicInputType::None => Ok(Arc::new(NullMic::new())),
            MicInputType::Static => Ok(Arc::new(StaticMic::new())),
            MicInputType::Real => self
                .live_capture
                .as_ref()
                .map(|builder| builder(device))
                .ok_or(MicError::Unavailable(MicInputType::Real)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sample_size: u8, sign: SampleSign, buffer_size: usize) -> MicParameters {
        MicParameters {
            sample_size,
            sign,
            sample_rate: 32_728,
            buffer_size,
        }
    }

    // ── NullMic ───────────────────────────────────────────────────────────────

    #[test]
    fn test_null_mic_reads_nothing_while_idle() {
        let mic = NullMic::new();
        assert!(!mic.is_sampling());
        assert!(mic.read().is_empty());
    }

    #[test]
    fn test_null_mic_signed_silence_is_zero() {
        let mic = NullMic::new();
        mic.start_sampling(params(16, SampleSign::Signed, 8));
        assert_eq!(mic.read(), vec![0; 8]);
    }

    #[test]
    fn test_null_mic_unsigned_silence_is_midpoint() {
        let mic = NullMic::new();
        mic.start_sampling(params(8, SampleSign::Unsigned, 4));
        assert_eq!(mic.read(), vec![0x80; 4]);

        mic.start_sampling(params(16, SampleSign::Unsigned, 4));
        assert_eq!(mic.read(), vec![0x00, 0x80, 0x00, 0x80]);
    }

    #[test]
    fn test_stop_sampling_ends_session() {
        let mic = NullMic::new();
        mic.start_sampling(MicParameters::default());
        mic.stop_sampling();
        assert!(!mic.is_sampling());
        assert!(mic.read().is_empty());
    }

    // ── StaticMic ─────────────────────────────────────────────────────────────

    #[test]
    fn test_static_mic_returns_requested_buffer_size() {
        let mic = StaticMic::new();
        mic.start_sampling(params(16, SampleSign::Signed, 3000));
        assert_eq!(mic.read().len(), 3000);
    }

    #[test]
    fn test_static_mic_is_not_silent() {
        let mic = StaticMic::new();
        mic.start_sampling(params(8, SampleSign::Unsigned, 64));
        let samples = mic.read();
        assert!(samples.iter().any(|s| *s != samples[0]));
    }

    #[test]
    fn test_static_mic_reads_are_repeatable() {
        let mic = StaticMic::new();
        mic.start_sampling(params(8, SampleSign::Signed, 128));
        assert_eq!(mic.read(), mic.read());
    }

    #[test]
    fn test_adjust_sample_rate_only_applies_while_sampling() {
        let state = SamplingState::default();
        state.set_rate(16_364);
        assert_eq!(state.current(), None);

        state.start(MicParameters::default());
        state.set_rate(16_364);
        assert_eq!(state.current().unwrap().sample_rate, 16_364);
    }

    // ── MicFactory ────────────────────────────────────────────────────────────

    #[test]
    fn test_factory_builds_builtin_kinds() {
        let factory = MicFactory::new();
        assert_eq!(
            factory.build(MicInputType::None, "").unwrap().kind(),
            MicInputType::None
        );
        assert_eq!(
            factory.build(MicInputType::Static, "").unwrap().kind(),
            MicInputType::Static
        );
    }

    #[test]
    fn test_factory_without_live_backend_reports_unavailable() {
        let factory = MicFactory::new();
        assert!(!factory.has_live_capture());
        assert_eq!(
            factory.build(MicInputType::Real, "Default").err(),
            Some(MicError::Unavailable(MicInputType::Real))
        );
    }

    #[test]
    fn test_factory_passes_device_name_to_live_backend() {
        let seen = Arc::new(Mutex::new(String::new()));
        let seen_clone = Arc::clone(&seen);
        let factory = MicFactory::with_live_capture(move |device| {
            *seen_clone.lock().unwrap() = device.to_string();
            Arc::new(NullMic::new()) as Arc<dyn Microphone>
        });

        factory.build(MicInputType::Real, "USB Headset").unwrap();

        assert!(factory.has_live_capture());
        assert_eq!(*seen.lock().unwrap(), "USB Headset");
    }

    #[test]
    fn test_factory_builds_a_new_instance_each_call() {
        let factory = MicFactory::new();
        let a = factory.build(MicInputType::Static, "").unwrap();
        let b = factory.build(MicInputType::Static, "").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
