//! LogSettings: writes the configuration dump to a diagnostic sink.
//!
//! The record names and their order come from
//! [`setting_records`](emu_settings_core::setting_records); this module only
//! delivers them.  Logging never fails and returns nothing.

use emu_settings_core::{setting_records, Values};

/// Header line written before the records.
pub const DUMP_HEADER: &str = "Emulator configuration:";

/// Destination for the configuration dump.
pub trait DiagnosticLog {
    /// Receives the header line that precedes the records.
    fn header(&mut self, text: &str);

    /// Receives one `name: value` record.
    fn record(&mut self, name: &str, value: &str);
}

/// Writes the header and every setting record to `log`, in dump order.
pub fn log_settings(values: &Values, log: &mut dyn DiagnosticLog) {
    log.header(DUMP_HEADER);
    for record in setting_records(values) {
        log.record(record.name, &record.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect {
        headers: Vec<String>,
        lines: Vec<(String, String)>,
    }

    impl DiagnosticLog for Collect {
        fn header(&mut self, text: &str) {
            self.headers.push(text.to_string());
        }

        fn record(&mut self, name: &str, value: &str) {
            self.lines.push((name.to_string(), value.to_string()));
        }
    }

    #[test]
    fn test_log_settings_writes_header_once_then_records() {
        let mut log = Collect::default();

        log_settings(&Values::default(), &mut log);

        assert_eq!(log.headers, [DUMP_HEADER]);
        assert_eq!(log.lines.len(), 34);
        assert_eq!(log.lines[0], ("Core_UseCpuJit".into(), "true".into()));
    }

    #[test]
    fn test_log_settings_delivers_records_in_dump_order() {
        let values = Values {
            enable_audio_stretching: false,
            use_frame_limit: false,
            ..Values::default()
        };
        let mut log = Collect::default();

        log_settings(&values, &mut log);

        let expected: Vec<(String, String)> = setting_records(&values)
            .into_iter()
            .map(|r| (r.name.to_string(), r.value))
            .collect();
        assert_eq!(log.lines, expected);
        let names: Vec<&str> = log.lines[8..11].iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["Renderer_VsyncEnabled", "Renderer_UseFrameLimit", "Renderer_FrameLimit"]
        );
        let names: Vec<&str> = log.lines[17..20].iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["Audio_OutputEngine", "Audio_EnableAudioStretching", "Audio_OutputDevice"]
        );
    }

    #[test]
    fn test_log_settings_order_is_stable_across_calls() {
        let values = Values {
            sink_id: "sdl2".to_string(),
            ..Values::default()
        };
        let mut first = Collect::default();
        let mut second = Collect::default();

        log_settings(&values, &mut first);
        log_settings(&values, &mut second);

        assert_eq!(first.lines, second.lines);
    }
}
