//! Diagnostic log sinks for the configuration dump.

use tracing::info;

use crate::application::log_settings::DiagnosticLog;

/// Forwards the dump to `tracing` under the `config` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn header(&mut self, text: &str) {
        info!(target: "config", "{text}");
    }

    fn record(&mut self, name: &str, value: &str) {
        info!(target: "config", "{name}: {value}");
    }
}

/// Collects the dump as text lines, e.g. for printing or attaching to a report.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl DiagnosticLog for LineBuffer {
    fn header(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn record(&mut self, name: &str, value: &str) {
        self.lines.push(format!("{name}: {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::log_settings::{log_settings, DUMP_HEADER};
    use emu_settings_core::Values;

    #[test]
    fn test_line_buffer_formats_name_colon_value() {
        let mut buffer = LineBuffer::new();

        log_settings(&Values::default(), &mut buffer);

        let lines = buffer.lines();
        assert_eq!(lines[0], DUMP_HEADER);
        assert_eq!(lines[1], "Core_UseCpuJit: true");
        assert_eq!(lines.last().unwrap(), "Debugging_GdbstubPort: 24689");
    }

    #[test]
    fn test_into_lines_yields_header_and_every_record() {
        let mut buffer = LineBuffer::new();
        log_settings(&Values::default(), &mut buffer);
        let expected = buffer.lines().to_vec();

        let lines = buffer.into_lines();

        assert_eq!(lines.len(), 35);
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_tracing_log_accepts_records_without_subscriber() {
        let mut log = TracingLog;
        log_settings(&Values::default(), &mut log);
    }
}
