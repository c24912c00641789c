//! Debug dumps
//!
//! `dump` writes a human-readable rendering of a collection to the configured
//! sink. `dd` does the same and then hands the caller a [`Halt`] signal
//! instead of ending the process itself; a binary that wants the classic
//! dump-and-die behaviour calls [`Halt::exit`].

use std::io::{self, Write};

use crate::config::{DumpConfig, DumpFormat, DumpTarget};
use crate::error::{CollectionError, CollectionResult};
use crate::payload::{Payload, Variant};

/// Render a payload for a dump
pub fn render(config: &DumpConfig, variant: Variant, length: usize, payload: &Payload) -> String {
    let body = match config.format {
        DumpFormat::Pretty => serde_json::to_string_pretty(payload),
        DumpFormat::Compact => serde_json::to_string(payload),
    }
    .unwrap_or_else(|_| format!("{payload:?}"));

    if config.header {
        format!("{variant}({length}) {body}")
    } else {
        body
    }
}

/// Write a rendered dump, newline-terminated, to `sink`
pub fn write_to(
    sink: &mut dyn Write,
    config: &DumpConfig,
    variant: Variant,
    length: usize,
    payload: &Payload,
) -> CollectionResult<()> {
    let rendered = render(config, variant, length, payload);
    tracing::trace!(%variant, length, bytes = rendered.len(), "writing collection dump");
    writeln!(sink, "{rendered}").map_err(|e| CollectionError::dump(&e))?;
    sink.flush().map_err(|e| CollectionError::dump(&e))
}

/// Run `write` against the sink selected by `config`
pub fn with_target<F>(config: &DumpConfig, write: F) -> CollectionResult<()>
where
    F: FnOnce(&mut dyn Write) -> CollectionResult<()>,
{
    match config.target {
        DumpTarget::Stdout => write(&mut io::stdout().lock()),
        DumpTarget::Stderr => write(&mut io::stderr().lock()),
    }
}

/// Termination signal returned by `dd`
#[must_use = "`dd` only signals termination; return early or call `Halt::exit`"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    code: i32,
}

impl Halt {
    /// Create a halt signal carrying a process exit code
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Exit code the process should end with
    #[must_use]
    pub const fn code(self) -> i32 {
        self.code
    }

    /// End the process with the carried exit code
    pub fn exit(self) -> ! {
        std::process::exit(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_render_with_header() {
        let payload = Payload::from(json!([1, 2]));
        let rendered = render(&DumpConfig::default(), Variant::Items, 2, &payload);
        assert_eq!(rendered, "items(2) [\n  1,\n  2\n]");
    }

    #[test]
    fn compact_render_without_header() {
        let config = DumpConfig {
            format: DumpFormat::Compact,
            header: false,
            ..DumpConfig::default()
        };
        let payload = Payload::from(json!({"a": [1, 2]}));
        assert_eq!(render(&config, Variant::Map, 1, &payload), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn opaque_payload_falls_back_to_debug() {
        let config = DumpConfig {
            header: false,
            ..DumpConfig::default()
        };
        let payload = Payload::opaque(3_u16);
        assert_eq!(render(&config, Variant::Base, 1, &payload), "Opaque(Opaque(u16))");
    }

    #[test]
    fn write_to_appends_a_newline() {
        let mut sink = Vec::new();
        let payload = Payload::from(json!([[1], [2]]));
        let config = DumpConfig {
            format: DumpFormat::Compact,
            ..DumpConfig::default()
        };
        write_to(&mut sink, &config, Variant::Matrix, 2, &payload).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "matrix(2) [[1],[2]]\n");
    }

    #[test]
    fn halt_carries_its_code() {
        assert_eq!(Halt::new(3).code(), 3);
    }
}
