use serde::Serialize;
use std::io::{self, Write};

use super::format::StatusClass;

/// Separates tooltip segments; the status bar renders it as a line break
pub const TOOLTIP_SEPARATOR: &str = "\r";

/// Written if serialization ever fails, so the bar always gets valid JSON
const FALLBACK_LINE: &str =
    r#"{"text":"--","tooltip":"Error: failed to serialize status","class":"error","percentage":0,"alt":"error"}"#;

/// The JSON object a status-bar custom module consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub text: String,
    pub tooltip: String,
    pub class: StatusClass,
    pub percentage: u8,
    pub alt: String,
}

impl Payload {
    /// Compact single-line JSON
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("Failed to serialize payload: {e}");
            FALLBACK_LINE.to_string()
        })
    }
}

pub fn join_tooltip<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(TOOLTIP_SEPARATOR)
}

/// Write the payload as one newline-free line and flush immediately
pub fn emit_to<W: Write>(payload: &Payload, out: &mut W) -> io::Result<()> {
    write!(out, "{}", payload.to_line())?;
    out.flush()
}

/// Write the payload to stdout; failures are logged, never raised
pub fn emit(payload: &Payload) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = emit_to(payload, &mut out) {
        log::error!("Failed to write status payload: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> Payload {
        Payload {
            text: "D 45% · W 10%".to_string(),
            tooltip: join_tooltip(&["Daily used: 45%", "Weekly used: 10%"]),
            class: StatusClass::Ok,
            percentage: 45,
            alt: "codex".to_string(),
        }
    }

    #[test]
    fn test_to_line_is_compact_and_ordered() {
        let line = payload().to_line();
        assert_eq!(
            line,
            r#"{"text":"D 45% · W 10%","tooltip":"Daily used: 45%\rWeekly used: 10%","class":"ok","percentage":45,"alt":"codex"}"#
        );
    }

    #[test]
    fn test_emit_writes_one_newline_free_line() {
        let mut out = Vec::new();
        emit_to(&payload(), &mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(!written.contains('\n'));
        assert_eq!(written, payload().to_line());

        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["percentage"], 45);
    }

    #[test]
    fn test_fallback_line_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(FALLBACK_LINE).unwrap();
        assert_eq!(value["class"], "error");
    }
}
