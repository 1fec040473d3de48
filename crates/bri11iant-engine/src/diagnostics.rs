//! Diagnostics wire model
//!
//! Shapes follow the language-server protocol so a transport can forward
//! them unchanged.

use bri11iant_a11y::Severity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `source` of every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "bri11iant";

/// Zero-based line and UTF-16 column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(serialize_with = "serialize_severity", deserialize_with = "deserialize_severity")]
    pub severity: Severity,
    pub message: String,
    pub range: Range,
    pub code: u32,
    pub source: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, range: Range) -> Self {
        Self {
            severity,
            message: message.into(),
            range,
            code: 0,
            source: DIAGNOSTIC_SOURCE.to_string(),
        }
    }

    /// Two diagnostics are the same problem when message and range agree
    pub fn same_problem(&self, other: &Diagnostic) -> bool {
        self.message == other.message && self.range == other.range
    }
}

/// Outbound notification replacing all diagnostics of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishDiagnostics {
    pub uri: String,
    pub diagnostics: Vec<Diagnostic>,
}

fn serialize_severity<S: Serializer>(severity: &Severity, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(severity.as_u8())
}

fn deserialize_severity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Severity, D::Error> {
    match u8::deserialize(deserializer)? {
        1 => Ok(Severity::Error),
        2 => Ok(Severity::Warning),
        3 => Ok(Severity::Information),
        4 => Ok(Severity::Hint),
        other => Err(serde::de::Error::custom(format!("invalid severity {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let diagnostic = Diagnostic::new(
            Severity::Warning,
            "Provide a descriptive text in between the tags",
            Range::new(Position::new(3, 4), Position::new(3, 20)),
        );
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(
            value,
            json!({
                "severity": 2,
                "message": "Provide a descriptive text in between the tags",
                "range": {
                    "start": { "line": 3, "character": 4 },
                    "end": { "line": 3, "character": 20 }
                },
                "code": 0,
                "source": "bri11iant"
            })
        );
        let back: Diagnostic = serde_json::from_value(value).unwrap();
        assert_eq!(back, diagnostic);
    }

    #[test]
    fn test_invalid_severity() {
        let value = json!({
            "severity": 9, "message": "", "code": 0, "source": "bri11iant",
            "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 0 } }
        });
        assert!(serde_json::from_value::<Diagnostic>(value).is_err());
    }

    #[test]
    fn test_same_problem() {
        let range = Range::default();
        let a = Diagnostic::new(Severity::Error, "x", range);
        let b = Diagnostic::new(Severity::Hint, "x", range);
        assert!(a.same_problem(&b));
        assert!(range.is_empty());
    }
}
