//! Findings reported by rule checks

/// Diagnostic severity, numbered like the language-server protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl Severity {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One rule violation found on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
    pub severity: Severity,
    /// Highlight the whole element instead of its opening tag
    pub extended: bool,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            extended: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn information(message: impl Into<String>) -> Self {
        Self::new(Severity::Information, message)
    }

    pub fn hint(message: impl Into<String>) -> Self {
        Self::new(Severity::Hint, message)
    }

    /// Mark the finding as covering the whole element
    pub fn extended(mut self) -> Self {
        self.extended = true;
        self
    }
}
