//! bri11iant Engine
//!
//! Accessibility linting for HTML documents open in an editor.
//!
//! The engine parses a document, loads its stylesheets, runs the rule
//! catalog over every element and reports each finding as a diagnostic
//! positioned on the offending markup.
//!
//! # Example
//! ```rust,ignore
//! use bri11iant_engine::{EngineConfig, LintServer, TextDocument};
//!
//! let server = LintServer::new(EngineConfig::default(), publisher);
//! server.initialize(Default::default());
//! server.did_open(TextDocument::new("file:///site/index.html", 1, text));
//! ```

mod builder;
mod config;
mod diagnostics;
pub mod locate;
pub mod logging;
mod session;
mod telemetry;
mod validate;

pub use builder::{BuildError, DocumentBuilder, LoadedDocument};
pub use config::{EmissionMode, EngineConfig, SETTINGS_SECTION, Settings};
pub use diagnostics::{DIAGNOSTIC_SOURCE, Diagnostic, Position, PublishDiagnostics, Range};
pub use locate::{LineIndex, Locator};
pub use session::{
    ClientCapabilities, ConfigurationError, ConfigurationSource, DiagnosticPublisher, LintServer,
    LintServerBuilder, ServerCapabilities, TEXT_DOCUMENT_SYNC_FULL, TextDocument,
};
pub use telemetry::{HttpTelemetry, TelemetryReport, TelemetrySink};
pub use validate::{Collector, Validator};

// Re-export sub-crates for advanced usage
pub use bri11iant_a11y as a11y;
pub use bri11iant_css as css;
pub use bri11iant_dom as dom;
pub use bri11iant_html as html;
pub use bri11iant_net as net;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
