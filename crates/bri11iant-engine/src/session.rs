//! Editor sessions
//!
//! [`LintServer`] is the surface a protocol transport drives: it tracks
//! open documents, runs one validation pass per document on the smol
//! executor and publishes the results. A newer change to a document cancels
//! its running pass, and a generation number keeps a pass that already
//! finished from publishing over a newer one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bri11iant_a11y::ImageClassifier;
use bri11iant_net::ResourceLoader;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, SETTINGS_SECTION, Settings};
use crate::diagnostics::{Diagnostic, PublishDiagnostics};
use crate::locate::LineIndex;
use crate::telemetry::{HttpTelemetry, TelemetryReport, TelemetrySink};
use crate::validate::Validator;

/// `TextDocumentSyncKind.Full`
pub const TEXT_DOCUMENT_SYNC_FULL: u8 = 1;

/// What the editor supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientCapabilities {
    /// `workspace/configuration` requests
    pub workspace_configuration: bool,
}

/// What the server offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    pub text_document_sync: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_provider: Option<serde_json::Value>,
}

/// Full content of an open document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocument {
    pub uri: String,
    #[serde(default)]
    pub version: i32,
    pub text: String,
}

impl TextDocument {
    pub fn new(uri: impl Into<String>, version: i32, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            version,
            text: text.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Client does not support configuration requests")]
    Unsupported,

    #[error("Configuration request failed: {0}")]
    Failed(String),
}

/// Source of per-document settings (`workspace/configuration`)
#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    async fn configuration(&self, uri: &str, section: &str) -> Result<serde_json::Value, ConfigurationError>;
}

/// Outbound notifications
pub trait DiagnosticPublisher: Send + Sync {
    /// Replace all diagnostics of a document
    fn publish(&self, params: PublishDiagnostics);

    /// Tell the user a document could not be validated at all
    fn notify_error(&self, uri: &str, message: &str);
}

struct OpenDocument {
    text: Arc<str>,
    generation: u64,
    pass: Option<smol::Task<()>>,
    /// Last published diagnostics
    published: Vec<Diagnostic>,
    /// Text whose failure was already reported
    failed_text: Option<Arc<str>>,
}

struct SessionState {
    configuration_capability: bool,
    global_settings: Settings,
    settings_cache: HashMap<String, Settings>,
    documents: HashMap<String, OpenDocument>,
}

struct Inner {
    config: EngineConfig,
    validator: Validator,
    publisher: Arc<dyn DiagnosticPublisher>,
    configuration: Option<Arc<dyn ConfigurationSource>>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    /// Pass generations, unique across documents and reopenings
    generations: AtomicU64,
    state: Mutex<SessionState>,
}

/// Builder for [`LintServer`]
pub struct LintServerBuilder {
    config: EngineConfig,
    publisher: Arc<dyn DiagnosticPublisher>,
    configuration: Option<Arc<dyn ConfigurationSource>>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    classifier: Option<Arc<dyn ImageClassifier>>,
}

impl LintServerBuilder {
    pub fn configuration_source(mut self, source: Arc<dyn ConfigurationSource>) -> Self {
        self.configuration = Some(source);
        self
    }

    /// Overrides the HTTP sink created from `EngineConfig::telemetry_url`
    pub fn telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(sink);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn ImageClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> LintServer {
        let mut validator = Validator::new(&self.config);
        if let Some(classifier) = self.classifier {
            validator = validator.with_classifier(classifier);
        }

        let telemetry = self.telemetry.or_else(|| {
            let url = self.config.telemetry_url.as_deref()?;
            let loader = ResourceLoader::new().with_user_agent(self.config.user_agent.clone());
            Some(Arc::new(HttpTelemetry::new(url, loader)) as Arc<dyn TelemetrySink>)
        });

        let state = SessionState {
            configuration_capability: false,
            global_settings: self.config.default_settings,
            settings_cache: HashMap::new(),
            documents: HashMap::new(),
        };

        LintServer {
            inner: Arc::new(Inner {
                config: self.config,
                validator,
                publisher: self.publisher,
                configuration: self.configuration,
                telemetry,
                generations: AtomicU64::new(0),
                state: Mutex::new(state),
            }),
        }
    }
}

/// Accessibility lint server
#[derive(Clone)]
pub struct LintServer {
    inner: Arc<Inner>,
}

impl LintServer {
    pub fn builder(config: EngineConfig, publisher: Arc<dyn DiagnosticPublisher>) -> LintServerBuilder {
        LintServerBuilder {
            config,
            publisher,
            configuration: None,
            telemetry: None,
            classifier: None,
        }
    }

    pub fn new(config: EngineConfig, publisher: Arc<dyn DiagnosticPublisher>) -> Self {
        Self::builder(config, publisher).build()
    }

    pub fn initialize(&self, capabilities: ClientCapabilities) -> ServerCapabilities {
        tracing::info!("bri11iant {} initialized", crate::VERSION);
        self.inner.lock().configuration_capability = capabilities.workspace_configuration;
        ServerCapabilities {
            text_document_sync: TEXT_DOCUMENT_SYNC_FULL,
            completion_provider: None,
        }
    }

    pub fn did_open(&self, document: TextDocument) {
        self.update(document);
    }

    pub fn did_change(&self, document: TextDocument) {
        self.update(document);
    }

    /// Forget the document, cancel its pass and clear its diagnostics
    pub fn did_close(&self, uri: &str) {
        let mut state = self.inner.lock();
        state.documents.remove(uri);
        state.settings_cache.remove(uri);
        self.inner.publisher.publish(PublishDiagnostics {
            uri: uri.to_string(),
            diagnostics: Vec::new(),
        });
    }

    /// `settings` is the notification payload holding the `bri11iant`
    /// section. Every open document is validated again.
    pub fn did_change_configuration(&self, settings: Option<serde_json::Value>) {
        let mut state = self.inner.lock();
        if state.configuration_capability {
            state.settings_cache.clear();
        } else {
            let section = settings.as_ref().and_then(|s| s.get(SETTINGS_SECTION));
            state.global_settings = Settings::from_value_or(section, self.inner.config.default_settings);
        }

        let uris: Vec<String> = state.documents.keys().cloned().collect();
        for uri in uris {
            self.inner.start_pass(&mut state, &uri);
        }
    }

    pub fn is_open(&self, uri: &str) -> bool {
        self.inner.lock().documents.contains_key(uri)
    }

    fn update(&self, document: TextDocument) {
        let mut state = self.inner.lock();
        let text: Arc<str> = Arc::from(document.text);
        match state.documents.get_mut(&document.uri) {
            Some(open) => open.text = text,
            None => {
                state.documents.insert(
                    document.uri.clone(),
                    OpenDocument {
                        text,
                        generation: 0,
                        pass: None,
                        published: Vec::new(),
                        failed_text: None,
                    },
                );
            }
        }
        self.inner.start_pass(&mut state, &document.uri);
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new pass for `uri`, cancelling the running one
    fn start_pass(self: &Arc<Self>, state: &mut SessionState, uri: &str) {
        let Some(open) = state.documents.get_mut(uri) else {
            return;
        };
        open.generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let pass = Arc::clone(self).run_pass(uri.to_string(), Arc::clone(&open.text), open.generation);
        open.pass = Some(smol::spawn(pass));
    }

    async fn run_pass(self: Arc<Self>, uri: String, text: Arc<str>, generation: u64) {
        let settings = self.settings_for(&uri).await;
        tracing::debug!("Validating {} (generation {})", uri, generation);

        let mut progress = |so_far: &[Diagnostic]| self.publish_partial(&uri, generation, so_far);
        let result = self.validator.validate_with(&text, &uri, &settings, &mut progress).await;

        match result {
            Ok(diagnostics) => self.finish(&uri, &text, generation, diagnostics),
            Err(e) => {
                let mut state = self.lock();
                let Some(open) = state.documents.get_mut(&uri).filter(|d| d.generation == generation) else {
                    return;
                };
                if open.failed_text.as_deref() != Some(&*text) {
                    open.failed_text = Some(text);
                    self.publisher.notify_error(&uri, &format!("Could not validate {}: {}", uri, e));
                }
            }
        }
    }

    async fn settings_for(&self, uri: &str) -> Settings {
        let (capability, cached, global) = {
            let state = self.lock();
            (state.configuration_capability, state.settings_cache.get(uri).copied(), state.global_settings)
        };
        if !capability {
            return global;
        }
        if let Some(settings) = cached {
            return settings;
        }
        let Some(source) = &self.configuration else {
            return self.config.default_settings;
        };

        match source.configuration(uri, SETTINGS_SECTION).await {
            Ok(value) => {
                let settings = Settings::from_value_or(Some(&value), self.config.default_settings);
                self.lock().settings_cache.insert(uri.to_string(), settings);
                settings
            }
            Err(e) => {
                tracing::debug!("No settings for {}: {}", uri, e);
                self.config.default_settings
            }
        }
    }

    fn publish_partial(&self, uri: &str, generation: u64, diagnostics: &[Diagnostic]) {
        let state = self.lock();
        if state.documents.get(uri).is_some_and(|d| d.generation == generation) {
            self.publisher.publish(PublishDiagnostics {
                uri: uri.to_string(),
                diagnostics: diagnostics.to_vec(),
            });
        }
    }

    fn finish(&self, uri: &str, text: &str, generation: u64, diagnostics: Vec<Diagnostic>) {
        let fresh: Vec<Diagnostic> = {
            let mut state = self.lock();
            let Some(open) = state.documents.get_mut(uri) else {
                return;
            };
            if open.generation != generation {
                tracing::debug!("Dropping stale pass {} for {}", generation, uri);
                return;
            }

            // each problem is reported once, even when repeated markup
            // produced several identical diagnostics
            let mut fresh: Vec<Diagnostic> = Vec::new();
            for diagnostic in &diagnostics {
                if !open.published.iter().chain(&fresh).any(|p| p.same_problem(diagnostic)) {
                    fresh.push(diagnostic.clone());
                }
            }
            open.published = diagnostics.clone();
            open.failed_text = None;
            self.publisher.publish(PublishDiagnostics {
                uri: uri.to_string(),
                diagnostics,
            });
            fresh
        };

        let Some(telemetry) = &self.telemetry else {
            return;
        };
        let index = LineIndex::new(text);
        for diagnostic in fresh {
            telemetry.report(TelemetryReport {
                html: index.slice(diagnostic.range).to_string(),
                message: diagnostic.message,
                severity: diagnostic.severity.as_u8(),
                user_id: self.config.user_id.clone(),
            });
        }
    }
}
