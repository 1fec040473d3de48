//! Validation Orchestrator
//!
//! One pass: build the document, run every check in dispatch order, map
//! each finding to a source range and collect the resulting diagnostics.

use std::sync::Arc;

use bri11iant_a11y::{BODY_SCOPED, CATALOG, Check, DOCUMENT_WIDE, ImageClassifier, RuleContext};
use bri11iant_dom::{Document, ElementRef};

use crate::builder::{BuildError, DocumentBuilder};
use crate::config::{EmissionMode, EngineConfig, Settings};
use crate::diagnostics::Diagnostic;
use crate::locate::Locator;

/// Capped list of diagnostics
///
/// Identical findings are all kept: repeated markup maps every copy to the
/// first occurrence, and each copy still counts as a problem.
#[derive(Debug)]
pub struct Collector {
    max: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic. Returns false once the cap is reached.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if self.is_full() {
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn is_full(&self) -> bool {
        self.diagnostics.len() >= self.max
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Runs validation passes
#[derive(Clone)]
pub struct Validator {
    builder: DocumentBuilder,
    classifier: Option<Arc<dyn ImageClassifier>>,
    emission: EmissionMode,
}

impl Validator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            builder: DocumentBuilder::new(config),
            classifier: None,
            emission: config.emission,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ImageClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_builder(mut self, builder: DocumentBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn emission(&self) -> EmissionMode {
        self.emission
    }

    /// Validate `text` and return every diagnostic of the pass
    pub async fn validate(&self, text: &str, uri: &str, settings: &Settings) -> Result<Vec<Diagnostic>, BuildError> {
        self.validate_with(text, uri, settings, &mut |_: &[Diagnostic]| {}).await
    }

    /// Validate `text`, handing the growing list to `progress` after each
    /// new diagnostic when emission is incremental
    pub async fn validate_with(
        &self,
        text: &str,
        uri: &str,
        settings: &Settings,
        progress: &mut (dyn FnMut(&[Diagnostic]) + Send),
    ) -> Result<Vec<Diagnostic>, BuildError> {
        let loaded = match self.builder.build(text, uri).await {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!("Validation of {} aborted: {}", uri, e);
                return Err(e);
            }
        };

        let doc = &loaded.document;
        let ctx = RuleContext::new(doc, &loaded.styles).with_classifier(self.classifier.as_deref());
        let locator = Locator::new(text, &loaded.prefix);
        let mut collector = Collector::new(settings.max_number_of_problems);

        for (elem, check) in dispatch_order(doc) {
            if collector.is_full() {
                tracing::debug!("Problem limit of {} reached for {}", settings.max_number_of_problems, uri);
                break;
            }
            let Some(finding) = check.run(elem, &ctx).await else {
                continue;
            };
            let range = locator.locate(doc, &elem, finding.extended);
            let added = collector.push(Diagnostic::new(finding.severity, finding.message, range));
            if added && self.emission == EmissionMode::Incremental {
                progress(collector.diagnostics());
            }
        }

        tracing::debug!("Validated {}: {} diagnostics", uri, collector.len());
        Ok(collector.into_diagnostics())
    }
}

/// Document-wide checks over every element, body-scoped checks over the
/// body's descendants, then the catalog in order
fn dispatch_order(doc: &Document) -> impl Iterator<Item = (ElementRef<'_>, &'static Check)> + Send + '_ {
    let body = doc.body();

    let document_wide = doc
        .elements()
        .flat_map(|elem| DOCUMENT_WIDE.iter().map(move |check| (elem, check)));

    let body_scoped = doc
        .elements()
        .filter(move |elem| body.is_valid() && elem.is_descendant_of(body))
        .flat_map(|elem| BODY_SCOPED.iter().map(move |check| (elem, check)));

    let catalog = CATALOG.iter().flat_map(move |entry| {
        entry
            .kind
            .select(doc)
            .flat_map(move |elem| entry.checks.iter().map(move |check| (elem, check)))
    });

    document_wide.chain(body_scoped).chain(catalog)
}
