//! Document Model Builder
//!
//! Turns editor text into a document ready for the rule engine: relative
//! resource paths are resolved, linked stylesheets and scripts are loaded,
//! and computed styles are cascaded for every element.

use std::collections::HashMap;
use std::time::Duration;

use bri11iant_css::{ComputedStyle, ComputedStyles, StyleResolver, parse_stylesheet};
use bri11iant_dom::{Document, ElementRef, NodeId};
use bri11iant_html::{HtmlError, ResourcePathResolver, parse_with_url, resolve_markup};
use bri11iant_net::{NetError, ResourceLoader, Url};
use smol::Timer;

use crate::EngineConfig;

/// Build error
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Parse error: {0}")]
    Parse(#[from] HtmlError),
}

/// A parsed, styled document
#[derive(Debug)]
pub struct LoadedDocument {
    pub document: Document,
    pub styles: ComputedStyles,
    /// Directory prefix injected into relative resource references
    pub prefix: String,
    /// Resources that failed to load or did not arrive in time
    pub missing: Vec<String>,
}

impl LoadedDocument {
    /// `getComputedStyle` for the tracked properties
    pub fn computed_style(&self, node: NodeId) -> &ComputedStyle {
        self.styles.computed_style(node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourceKind {
    Stylesheet,
    Script,
}

#[derive(Debug)]
struct Resource {
    kind: ResourceKind,
    node: NodeId,
    url: String,
}

/// Builds [`LoadedDocument`]s
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    loader: ResourceLoader,
    load_timeout: Option<Duration>,
}

impl DocumentBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            loader: ResourceLoader::new().with_user_agent(config.user_agent.clone()),
            load_timeout: config.load_timeout,
        }
    }

    pub fn with_loader(mut self, loader: ResourceLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Build a document from `text` as found at `uri`
    pub async fn build(&self, text: &str, uri: &str) -> Result<LoadedDocument, BuildError> {
        let resolver = ResourcePathResolver::from_document_uri(uri);
        let resolved = resolve_markup(text, uri)?;
        let document = parse_with_url(&resolved, uri)?;
        tracing::debug!("Parsed {} ({} nodes)", uri, document.tree().len());

        let resources = collect_resources(&document);
        let (mut linked, missing) = self.load(&resources).await;

        let mut style_resolver = StyleResolver::new();
        for elem in document.elements() {
            let css = if elem.is("style") {
                Some(elem.text_content())
            } else if is_stylesheet_link(&elem) {
                linked.remove(&elem.id())
            } else {
                None
            };
            let Some(css) = css else {
                continue;
            };
            match parse_stylesheet(&css) {
                Ok(sheet) => style_resolver.add_stylesheet(sheet),
                Err(e) => tracing::warn!("Skipping stylesheet in {}: {}", uri, e),
            }
        }

        let styles = style_resolver.compute_all(&document);
        Ok(LoadedDocument {
            document,
            styles,
            prefix: resolver.prefix().to_string(),
            missing,
        })
    }

    /// Fetch every resource concurrently and wait for all of them, or for
    /// the load timeout. Returns the stylesheet bodies by `<link>` node and
    /// the URLs that never arrived.
    async fn load(&self, resources: &[Resource]) -> (HashMap<NodeId, String>, Vec<String>) {
        let mut loaded: Vec<Option<String>> = vec![None; resources.len()];
        let mut reported = vec![false; resources.len()];
        if resources.is_empty() {
            return (HashMap::new(), Vec::new());
        }

        let (tx, rx) = smol::channel::unbounded::<(usize, Result<String, NetError>)>();
        let _tasks: Vec<smol::Task<()>> = resources
            .iter()
            .enumerate()
            .map(|(index, resource)| {
                let loader = self.loader.clone();
                let url = resource.url.clone();
                let tx = tx.clone();
                smol::spawn(async move {
                    let result = loader.fetch_text(&url).await;
                    let _ = tx.send((index, result)).await;
                })
            })
            .collect();
        drop(tx);

        let collect = async {
            while let Ok((index, result)) = rx.recv().await {
                reported[index] = true;
                let resource = &resources[index];
                match result {
                    Ok(body) if resource.kind == ResourceKind::Stylesheet => loaded[index] = Some(body),
                    Ok(_) => tracing::debug!("Loaded script {} (not executed)", resource.url),
                    Err(e) => tracing::warn!("Failed to load {}: {}", resource.url, e),
                }
            }
            true
        };

        let complete = match self.load_timeout {
            Some(timeout) => {
                let expire = async {
                    Timer::after(timeout).await;
                    false
                };
                smol::future::or(collect, expire).await
            }
            None => collect.await,
        };
        if !complete {
            tracing::warn!("Resource loading timed out after {:?}", self.load_timeout);
        }

        let missing = resources
            .iter()
            .enumerate()
            .filter(|&(i, r)| !reported[i] || (r.kind == ResourceKind::Stylesheet && loaded[i].is_none()))
            .map(|(_, r)| r.url.clone())
            .collect();

        let sheets = resources
            .iter()
            .zip(loaded)
            .filter_map(|(r, body)| Some((r.node, body?)))
            .collect();
        (sheets, missing)
    }
}

fn is_stylesheet_link(elem: &ElementRef<'_>) -> bool {
    elem.is("link")
        && elem
            .attr("rel")
            .is_some_and(|rel| rel.split_ascii_whitespace().any(|t| t.eq_ignore_ascii_case("stylesheet")))
}

/// Linked stylesheets and external scripts, in document order, with
/// their references resolved against the document URL
fn collect_resources(document: &Document) -> Vec<Resource> {
    let base = Url::parse(document.url()).ok();

    document
        .elements()
        .filter_map(|elem| {
            let (kind, reference) = if is_stylesheet_link(&elem) {
                (ResourceKind::Stylesheet, elem.attr("href")?)
            } else if elem.is("script") {
                (ResourceKind::Script, elem.attr("src")?)
            } else {
                return None;
            };
            let reference = reference.trim();
            if reference.is_empty() {
                return None;
            }

            let url = match &base {
                Some(base) => base.join(reference).ok()?,
                None => Url::parse(reference).ok()?,
            };
            Some(Resource {
                kind,
                node: elem.id(),
                url: url.to_string(),
            })
        })
        .collect()
}
