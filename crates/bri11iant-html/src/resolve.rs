//! Resource path resolution
//!
//! Documents handed to the linter come from an editor buffer, so relative
//! references in `<link>`, `<script>` and media elements would otherwise
//! resolve against nothing. The resolver prefixes them with the directory of
//! the document URI. This is string rewriting only; nothing is fetched.

use bri11iant_dom::{Document, NodeId, serialize_document};

use crate::{HtmlError, HtmlParser};

/// Resource-bearing attributes as `(tag, attribute)` pairs
pub const RESOURCE_ATTRIBUTES: &[(&str, &str)] = &[
    ("link", "href"),
    ("script", "src"),
    ("img", "src"),
    ("audio", "src"),
    ("video", "src"),
    ("source", "src"),
    ("track", "src"),
    ("iframe", "src"),
    ("embed", "src"),
    ("input", "src"),
];

/// Rewrites relative resource references against a document directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePathResolver {
    prefix: String,
}

impl ResourcePathResolver {
    /// Resolver for a document URI; the prefix is the URI up to and
    /// including its last `/`, or empty when there is none
    pub fn from_document_uri(uri: &str) -> Self {
        let prefix = match uri.rfind('/') {
            Some(pos) => uri[..=pos].to_string(),
            None => String::new(),
        };
        Self { prefix }
    }

    /// The directory prefix injected into relative references
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve one attribute value. Returns `None` when it stays unchanged.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if self.prefix.is_empty() || reference.is_empty() || is_non_relative(reference) {
            return None;
        }
        Some(format!("{}{}", self.prefix, reference))
    }

    /// Rewrite every resource-bearing attribute of `doc` in place.
    /// Returns the number of rewritten attributes.
    pub fn rewrite(&self, doc: &mut Document) -> usize {
        let targets: Vec<(NodeId, &'static str)> = doc
            .elements()
            .filter_map(|elem| {
                let &(_, attr) = RESOURCE_ATTRIBUTES.iter().find(|(tag, _)| elem.is(tag))?;
                if elem.is("input") && !elem.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("image")) {
                    return None;
                }
                Some((elem.id(), attr))
            })
            .collect();

        let mut rewritten = 0;
        for (id, attr) in targets {
            let Some(elem) = doc.tree_mut().get_mut(id).and_then(|n| n.as_element_mut()) else {
                continue;
            };
            let Some(resolved) = elem.attr(attr).and_then(|value| self.resolve(value)) else {
                continue;
            };
            tracing::trace!("Resolved <{} {}> to {}", elem.name, attr, resolved);
            elem.set_attr(attr, resolved);
            rewritten += 1;
        }

        tracing::debug!("Rewrote {} resource references under {}", rewritten, self.prefix);
        rewritten
    }
}

/// Parse `text`, rewrite its relative resource references against `uri`
/// and serialize the whole document back, doctype included.
pub fn resolve_markup(text: &str, uri: &str) -> Result<String, HtmlError> {
    let mut doc = HtmlParser::new().parse_with_url(text, uri)?;
    ResourcePathResolver::from_document_uri(uri).rewrite(&mut doc);
    Ok(serialize_document(doc.tree()))
}

/// Absolute paths, full URLs, fragments and scheme URIs such as
/// `data:` or `mailto:` are never rewritten.
fn is_non_relative(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with('/')
        || lower.starts_with('#')
        || lower.starts_with("http")
        || lower.contains("://")
        || has_scheme(&lower)
}

/// `scheme ":"` where scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn has_scheme(value: &str) -> bool {
    let Some(colon) = value.find(':') else {
        return false;
    };
    let scheme = &value[..colon];
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
