//! bri11iant HTML Parser
//!
//! HTML5 parsing built on html5ever, plus the resource path resolver that
//! rewrites relative stylesheet, script and media references to absolute
//! ones before a document is loaded.

mod parser;
mod resolve;

pub use parser::HtmlParser;
pub use resolve::{ResourcePathResolver, RESOURCE_ATTRIBUTES, resolve_markup};
pub use bri11iant_dom::{Document, DomTree, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string, recording the URL it was loaded from
pub fn parse_with_url(html: &str, url: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse_with_url(html, url)
}

/// HTML error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Markup produced no document element")]
    NoDocumentElement,
}
