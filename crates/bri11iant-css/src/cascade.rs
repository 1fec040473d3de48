//! Style Cascade & Resolver
//!
//! Computes the final styles for DOM elements by:
//! 1. Matching selectors against elements
//! 2. Sorting by importance, origin, specificity and source order
//! 3. Resolving inheritance and CSS-wide keywords
//!
//! Only the properties in [`TRACKED_PROPERTIES`] are computed.

use std::collections::HashMap;

use bri11iant_dom::{Document, DomTree, NodeId};

use crate::{CssParser, Declaration, Specificity, Stylesheet, parse_color};

/// Properties that survive the cascade
pub const TRACKED_PROPERTIES: [&str; 4] = ["color", "background-color", "display", "visibility"];

/// Default user-agent styles
const UA_STYLESHEET: &str = r#"
html, body, address, blockquote, center, dialog, div, figure, figcaption,
footer, form, header, hr, legend, listing, main, p, plaintext, pre, search,
xmp, article, aside, h1, h2, h3, h4, h5, h6, hgroup, nav, section, dir, dd,
dl, dt, menu, ol, ul, fieldset, details, summary, optgroup { display: block; }
li { display: list-item; }
table { display: table; }
caption { display: table-caption; }
thead { display: table-header-group; }
tbody { display: table-row-group; }
tfoot { display: table-footer-group; }
tr { display: table-row; }
td, th { display: table-cell; }
input, select, button, textarea, img, video, audio, iframe, embed, object { display: inline-block; }
head, script, style, link, meta, title, base, template, datalist, area, param,
noembed, noframes, rp { display: none; }
[hidden], input[type="hidden" i] { display: none; }
"#;

/// Computed values of the tracked properties for one element.
/// `None` means the property has no value (no declaration anywhere up the
/// inheritance chain).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub display: Option<String>,
    pub visibility: Option<String>,
}

impl ComputedStyle {
    /// Style of an element nothing applies to
    pub const INITIAL: ComputedStyle = ComputedStyle {
        color: None,
        background_color: None,
        display: None,
        visibility: None,
    };

    /// `getComputedStyle(elem)[name]` for the tracked properties
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "color" => self.color.as_deref(),
            "background-color" => self.background_color.as_deref(),
            "display" => Some(self.display()),
            "visibility" => Some(self.visibility()),
            _ => None,
        }
    }

    pub fn display(&self) -> &str {
        self.display.as_deref().unwrap_or("inline")
    }

    pub fn visibility(&self) -> &str {
        self.visibility.as_deref().unwrap_or("visible")
    }

    /// `display: none` or `visibility: hidden`/`collapse`
    pub fn is_hidden(&self) -> bool {
        self.display() == "none" || matches!(self.visibility(), "hidden" | "collapse")
    }

    fn set(&mut self, name: &str, value: Option<String>) {
        match name {
            "color" => self.color = value,
            "background-color" => self.background_color = value,
            "display" => self.display = value,
            "visibility" => self.visibility = value,
            _ => {}
        }
    }

    fn raw(&self, name: &str) -> Option<&String> {
        match name {
            "color" => self.color.as_ref(),
            "background-color" => self.background_color.as_ref(),
            "display" => self.display.as_ref(),
            "visibility" => self.visibility.as_ref(),
            _ => None,
        }
    }
}

static INITIAL_STYLE: ComputedStyle = ComputedStyle::INITIAL;

/// Computed styles of every element of a document
#[derive(Debug, Clone, Default)]
pub struct ComputedStyles {
    styles: HashMap<NodeId, ComputedStyle>,
}

impl ComputedStyles {
    pub fn get(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.styles.get(&id)
    }

    /// Computed style of `id`, or the initial style for non-elements
    pub fn computed_style(&self, id: NodeId) -> &ComputedStyle {
        self.styles.get(&id).unwrap_or(&INITIAL_STYLE)
    }

    pub fn insert(&mut self, id: NodeId, style: ComputedStyle) {
        self.styles.insert(id, style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Cascade origin, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    UserAgent,
    Author,
    Inline,
}

/// Sort key of a matched declaration; later wins
type CascadeKey = (bool, Origin, Specificity, usize);

/// Style resolver - computes styles for DOM elements
pub struct StyleResolver {
    /// User agent stylesheet (browser defaults)
    ua_styles: Stylesheet,
    /// Author stylesheets (page CSS), in document order
    author_styles: Vec<Stylesheet>,
}

impl StyleResolver {
    pub fn new() -> Self {
        let ua_styles = CssParser::new().parse(UA_STYLESHEET).unwrap_or_else(|e| {
            tracing::warn!("User-agent stylesheet failed to parse: {}", e);
            Stylesheet::new()
        });
        Self {
            ua_styles,
            author_styles: Vec::new(),
        }
    }

    /// Add an author stylesheet; later sheets win ties
    pub fn add_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.author_styles.push(stylesheet);
    }

    pub fn stylesheet_count(&self) -> usize {
        self.author_styles.len()
    }

    /// Compute styles for every element, parents before children
    pub fn compute_all(&self, doc: &Document) -> ComputedStyles {
        let mut styles = ComputedStyles::default();
        let tree = doc.tree();

        for elem in doc.elements() {
            let parent = tree
                .get(elem.id())
                .and_then(|n| styles.get(n.parent))
                .cloned();
            let style = self.compute_style(tree, elem.id(), parent.as_ref());
            styles.insert(elem.id(), style);
        }

        tracing::debug!("Computed styles for {} elements", styles.len());
        styles
    }

    /// Compute styles for an element given its parent's computed style
    pub fn compute_style(&self, tree: &DomTree, node_id: NodeId, parent: Option<&ComputedStyle>) -> ComputedStyle {
        let mut matches: Vec<(CascadeKey, &str, &str)> = Vec::new();
        let mut order = 0usize;

        let sheets = std::iter::once((Origin::UserAgent, &self.ua_styles))
            .chain(self.author_styles.iter().map(|s| (Origin::Author, s)));

        for (origin, sheet) in sheets {
            for rule in &sheet.rules {
                order += 1;
                let Some(specificity) = rule.selectors.matching_specificity(tree, node_id) else {
                    continue;
                };
                for decl in tracked(&rule.declarations) {
                    matches.push(((decl.important, origin, specificity, order), &decl.property, &decl.value));
                }
            }
        }

        let inline = self.inline_declarations(tree, node_id);
        for decl in tracked(&inline) {
            order += 1;
            matches.push((
                (decl.important, Origin::Inline, Specificity::default(), order),
                &decl.property,
                &decl.value,
            ));
        }

        matches.sort_by(|a, b| a.0.cmp(&b.0));

        let mut declared: HashMap<&str, &str> = HashMap::new();
        for (_, property, value) in matches {
            declared.insert(property, value);
        }

        let mut style = ComputedStyle::default();
        // color first: currentcolor in background-color refers to it
        for name in TRACKED_PROPERTIES {
            let value = self.resolve_value(name, declared.get(name).copied(), &style, parent);
            style.set(name, value);
        }
        style
    }

    fn inline_declarations(&self, tree: &DomTree, node_id: NodeId) -> Vec<Declaration> {
        let Some(style) = tree.element(node_id).and_then(|e| e.attr("style")) else {
            return Vec::new();
        };
        CssParser::new().parse_inline(style).unwrap_or_else(|e| {
            tracing::debug!("Ignoring unparseable style attribute: {}", e);
            Vec::new()
        })
    }

    fn resolve_value(
        &self,
        name: &str,
        declared: Option<&str>,
        own: &ComputedStyle,
        parent: Option<&ComputedStyle>,
    ) -> Option<String> {
        let inherited = matches!(name, "color" | "visibility");
        let from_parent = || parent.and_then(|p| p.raw(name).cloned());

        let Some(value) = declared.map(str::trim) else {
            return if inherited { from_parent() } else { None };
        };

        match value.to_ascii_lowercase().as_str() {
            "inherit" => from_parent(),
            "unset" | "revert" if inherited => from_parent(),
            "initial" | "unset" | "revert" => None,
            "currentcolor" if name == "background-color" => own.color.clone(),
            "currentcolor" => from_parent(),
            lower => {
                if name == "color" || name == "background-color" {
                    // Keep unparseable values; checks treat them as unknown
                    Some(parse_color(value).map_or_else(|_| value.to_string(), |c| c.to_string()))
                } else {
                    Some(lower.to_string())
                }
            }
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn tracked(declarations: &[Declaration]) -> impl Iterator<Item = &Declaration> {
    declarations
        .iter()
        .filter(|d| TRACKED_PROPERTIES.contains(&d.property.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri11iant_dom::ElementData;

    fn doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::empty("about:blank");
        let tree = doc.tree_mut();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let mut div = ElementData::new("div");
        div.set_attr("class", "box");
        let div = tree.create_element_with(div);
        let span = tree.create_element("span");
        let head = tree.create_element("head");
        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);
        tree.append_child(body, div);
        tree.append_child(div, span);
        doc.finalize();
        (doc, body, div, span)
    }

    #[test]
    fn test_ua_display_defaults() {
        let (doc, body, div, span) = doc();
        let styles = StyleResolver::new().compute_all(&doc);

        assert_eq!(styles.computed_style(body).display(), "block");
        assert_eq!(styles.computed_style(div).display(), "block");
        assert_eq!(styles.computed_style(span).display(), "inline");
        assert_eq!(styles.computed_style(doc.head()).display(), "none");
    }

    #[test]
    fn test_color_inherits_background_does_not() {
        let (doc, _, div, span) = doc();
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(
            CssParser::new()
                .parse(".box { color: #777; background-color: white; }")
                .unwrap(),
        );
        let styles = resolver.compute_all(&doc);

        assert_eq!(styles.computed_style(div).get("color"), Some("rgb(119, 119, 119)"));
        assert_eq!(styles.computed_style(div).get("background-color"), Some("rgb(255, 255, 255)"));
        assert_eq!(styles.computed_style(span).get("color"), Some("rgb(119, 119, 119)"));
        assert_eq!(styles.computed_style(span).get("background-color"), None);
    }

    #[test]
    fn test_specificity_and_order() {
        let (doc, _, div, _) = doc();
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(
            CssParser::new()
                .parse("div.box { color: red } div { color: blue } .box { color: green }")
                .unwrap(),
        );
        let styles = resolver.compute_all(&doc);
        assert_eq!(styles.computed_style(div).color.as_deref(), Some("rgb(255, 0, 0)"));
    }

    #[test]
    fn test_important_beats_specificity() {
        let (doc, _, div, _) = doc();
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(
            CssParser::new()
                .parse("div { visibility: hidden !important } div.box { visibility: visible }")
                .unwrap(),
        );
        let styles = resolver.compute_all(&doc);
        assert!(styles.computed_style(div).is_hidden());
    }

    #[test]
    fn test_inline_style_wins() {
        let (mut doc, _, div, _) = doc();
        if let Some(e) = doc.tree_mut().get_mut(div).and_then(|n| n.as_element_mut()) {
            e.set_attr("style", "background-color: black; color: currentcolor");
        }
        let mut resolver = StyleResolver::new();
        resolver.add_stylesheet(CssParser::new().parse(".box { background-color: white }").unwrap());
        let styles = resolver.compute_all(&doc);

        assert_eq!(styles.computed_style(div).get("background-color"), Some("rgb(0, 0, 0)"));
        assert_eq!(styles.computed_style(div).get("color"), None);
    }
}
