//! CSS Parser using lightningcss
//!
//! Parses CSS stylesheets and inline `style` attributes into our internal
//! representation. Values are kept as serialized strings; the cascade only
//! interprets the properties it tracks.

use lightningcss::declaration::DeclarationBlock;
use lightningcss::properties::Property;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleAttribute, StyleSheet};
use lightningcss::traits::ToCss;

use crate::{CssError, Declaration, Rule, SelectorList, Stylesheet};

/// CSS Parser
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    fn options<'i>() -> ParserOptions<'i> {
        ParserOptions {
            error_recovery: true,
            ..ParserOptions::default()
        }
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let stylesheet = StyleSheet::parse(css, Self::options()).map_err(|e| CssError::ParseError {
            line: e.loc.as_ref().map_or(0, |loc| loc.line),
            message: e.kind.to_string(),
        })?;

        let mut result = Stylesheet::new();
        for rule in stylesheet.rules.0.iter() {
            if let Some(converted) = self.convert_rule(rule) {
                result.rules.push(converted);
            }
        }

        tracing::trace!("Parsed stylesheet with {} style rules", result.len());
        Ok(result)
    }

    /// Parse the contents of a `style` attribute
    pub fn parse_inline(&self, style: &str) -> Result<Vec<Declaration>, CssError> {
        let attribute = StyleAttribute::parse(style, Self::options()).map_err(|e| CssError::ParseError {
            line: 0,
            message: e.kind.to_string(),
        })?;
        Ok(self.convert_declarations(&attribute.declarations))
    }

    fn convert_rule(&self, rule: &CssRule) -> Option<Rule> {
        match rule {
            CssRule::Style(style_rule) => {
                let text = style_rule
                    .selectors
                    .to_css_string(PrinterOptions::default())
                    .ok()?;
                let selectors = SelectorList::parse(&text);
                if selectors.is_empty() {
                    tracing::debug!("Skipping rule with unsupported selector: {}", text);
                    return None;
                }
                let declarations = self.convert_declarations(&style_rule.declarations);
                Some(Rule { selectors, declarations })
            }
            // Media queries are not evaluated; there is no viewport.
            _ => None,
        }
    }

    fn convert_declarations(&self, block: &DeclarationBlock) -> Vec<Declaration> {
        let normal = block.declarations.iter().map(|d| (d, false));
        let important = block.important_declarations.iter().map(|d| (d, true));

        normal
            .chain(important)
            .filter_map(|(decl, important)| self.convert_declaration(decl, important))
            .collect()
    }

    fn convert_declaration(&self, decl: &Property, important: bool) -> Option<Declaration> {
        match decl {
            // The shorthand carries the color on its final layer
            Property::Background(layers) => {
                let color = layers.last()?.color.to_css_string(PrinterOptions::default()).ok()?;
                Some(Declaration {
                    property: "background-color".to_string(),
                    value: color,
                    important,
                })
            }
            _ => {
                let property_id = decl.property_id();
                let name = property_id.name();
                if name.starts_with("--") {
                    return None;
                }
                let value = decl.value_to_css_string(PrinterOptions::default()).ok()?;
                Some(Declaration {
                    property: name.to_ascii_lowercase(),
                    value,
                    important,
                })
            }
        }
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let css = r#"
            .foo { display: block; }
            #bar { color: red; }
        "#;

        let result = CssParser::new().parse(css);
        assert!(result.is_ok(), "Parse error: {:?}", result.err());

        let stylesheet = result.unwrap();
        assert_eq!(stylesheet.len(), 2);
        assert_eq!(stylesheet.rules[0].declarations[0].property, "display");
        assert_eq!(stylesheet.rules[0].declarations[0].value, "block");
    }

    #[test]
    fn test_parse_important() {
        let sheet = CssParser::new().parse("p { color: blue !important; display: none }").unwrap();
        let decls = &sheet.rules[0].declarations;

        let color = decls.iter().find(|d| d.property == "color").unwrap();
        assert!(color.important);
        let display = decls.iter().find(|d| d.property == "display").unwrap();
        assert!(!display.important);
    }

    #[test]
    fn test_background_shorthand_color() {
        let sheet = CssParser::new()
            .parse("div { background: url(a.png) no-repeat #00ff00; }")
            .unwrap();
        let decl = &sheet.rules[0].declarations[0];
        assert_eq!(decl.property, "background-color");
        assert!(crate::parse_color(&decl.value).is_ok());
    }

    #[test]
    fn test_parse_inline() {
        let decls = CssParser::new().parse_inline("color: #fff; background-color: black").unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[1].property, "background-color");
    }

    #[test]
    fn test_media_rules_skipped() {
        let sheet = CssParser::new()
            .parse("@media print { p { color: red } } p { color: blue }")
            .unwrap();
        assert_eq!(sheet.len(), 1);
    }
}
