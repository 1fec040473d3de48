//! bri11iant CSS Parser & Style System
//!
//! Parses stylesheets with lightningcss and cascades them into the handful
//! of computed properties the accessibility checks read: `color`,
//! `background-color`, `display` and `visibility`.

mod parser;
mod selectors;
mod cascade;
mod color;

pub use parser::CssParser;
pub use selectors::{Selector, SelectorList, NthExpression};
pub use cascade::{ComputedStyle, ComputedStyles, StyleResolver, TRACKED_PROPERTIES};
pub use color::{Rgba, parse_color};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed stylesheet
#[derive(Debug, Default, Clone)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of style rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// CSS style rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

/// Selector specificity (a, b, c)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl std::ops::Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Lower-case property name
    pub property: String,
    /// Serialized value
    pub value: String,
    pub important: bool,
}

/// CSS parsing error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },
}

/// CSS color error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid color: {0}")]
    Invalid(String),

    #[error("Color cannot be converted to sRGB: {0}")]
    Unsupported(String),
}
