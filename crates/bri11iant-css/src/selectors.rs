//! CSS Selector Matching
//!
//! Parses the serialized selector text lightningcss produces into compound
//! selectors and matches them right-to-left against the arena DOM. Dynamic
//! pseudo-classes (`:hover`, `:focus`, ...) never match a static document,
//! and a selector ending in a pseudo-element never matches the element.

use bri11iant_dom::{DomTree, ElementData, Node, NodeId};

use crate::Specificity;

/// Comma-separated selector list
#[derive(Debug, Clone, Default)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    /// Parse a selector list. Selectors that cannot be parsed are dropped.
    pub fn parse(text: &str) -> Self {
        let selectors = split_top_level(text, ',')
            .into_iter()
            .filter_map(|part| Selector::parse(part.trim()))
            .collect();
        Self(selectors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.0.iter()
    }

    /// Highest specificity among the selectors that match `id`
    pub fn matching_specificity(&self, tree: &DomTree, id: NodeId) -> Option<Specificity> {
        self.0
            .iter()
            .filter(|s| s.matches(tree, id))
            .map(|s| s.specificity)
            .max()
    }
}

/// A complex selector
#[derive(Debug, Clone)]
pub struct Selector {
    pub text: String,
    pub specificity: Specificity,
    /// Compounds left to right, each with the combinator joining it to the
    /// previous compound
    compounds: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    parts: Vec<SimpleSelector>,
}

#[derive(Debug, Clone)]
enum SimpleSelector {
    Universal,
    Type(String),
    Class(String),
    Id(String),
    Attribute {
        name: String,
        op: AttrOp,
        value: String,
        case_insensitive: bool,
    },
    PseudoClass(PseudoClass),
    PseudoElement,
}

/// Attribute selector operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals,
    Includes,
    DashMatch,
    StartsWith,
    EndsWith,
    Contains,
}

#[derive(Debug, Clone)]
enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    Link,
    Checked,
    Disabled,
    Enabled,
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),
    /// Anything depending on user interaction or unknown
    Never,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase().replace(' ', "");

        match s.as_str() {
            "odd" => return Some(Self::new(2, 1)),
            "even" => return Some(Self::new(2, 0)),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::new(0, n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a => a.parse().ok()?,
        };
        let rest = s[n_pos + 1..].trim_start_matches('+');
        let b = if rest.is_empty() { 0 } else { rest.parse().ok()? };
        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }
        let diff = n - self.b;
        diff % self.a == 0 && diff / self.a >= 0
    }
}

impl Selector {
    /// Parse a single complex selector; `None` when unsupported
    pub fn parse(text: &str) -> Option<Self> {
        let compounds = SelectorScanner::new(text).parse()?;
        let specificity = compounds
            .iter()
            .map(|(_, c)| c.specificity())
            .fold(Specificity::default(), |acc, s| acc + s);
        Some(Self {
            text: text.to_string(),
            specificity,
            compounds,
        })
    }

    /// Check if the selector matches the element `id`
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, id, n - 1),
        }
    }

    fn matches_at(&self, tree: &DomTree, id: NodeId, index: usize) -> bool {
        let (combinator, compound) = &self.compounds[index];
        if !compound.matches(tree, id) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => parent_element(tree, id)
                .is_some_and(|parent| self.matches_at(tree, parent, index - 1)),
            Combinator::Descendant => tree
                .ancestors(id)
                .filter(|&a| tree.element(a).is_some())
                .any(|a| self.matches_at(tree, a, index - 1)),
            Combinator::NextSibling => previous_element_sibling(tree, id)
                .is_some_and(|prev| self.matches_at(tree, prev, index - 1)),
            Combinator::SubsequentSibling => {
                let mut cursor = previous_element_sibling(tree, id);
                while let Some(prev) = cursor {
                    if self.matches_at(tree, prev, index - 1) {
                        return true;
                    }
                    cursor = previous_element_sibling(tree, prev);
                }
                false
            }
        }
    }
}

impl Compound {
    fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .map(|part| match part {
                SimpleSelector::Universal => Specificity::default(),
                SimpleSelector::Id(_) => Specificity(1, 0, 0),
                SimpleSelector::Class(_) | SimpleSelector::Attribute { .. } => Specificity(0, 1, 0),
                SimpleSelector::Type(_) | SimpleSelector::PseudoElement => Specificity(0, 0, 1),
                SimpleSelector::PseudoClass(PseudoClass::Where(_)) => Specificity::default(),
                SimpleSelector::PseudoClass(PseudoClass::Not(list) | PseudoClass::Is(list)) => list
                    .iter()
                    .map(|s| s.specificity)
                    .max()
                    .unwrap_or_default(),
                SimpleSelector::PseudoClass(_) => Specificity(0, 1, 0),
            })
            .fold(Specificity::default(), |acc, s| acc + s)
    }

    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(elem) = tree.element(id) else {
            return false;
        };
        self.parts.iter().all(|part| match part {
            SimpleSelector::Universal => true,
            SimpleSelector::Type(tag) => elem.is(tag),
            SimpleSelector::Class(class) => elem
                .attr("class")
                .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class)),
            SimpleSelector::Id(expected) => elem.attr("id") == Some(expected.as_str()),
            SimpleSelector::Attribute { name, op, value, case_insensitive } => {
                matches_attribute(elem, name, *op, value, *case_insensitive)
            }
            SimpleSelector::PseudoClass(pseudo) => matches_pseudo_class(tree, id, elem, pseudo),
            SimpleSelector::PseudoElement => false,
        })
    }
}

fn matches_attribute(elem: &ElementData, name: &str, op: AttrOp, expected: &str, case_insensitive: bool) -> bool {
    let Some(actual) = elem.attr(name) else {
        return false;
    };
    let (actual, expected) = if case_insensitive {
        (actual.to_ascii_lowercase(), expected.to_ascii_lowercase())
    } else {
        (actual.to_string(), expected.to_string())
    };

    match op {
        AttrOp::Exists => true,
        AttrOp::Equals => actual == expected,
        AttrOp::Includes => actual.split_ascii_whitespace().any(|w| w == expected),
        AttrOp::DashMatch => actual == expected || actual.starts_with(&format!("{}-", expected)),
        AttrOp::StartsWith => !expected.is_empty() && actual.starts_with(&expected),
        AttrOp::EndsWith => !expected.is_empty() && actual.ends_with(&expected),
        AttrOp::Contains => !expected.is_empty() && actual.contains(&expected),
    }
}

fn matches_pseudo_class(tree: &DomTree, id: NodeId, elem: &ElementData, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Root => tree.get(id).is_some_and(|n| n.parent == NodeId::ROOT),
        PseudoClass::Empty => tree
            .children(id)
            .all(|(_, child)| !child.is_element() && child.as_text().is_none_or(str::is_empty)),
        PseudoClass::FirstChild => previous_element_sibling(tree, id).is_none(),
        PseudoClass::LastChild => next_element_sibling(tree, id).is_none(),
        PseudoClass::OnlyChild => {
            previous_element_sibling(tree, id).is_none() && next_element_sibling(tree, id).is_none()
        }
        PseudoClass::FirstOfType => sibling_position(tree, id, true, true) == 1,
        PseudoClass::LastOfType => sibling_position(tree, id, false, true) == 1,
        PseudoClass::OnlyOfType => {
            sibling_position(tree, id, true, true) == 1 && sibling_position(tree, id, false, true) == 1
        }
        PseudoClass::NthChild(nth) => nth.matches(sibling_position(tree, id, true, false)),
        PseudoClass::NthLastChild(nth) => nth.matches(sibling_position(tree, id, false, false)),
        PseudoClass::NthOfType(nth) => nth.matches(sibling_position(tree, id, true, true)),
        PseudoClass::NthLastOfType(nth) => nth.matches(sibling_position(tree, id, false, true)),
        PseudoClass::Link => (elem.is("a") || elem.is("area")) && elem.has_attr("href"),
        PseudoClass::Checked => {
            (elem.is("input") && elem.has_attr("checked")) || (elem.is("option") && elem.has_attr("selected"))
        }
        PseudoClass::Disabled => is_form_control(elem) && elem.has_attr("disabled"),
        PseudoClass::Enabled => is_form_control(elem) && !elem.has_attr("disabled"),
        PseudoClass::Not(list) => !list.iter().any(|s| s.matches(tree, id)),
        PseudoClass::Is(list) | PseudoClass::Where(list) => list.iter().any(|s| s.matches(tree, id)),
        PseudoClass::Never => false,
    }
}

fn is_form_control(elem: &ElementData) -> bool {
    ["button", "input", "select", "textarea", "optgroup", "option", "fieldset"]
        .iter()
        .any(|tag| elem.is(tag))
}

fn parent_element(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let parent = tree.get(id)?.parent;
    tree.element(parent).map(|_| parent)
}

fn previous_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    sibling_element(tree, id, |n| n.prev_sibling)
}

fn next_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    sibling_element(tree, id, |n| n.next_sibling)
}

fn sibling_element(tree: &DomTree, id: NodeId, step: fn(&Node) -> NodeId) -> Option<NodeId> {
    let mut cursor = step(tree.get(id)?);
    while cursor.is_valid() {
        let node = tree.get(cursor)?;
        if node.is_element() {
            return Some(cursor);
        }
        cursor = step(node);
    }
    None
}

/// 1-based position among element siblings, counted from the start or end,
/// optionally only among siblings with the same tag
fn sibling_position(tree: &DomTree, id: NodeId, from_start: bool, same_type: bool) -> i32 {
    let tag = tree.element(id).map(|e| e.name.as_str()).unwrap_or_default();
    let step = if from_start { previous_element_sibling } else { next_element_sibling };

    let mut position = 1;
    let mut cursor = step(tree, id);
    while let Some(sibling) = cursor {
        if !same_type || tree.element(sibling).is_some_and(|e| e.is(tag)) {
            position += 1;
        }
        cursor = step(tree, sibling);
    }
    position
}

/// Split on `sep` outside of brackets, parentheses and quotes
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth -= 1,
            (None, c) if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Hand-written scanner over one complex selector
struct SelectorScanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    text: &'a str,
}

impl<'a> SelectorScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            text,
        }
    }

    fn parse(mut self) -> Option<Vec<(Combinator, Compound)>> {
        let mut compounds = Vec::new();
        let mut current = Compound::default();
        let mut pending = Combinator::Descendant;

        loop {
            let saw_space = self.skip_whitespace();
            let Some(&(_, c)) = self.chars.peek() else {
                break;
            };

            let combinator = match c {
                '>' => Some(Combinator::Child),
                '+' => Some(Combinator::NextSibling),
                '~' => Some(Combinator::SubsequentSibling),
                _ => None,
            };

            if let Some(combinator) = combinator {
                self.chars.next();
                if current.parts.is_empty() {
                    return None;
                }
                compounds.push((pending, std::mem::take(&mut current)));
                pending = combinator;
                continue;
            }

            if saw_space && !current.parts.is_empty() {
                compounds.push((pending, std::mem::take(&mut current)));
                pending = Combinator::Descendant;
            }

            current.parts.push(self.simple_selector()?);
        }

        if current.parts.is_empty() {
            return None;
        }
        compounds.push((pending, current));
        Some(compounds)
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
            self.chars.next();
            skipped = true;
        }
        skipped
    }

    fn simple_selector(&mut self) -> Option<SimpleSelector> {
        let &(_, c) = self.chars.peek()?;
        match c {
            '*' => {
                self.chars.next();
                Some(SimpleSelector::Universal)
            }
            '.' => {
                self.chars.next();
                Some(SimpleSelector::Class(self.ident()?))
            }
            '#' => {
                self.chars.next();
                Some(SimpleSelector::Id(self.ident()?))
            }
            '[' => {
                self.chars.next();
                self.attribute()
            }
            ':' => {
                self.chars.next();
                if self.chars.peek().is_some_and(|&(_, c)| c == ':') {
                    self.chars.next();
                    self.ident()?;
                    return Some(SimpleSelector::PseudoElement);
                }
                self.pseudo_class()
            }
            c if is_ident_char(c) => Some(SimpleSelector::Type(self.ident()?.to_ascii_lowercase())),
            // Namespaces and anything else are not supported
            _ => None,
        }
    }

    fn ident(&mut self) -> Option<String> {
        let mut out = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\\' {
                self.chars.next();
                let (_, escaped) = self.chars.next()?;
                out.push(escaped);
            } else if is_ident_char(c) {
                out.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        (!out.is_empty()).then_some(out)
    }

    fn attribute(&mut self) -> Option<SimpleSelector> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let (_, c) = self.chars.next()?;
        let op = match c {
            ']' => {
                return Some(SimpleSelector::Attribute {
                    name,
                    op: AttrOp::Exists,
                    value: String::new(),
                    case_insensitive: false,
                });
            }
            '=' => AttrOp::Equals,
            '~' | '|' | '^' | '$' | '*' => {
                let (_, eq) = self.chars.next()?;
                if eq != '=' {
                    return None;
                }
                match c {
                    '~' => AttrOp::Includes,
                    '|' => AttrOp::DashMatch,
                    '^' => AttrOp::StartsWith,
                    '$' => AttrOp::EndsWith,
                    _ => AttrOp::Contains,
                }
            }
            _ => return None,
        };

        self.skip_whitespace();
        let first = self.chars.peek()?.1;
        let value = match first {
            q @ ('"' | '\'') => {
                self.chars.next();
                let mut value = String::new();
                loop {
                    let (_, c) = self.chars.next()?;
                    match c {
                        '\\' => value.push(self.chars.next()?.1),
                        c if c == q => break,
                        c => value.push(c),
                    }
                }
                value
            }
            _ => self.ident()?,
        };

        self.skip_whitespace();
        let mut case_insensitive = false;
        if let Some(flag) = self.ident() {
            case_insensitive = flag.eq_ignore_ascii_case("i");
        }
        self.skip_whitespace();
        match self.chars.next()? {
            (_, ']') => Some(SimpleSelector::Attribute { name, op, value, case_insensitive }),
            _ => None,
        }
    }

    fn pseudo_class(&mut self) -> Option<SimpleSelector> {
        let name = self.ident()?.to_ascii_lowercase();
        let argument = if self.chars.peek().is_some_and(|&(_, c)| c == '(') {
            Some(self.parenthesized()?)
        } else {
            None
        };

        let pseudo = match (name.as_str(), argument) {
            ("root", None) => PseudoClass::Root,
            ("empty", None) => PseudoClass::Empty,
            ("first-child", None) => PseudoClass::FirstChild,
            ("last-child", None) => PseudoClass::LastChild,
            ("only-child", None) => PseudoClass::OnlyChild,
            ("first-of-type", None) => PseudoClass::FirstOfType,
            ("last-of-type", None) => PseudoClass::LastOfType,
            ("only-of-type", None) => PseudoClass::OnlyOfType,
            ("link" | "any-link", None) => PseudoClass::Link,
            ("checked", None) => PseudoClass::Checked,
            ("disabled", None) => PseudoClass::Disabled,
            ("enabled", None) => PseudoClass::Enabled,
            ("nth-child", Some(arg)) => PseudoClass::NthChild(NthExpression::parse(arg)?),
            ("nth-last-child", Some(arg)) => PseudoClass::NthLastChild(NthExpression::parse(arg)?),
            ("nth-of-type", Some(arg)) => PseudoClass::NthOfType(NthExpression::parse(arg)?),
            ("nth-last-of-type", Some(arg)) => PseudoClass::NthLastOfType(NthExpression::parse(arg)?),
            ("not", Some(arg)) => PseudoClass::Not(SelectorList::parse(arg)),
            ("is" | "matches", Some(arg)) => PseudoClass::Is(SelectorList::parse(arg)),
            ("where", Some(arg)) => PseudoClass::Where(SelectorList::parse(arg)),
            _ => PseudoClass::Never,
        };
        Some(SimpleSelector::PseudoClass(pseudo))
    }

    /// Consume `( ... )` and return the text between the parentheses
    fn parenthesized(&mut self) -> Option<&'a str> {
        let text = self.text;
        let (open, _) = self.chars.next()?;
        let mut depth = 1;
        for (i, c) in self.chars.by_ref() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[open + 1..i]);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
