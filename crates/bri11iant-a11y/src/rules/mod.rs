//! Rule Catalog
//!
//! Every check the linter runs, grouped by the element kind it applies
//! to. Checks only read the document and its computed styles.

mod elements;
mod global;
mod image;
mod input;
mod roles;

use std::future::Future;
use std::pin::Pin;

use bri11iant_css::{ComputedStyle, ComputedStyles};
use bri11iant_dom::{Document, ElementRef};

use crate::classifier::ImageClassifier;
use crate::finding::Finding;

/// Everything a check may look at
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub document: &'a Document,
    pub styles: &'a ComputedStyles,
    pub classifier: Option<&'a dyn ImageClassifier>,
}

impl<'a> RuleContext<'a> {
    pub fn new(document: &'a Document, styles: &'a ComputedStyles) -> Self {
        Self {
            document,
            styles,
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Option<&'a dyn ImageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn style(&self, elem: &ElementRef<'_>) -> &'a ComputedStyle {
        self.styles.computed_style(elem.id())
    }
}

pub type CheckFuture<'a> = Pin<Box<dyn Future<Output = Option<Finding>> + Send + 'a>>;

pub type SyncCheck = fn(&ElementRef<'_>, &RuleContext<'_>) -> Option<Finding>;

pub type AsyncCheck = for<'a> fn(ElementRef<'a>, &'a RuleContext<'a>) -> CheckFuture<'a>;

/// A single rule
#[derive(Clone, Copy)]
pub enum Check {
    Sync(SyncCheck),
    Async(AsyncCheck),
}

impl Check {
    pub async fn run<'a>(&self, elem: ElementRef<'a>, ctx: &'a RuleContext<'a>) -> Option<Finding> {
        match self {
            Check::Sync(check) => check(&elem, ctx),
            Check::Async(check) => check(elem, ctx).await,
        }
    }
}

/// Element types with dedicated checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    A,
    Area,
    Article,
    Aside,
    Audio,
    Base,
    Body,
    Br,
    Button,
    Caption,
    Col,
    Colgroup,
    Datalist,
    Dd,
    Details,
    Dialog,
    Div,
    Dl,
    Dt,
    Embed,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    Head,
    Header,
    /// `h1` through `h6`
    Heading,
    Hr,
    Html,
    Iframe,
    Img,
    Input,
    Label,
    Legend,
    Li,
    Link,
    Main,
    Map,
    Menu,
    Meta,
    Meter,
    Noscript,
    Object,
    Ol,
    Optgroup,
    P,
    Param,
    Picture,
    Progress,
    Script,
    Section,
    Select,
    Slot,
    Source,
    Span,
    Style,
    Summary,
    Svg,
    Template,
    Textarea,
    Title,
    Track,
    Ul,
    Video,
}

impl ElementKind {
    /// Tag name (the first one for [`ElementKind::Heading`])
    pub fn tag(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::Area => "area",
            Self::Article => "article",
            Self::Aside => "aside",
            Self::Audio => "audio",
            Self::Base => "base",
            Self::Body => "body",
            Self::Br => "br",
            Self::Button => "button",
            Self::Caption => "caption",
            Self::Col => "col",
            Self::Colgroup => "colgroup",
            Self::Datalist => "datalist",
            Self::Dd => "dd",
            Self::Details => "details",
            Self::Dialog => "dialog",
            Self::Div => "div",
            Self::Dl => "dl",
            Self::Dt => "dt",
            Self::Embed => "embed",
            Self::Fieldset => "fieldset",
            Self::Figcaption => "figcaption",
            Self::Figure => "figure",
            Self::Footer => "footer",
            Self::Form => "form",
            Self::Head => "head",
            Self::Header => "header",
            Self::Heading => "h1",
            Self::Hr => "hr",
            Self::Html => "html",
            Self::Iframe => "iframe",
            Self::Img => "img",
            Self::Input => "input",
            Self::Label => "label",
            Self::Legend => "legend",
            Self::Li => "li",
            Self::Link => "link",
            Self::Main => "main",
            Self::Map => "map",
            Self::Menu => "menu",
            Self::Meta => "meta",
            Self::Meter => "meter",
            Self::Noscript => "noscript",
            Self::Object => "object",
            Self::Ol => "ol",
            Self::Optgroup => "optgroup",
            Self::P => "p",
            Self::Param => "param",
            Self::Picture => "picture",
            Self::Progress => "progress",
            Self::Script => "script",
            Self::Section => "section",
            Self::Select => "select",
            Self::Slot => "slot",
            Self::Source => "source",
            Self::Span => "span",
            Self::Style => "style",
            Self::Summary => "summary",
            Self::Svg => "svg",
            Self::Template => "template",
            Self::Textarea => "textarea",
            Self::Title => "title",
            Self::Track => "track",
            Self::Ul => "ul",
            Self::Video => "video",
        }
    }

    pub fn matches(self, elem: &ElementRef<'_>) -> bool {
        match self {
            Self::Heading => ["h1", "h2", "h3", "h4", "h5", "h6"].iter().any(|h| elem.is(h)),
            kind => elem.is(kind.tag()),
        }
    }

    /// Elements of this kind in document order
    pub fn select<'a>(self, doc: &'a Document) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        doc.elements().filter(move |e| self.matches(e))
    }
}

/// Checks attached to one element kind
pub struct CatalogEntry {
    pub kind: ElementKind,
    pub checks: &'static [Check],
}

/// Checks run on every element of the document
pub static DOCUMENT_WIDE: &[Check] = &[
    Check::Sync(global::check_role_vocabulary),
    Check::Sync(global::check_tabindex),
];

/// Checks run on every element inside `<body>`
pub static BODY_SCOPED: &[Check] = &[Check::Sync(global::check_contrast)];

const ROLE_ALLOWANCE: Check = Check::Sync(roles::check_role_allowance);

macro_rules! entry {
    ($kind:ident => $($check:expr),+ $(,)?) => {
        CatalogEntry { kind: ElementKind::$kind, checks: &[$($check),+] }
    };
}

/// Per-element checks, in dispatch order
pub static CATALOG: &[CatalogEntry] = &[
    entry!(A => Check::Sync(elements::check_link_text)),
    entry!(Area => ROLE_ALLOWANCE),
    entry!(Article => ROLE_ALLOWANCE),
    entry!(Aside => ROLE_ALLOWANCE),
    entry!(Audio => ROLE_ALLOWANCE, Check::Sync(elements::check_audio_transcript)),
    entry!(Base => ROLE_ALLOWANCE),
    entry!(Body => ROLE_ALLOWANCE, Check::Sync(elements::check_single_main)),
    entry!(Br => ROLE_ALLOWANCE),
    entry!(Button => ROLE_ALLOWANCE),
    entry!(Caption => ROLE_ALLOWANCE),
    entry!(Col => ROLE_ALLOWANCE),
    entry!(Colgroup => ROLE_ALLOWANCE),
    entry!(Datalist => ROLE_ALLOWANCE),
    entry!(Dd => ROLE_ALLOWANCE),
    entry!(Details => ROLE_ALLOWANCE),
    entry!(Dialog => ROLE_ALLOWANCE),
    entry!(Div => Check::Sync(elements::check_generic_role), Check::Sync(elements::check_generic_label)),
    entry!(Dl => ROLE_ALLOWANCE),
    entry!(Dt => ROLE_ALLOWANCE),
    entry!(Embed => ROLE_ALLOWANCE),
    entry!(Fieldset => ROLE_ALLOWANCE),
    entry!(Figcaption => ROLE_ALLOWANCE),
    entry!(Figure => Check::Sync(roles::check_figure_role)),
    entry!(Footer => ROLE_ALLOWANCE),
    entry!(Form => ROLE_ALLOWANCE),
    entry!(Head => ROLE_ALLOWANCE, Check::Sync(elements::check_head_title)),
    entry!(Header => ROLE_ALLOWANCE),
    entry!(Heading => ROLE_ALLOWANCE),
    entry!(Hr => ROLE_ALLOWANCE),
    entry!(Html => ROLE_ALLOWANCE, Check::Sync(elements::check_html_lang)),
    entry!(Iframe => ROLE_ALLOWANCE),
    entry!(Img => Check::Async(image::check_img)),
    entry!(Input => Check::Sync(input::check_input)),
    entry!(Label => ROLE_ALLOWANCE),
    entry!(Legend => ROLE_ALLOWANCE),
    entry!(Li => ROLE_ALLOWANCE),
    entry!(Link => Check::Sync(roles::check_link_role)),
    entry!(Main => ROLE_ALLOWANCE),
    entry!(Map => ROLE_ALLOWANCE),
    entry!(Menu => ROLE_ALLOWANCE),
    entry!(Meta => Check::Sync(elements::check_meta_maximum_scale), Check::Sync(elements::check_meta_user_scalable), ROLE_ALLOWANCE),
    entry!(Meter => ROLE_ALLOWANCE),
    entry!(Noscript => ROLE_ALLOWANCE),
    entry!(Object => ROLE_ALLOWANCE),
    entry!(Ol => ROLE_ALLOWANCE),
    entry!(Optgroup => ROLE_ALLOWANCE),
    entry!(P => Check::Sync(elements::check_generic_label)),
    entry!(Param => ROLE_ALLOWANCE),
    entry!(Picture => ROLE_ALLOWANCE),
    entry!(Progress => ROLE_ALLOWANCE),
    entry!(Script => ROLE_ALLOWANCE),
    entry!(Section => ROLE_ALLOWANCE),
    entry!(Select => Check::Sync(elements::check_select)),
    entry!(Slot => ROLE_ALLOWANCE),
    entry!(Source => ROLE_ALLOWANCE),
    entry!(Span => Check::Sync(elements::check_generic_role), Check::Sync(elements::check_generic_label)),
    entry!(Style => ROLE_ALLOWANCE),
    entry!(Summary => ROLE_ALLOWANCE),
    entry!(Svg => ROLE_ALLOWANCE),
    entry!(Template => ROLE_ALLOWANCE),
    entry!(Textarea => ROLE_ALLOWANCE),
    entry!(Title => Check::Sync(elements::check_title_text), ROLE_ALLOWANCE),
    entry!(Track => ROLE_ALLOWANCE),
    entry!(Ul => ROLE_ALLOWANCE),
    entry!(Video => Check::Sync(elements::check_video_captions)),
];

/// `role` attribute value, when present and not blank
fn role_of<'a>(elem: &ElementRef<'a>) -> Option<&'a str> {
    elem.attr("role").filter(|r| !r.trim().is_empty())
}
