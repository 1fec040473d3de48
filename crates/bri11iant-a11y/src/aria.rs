//! ARIA Support
//!
//! The WAI-ARIA 1.1 role vocabulary and the ARIA-in-HTML tables of which
//! roles each element may carry.

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Alert,
    AlertDialog,
    Button,
    Checkbox,
    ComboBox,
    Dialog,
    Grid,
    GridCell,
    Link,
    ListBox,
    Log,
    Marquee,
    Menu,
    MenuBar,
    MenuItem,
    MenuItemCheckbox,
    MenuItemRadio,
    Option,
    ProgressBar,
    Radio,
    RadioGroup,
    ScrollBar,
    SearchBox,
    Slider,
    SpinButton,
    Status,
    Switch,
    Tab,
    TabList,
    TabPanel,
    TextBox,
    Timer,
    ToolTip,
    Tree,
    TreeGrid,
    TreeItem,

    // Document structure
    Application,
    Article,
    Cell,
    ColumnHeader,
    Definition,
    Directory,
    Document,
    Feed,
    Figure,
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Math,
    None,
    Note,
    Presentation,
    Row,
    RowGroup,
    RowHeader,
    Separator,
    Table,
    Term,
    Toolbar,
}

impl AriaRole {
    /// Every role in the vocabulary
    pub const ALL: &'static [AriaRole] = &[
        Self::Alert, Self::AlertDialog, Self::Application, Self::Article, Self::Banner,
        Self::Button, Self::Checkbox, Self::Cell, Self::ColumnHeader, Self::ComboBox,
        Self::Complementary, Self::ContentInfo, Self::Definition, Self::Dialog, Self::Directory,
        Self::Document, Self::Feed, Self::Figure, Self::Form, Self::Grid, Self::GridCell,
        Self::Group, Self::Heading, Self::Img, Self::Link, Self::List, Self::ListBox,
        Self::ListItem, Self::Log, Self::Main, Self::Marquee, Self::Math, Self::Menu,
        Self::MenuBar, Self::MenuItem, Self::MenuItemCheckbox, Self::MenuItemRadio,
        Self::Navigation, Self::None, Self::Note, Self::Option, Self::Presentation,
        Self::ProgressBar, Self::Radio, Self::RadioGroup, Self::Region, Self::Row,
        Self::RowGroup, Self::RowHeader, Self::ScrollBar, Self::Search, Self::SearchBox,
        Self::Separator, Self::Slider, Self::SpinButton, Self::Status, Self::Switch, Self::Tab,
        Self::Table, Self::TabList, Self::TabPanel, Self::Term, Self::TextBox, Self::Timer,
        Self::Toolbar, Self::ToolTip, Self::Tree, Self::TreeGrid, Self::TreeItem,
    ];

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|role| role.as_str() == lower)
    }

    /// Role name as written in a `role` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::AlertDialog => "alertdialog",
            Self::Application => "application",
            Self::Article => "article",
            Self::Banner => "banner",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::Cell => "cell",
            Self::ColumnHeader => "columnheader",
            Self::ComboBox => "combobox",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Definition => "definition",
            Self::Dialog => "dialog",
            Self::Directory => "directory",
            Self::Document => "document",
            Self::Feed => "feed",
            Self::Figure => "figure",
            Self::Form => "form",
            Self::Grid => "grid",
            Self::GridCell => "gridcell",
            Self::Group => "group",
            Self::Heading => "heading",
            Self::Img => "img",
            Self::Link => "link",
            Self::List => "list",
            Self::ListBox => "listbox",
            Self::ListItem => "listitem",
            Self::Log => "log",
            Self::Main => "main",
            Self::Marquee => "marquee",
            Self::Math => "math",
            Self::Menu => "menu",
            Self::MenuBar => "menubar",
            Self::MenuItem => "menuitem",
            Self::MenuItemCheckbox => "menuitemcheckbox",
            Self::MenuItemRadio => "menuitemradio",
            Self::Navigation => "navigation",
            Self::None => "none",
            Self::Note => "note",
            Self::Option => "option",
            Self::Presentation => "presentation",
            Self::ProgressBar => "progressbar",
            Self::Radio => "radio",
            Self::RadioGroup => "radiogroup",
            Self::Region => "region",
            Self::Row => "row",
            Self::RowGroup => "rowgroup",
            Self::RowHeader => "rowheader",
            Self::ScrollBar => "scrollbar",
            Self::Search => "search",
            Self::SearchBox => "searchbox",
            Self::Separator => "separator",
            Self::Slider => "slider",
            Self::SpinButton => "spinbutton",
            Self::Status => "status",
            Self::Switch => "switch",
            Self::Tab => "tab",
            Self::Table => "table",
            Self::TabList => "tablist",
            Self::TabPanel => "tabpanel",
            Self::Term => "term",
            Self::TextBox => "textbox",
            Self::Timer => "timer",
            Self::Toolbar => "toolbar",
            Self::ToolTip => "tooltip",
            Self::Tree => "tree",
            Self::TreeGrid => "treegrid",
            Self::TreeItem => "treeitem",
        }
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(self,
            Self::Banner | Self::Complementary | Self::ContentInfo |
            Self::Form | Self::Main | Self::Navigation | Self::Region | Self::Search
        )
    }

    /// First token of a `role` attribute value that is not in the vocabulary
    pub fn first_invalid_token(value: &str) -> Option<&str> {
        value.split_ascii_whitespace().find(|token| Self::parse(token).is_none())
    }
}

/// Which roles an element may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAllowance {
    Any,
    NoRole,
    OneOf(&'static [AriaRole]),
}

impl RoleAllowance {
    /// Check a `role` attribute value. The first token decides; the rest
    /// are fallbacks.
    pub fn permits(&self, value: &str) -> bool {
        match self {
            RoleAllowance::Any => true,
            RoleAllowance::NoRole => false,
            RoleAllowance::OneOf(roles) => value
                .split_ascii_whitespace()
                .next()
                .and_then(AriaRole::parse)
                .is_some_and(|role| roles.contains(&role)),
        }
    }
}

use AriaRole as R;

/// `<a href>`
pub const A_WITH_HREF: &[AriaRole] = &[
    R::Button, R::Checkbox, R::MenuItem, R::MenuItemCheckbox, R::MenuItemRadio,
    R::Option, R::Radio, R::Switch, R::Tab, R::TreeItem,
];

/// `<img alt="">`
pub const IMG_EMPTY_ALT: &[AriaRole] = &[R::None, R::Presentation];

/// `<img alt="text">`
pub const IMG_WITH_ALT: &[AriaRole] = &[
    R::Button, R::Checkbox, R::Link, R::MenuItem, R::MenuItemCheckbox, R::MenuItemRadio,
    R::Option, R::ProgressBar, R::ScrollBar, R::Separator, R::Slider, R::Switch, R::Tab,
    R::TreeItem,
];

pub const INPUT_BUTTON: &[AriaRole] = &[
    R::Link, R::MenuItem, R::MenuItemCheckbox, R::MenuItemRadio, R::Option, R::Radio,
    R::Switch, R::Tab,
];

pub const INPUT_CHECKBOX: &[AriaRole] = &[R::Button, R::MenuItemCheckbox, R::Option, R::Switch];

pub const INPUT_IMAGE: &[AriaRole] = &[
    R::Link, R::MenuItem, R::MenuItemCheckbox, R::MenuItemRadio, R::Radio, R::Switch,
];

pub const INPUT_RADIO: &[AriaRole] = &[R::MenuItemRadio];

/// `<input type="text">` without a `list` attribute
pub const INPUT_TEXT: &[AriaRole] = &[R::ComboBox, R::SearchBox, R::SpinButton];

/// Input types that accept no role at all
pub const INPUT_TYPES_WITHOUT_ROLES: &[&str] = &[
    "color", "date", "datetime-local", "email", "file", "month", "number", "password",
    "range", "reset", "search", "submit", "tel", "time", "url", "week",
];

const LIST_CONTAINER: &[AriaRole] = &[
    R::Directory, R::Group, R::ListBox, R::Menu, R::MenuBar, R::None, R::Presentation,
    R::RadioGroup, R::TabList, R::Toolbar, R::Tree,
];

const EMBEDDED: &[AriaRole] = &[R::Application, R::Document, R::Img, R::None, R::Presentation];

const GROUPING: &[AriaRole] = &[R::Group, R::None, R::Presentation];

const PRESENTATIONAL: &[AriaRole] = &[R::None, R::Presentation];

/// Tag-level allow-list, for elements whose allowance does not depend on
/// their attributes
pub fn allowed_roles(tag: &str) -> Option<RoleAllowance> {
    use RoleAllowance::{Any, NoRole, OneOf};

    Some(match tag.to_ascii_lowercase().as_str() {
        "area" | "base" | "body" | "caption" | "col" | "colgroup" | "datalist" | "dd"
        | "details" | "head" | "html" | "label" | "legend" | "main" | "map" | "meta"
        | "meter" | "noscript" | "optgroup" | "param" | "picture" | "progress" | "script"
        | "slot" | "source" | "style" | "summary" | "template" | "textarea" | "title"
        | "track" => NoRole,
        "article" => OneOf(&[
            R::Application, R::Document, R::Feed, R::Main, R::None, R::Presentation, R::Region,
        ]),
        "aside" => OneOf(&[R::Feed, R::None, R::Note, R::Presentation, R::Region, R::Search]),
        "audio" => OneOf(&[R::Application]),
        "br" | "hr" => OneOf(PRESENTATIONAL),
        "button" => OneOf(&[
            R::Checkbox, R::Link, R::MenuItem, R::MenuItemCheckbox, R::MenuItemRadio, R::Option,
            R::Radio, R::Switch, R::Tab,
        ]),
        "dialog" => OneOf(&[R::AlertDialog]),
        "dl" => OneOf(&[R::Group, R::List, R::None, R::Presentation]),
        "dt" => OneOf(&[R::ListItem]),
        "embed" | "iframe" => OneOf(EMBEDDED),
        "fieldset" => OneOf(&[R::None, R::Presentation, R::RadioGroup]),
        "figcaption" | "footer" | "header" => OneOf(GROUPING),
        "form" => OneOf(&[R::None, R::Presentation, R::Search]),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => OneOf(&[R::None, R::Presentation, R::Tab]),
        "li" => OneOf(&[
            R::MenuItem, R::MenuItemCheckbox, R::MenuItemRadio, R::None, R::Option,
            R::Presentation, R::Radio, R::Separator, R::Tab, R::TreeItem,
        ]),
        "menu" | "ol" | "ul" => OneOf(LIST_CONTAINER),
        "object" => OneOf(&[R::Application, R::Document, R::Img]),
        "section" => OneOf(&[
            R::Alert, R::AlertDialog, R::Application, R::Banner, R::Complementary,
            R::ContentInfo, R::Dialog, R::Document, R::Feed, R::Log, R::Main, R::Marquee,
            R::Navigation, R::None, R::Note, R::Presentation, R::Search, R::Status, R::TabPanel,
        ]),
        "svg" => Any,
        _ => return None,
    })
}
