//! bri11iant Accessibility
//!
//! The accessibility knowledge of the linter:
//! - ARIA role vocabulary and per-element allow-lists
//! - Contrast ratio evaluation
//! - Main content / navigation landmark heuristics
//! - The rule catalog applied to every document
//! - The optional image classifier used to suggest alt text

pub mod aria;
pub mod classifier;
pub mod contrast;
pub mod finding;
pub mod messages;
pub mod navigation;
pub mod rules;

pub use aria::{AriaRole, RoleAllowance};
pub use classifier::{ClassifierError, ImageClassifier, ObjectCounts};
pub use contrast::{ContrastChecker, MINIMUM_CONTRAST_RATIO, contrast};
pub use finding::{Finding, Severity};
pub use navigation::{detect_main_content, detect_navigation_content, is_main_before_nav};
pub use rules::{BODY_SCOPED, CATALOG, CatalogEntry, Check, DOCUMENT_WIDE, ElementKind, RuleContext};
