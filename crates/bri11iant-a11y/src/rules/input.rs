//! `<input>` labelling and role checks

use bri11iant_dom::ElementRef;

use super::RuleContext;
use super::roles::check_allowance;
use crate::aria::{self, RoleAllowance};
use crate::finding::Finding;
use crate::messages;

pub(super) fn check_input(elem: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Option<Finding> {
    // A missing type attribute means a text field
    let input_type = elem.attr("type").map_or_else(|| "text".to_string(), str::to_ascii_lowercase);
    if input_type == "hidden" || ctx.style(elem).is_hidden() {
        return None;
    }

    let aria_label = elem.attr("aria-label");
    let labelledby = elem.attr("aria-labelledby");
    match (aria_label, labelledby) {
        (Some(label), _) if label.trim().is_empty() => {
            return Some(Finding::hint(messages::INPUT_ARIA_LABEL_EMPTY));
        }
        (None, Some(ids)) if ids.trim().is_empty() => {
            return Some(Finding::hint(messages::INPUT_ARIA_LABELLEDBY_EMPTY));
        }
        (None, None) if elem.has_attr("title") => {
            return Some(Finding::hint(messages::INPUT_TITLE_ONLY));
        }
        (None, None) => return Some(Finding::hint(messages::INPUT_NO_LABEL)),
        _ => {}
    }

    let allowance = match input_type.as_str() {
        t if aria::INPUT_TYPES_WITHOUT_ROLES.contains(&t) => RoleAllowance::NoRole,
        "button" => RoleAllowance::OneOf(aria::INPUT_BUTTON),
        "checkbox" => RoleAllowance::OneOf(aria::INPUT_CHECKBOX),
        "image" => RoleAllowance::OneOf(aria::INPUT_IMAGE),
        "radio" => RoleAllowance::OneOf(aria::INPUT_RADIO),
        "text" if !elem.has_attr("list") => RoleAllowance::OneOf(aria::INPUT_TEXT),
        _ => return None,
    };
    check_allowance(elem, allowance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri11iant_css::{ComputedStyle, ComputedStyles};
    use crate::Severity;

    fn run_styled(input: &str, style: Option<ComputedStyle>) -> Option<Finding> {
        let html = format!("<html><body>{}</body></html>", input);
        let doc = bri11iant_html::parse(&html).unwrap();
        let elem = doc.elements().find(|e| e.is("input")).unwrap();
        let mut styles = ComputedStyles::default();
        if let Some(style) = style {
            styles.insert(elem.id(), style);
        }
        check_input(&elem, &RuleContext::new(&doc, &styles))
    }

    fn run(input: &str) -> Option<Finding> {
        run_styled(input, None)
    }

    #[test]
    fn test_unlabelled_input() {
        let finding = run(r#"<input type="text">"#).unwrap();
        assert_eq!(finding.severity, Severity::Hint);
        assert_eq!(finding.message, messages::INPUT_NO_LABEL);
    }

    #[test]
    fn test_label_variants() {
        assert_eq!(run(r#"<input aria-label="">"#).unwrap().message, messages::INPUT_ARIA_LABEL_EMPTY);
        assert_eq!(
            run(r#"<input aria-labelledby="">"#).unwrap().message,
            messages::INPUT_ARIA_LABELLEDBY_EMPTY
        );
        assert_eq!(run(r#"<input title="Name">"#).unwrap().message, messages::INPUT_TITLE_ONLY);
        assert!(run(r#"<input type="text" aria-label="Name">"#).is_none());
        assert!(run(r#"<input type="text" aria-labelledby="name-label">"#).is_none());
    }

    #[test]
    fn test_hidden_inputs_are_exempt() {
        assert!(run(r#"<input type="HIDDEN">"#).is_none());
        let hidden = ComputedStyle {
            visibility: Some("hidden".into()),
            ..ComputedStyle::INITIAL
        };
        assert!(run_styled(r#"<input type="text">"#, Some(hidden)).is_none());
        let none = ComputedStyle {
            display: Some("none".into()),
            ..ComputedStyle::INITIAL
        };
        assert!(run_styled(r#"<input type="text">"#, Some(none)).is_none());
    }

    #[test]
    fn test_role_by_type() {
        let finding = run(r#"<input type="email" aria-label="Mail" role="textbox">"#).unwrap();
        assert_eq!(finding.severity, Severity::Information);
        assert!(run(r#"<input type="checkbox" aria-label="On" role="switch">"#).is_none());
        assert!(run(r#"<input type="checkbox" aria-label="On" role="tab">"#).is_some());
        assert!(run(r#"<input type="text" aria-label="Find" role="searchbox">"#).is_none());
        assert!(run(r#"<input type="text" list="l" aria-label="Find" role="tab">"#).is_none());
        assert!(run(r#"<input aria-label="Find" role="tab">"#).is_some());
        assert!(run(r#"<input type="week" aria-label="Week">"#).is_none());
    }
}
