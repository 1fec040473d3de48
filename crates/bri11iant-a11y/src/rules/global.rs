//! Checks applied across the whole document

use bri11iant_css::parse_color;
use bri11iant_dom::ElementRef;

use super::{RuleContext, role_of};
use crate::aria::AriaRole;
use crate::contrast::{ContrastChecker, MINIMUM_CONTRAST_RATIO};
use crate::finding::Finding;
use crate::messages;

pub(super) fn check_role_vocabulary(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    let token = AriaRole::first_invalid_token(role_of(elem)?)?;
    Some(Finding::error(messages::invalid_role(token)))
}

pub(super) fn check_tabindex(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    match elem.attr("tabindex")? {
        "0" | "-1" => None,
        _ => Some(Finding::error(messages::TABINDEX)),
    }
}

pub(super) fn check_contrast(elem: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Option<Finding> {
    let style = ctx.style(elem);
    let background = parse_color(style.background_color.as_deref()?).ok()?;
    if !background.is_opaque() {
        return None;
    }
    let foreground = parse_color(style.color.as_deref()?).ok()?;

    let ratio = ContrastChecker::ratio(foreground, background);
    if ratio < MINIMUM_CONTRAST_RATIO {
        tracing::trace!(tag = elem.tag(), ratio, "low contrast");
        return Some(Finding::error(messages::contrast(ratio)));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri11iant_css::{ComputedStyle, ComputedStyles};
    use bri11iant_dom::Document;

    fn first<'a>(doc: &'a Document, tag: &str) -> ElementRef<'a> {
        doc.elements().find(|e| e.is(tag)).unwrap()
    }

    #[test]
    fn test_role_vocabulary() {
        let doc = bri11iant_html::parse(
            r#"<html><body><div role="bogus-role"></div><nav role="navigation"></nav><p role=" "></p></body></html>"#,
        )
        .unwrap();
        let styles = ComputedStyles::default();
        let ctx = RuleContext::new(&doc, &styles);

        let finding = check_role_vocabulary(&first(&doc, "div"), &ctx).unwrap();
        assert!(finding.message.contains("bogus-role"));
        assert_eq!(finding.severity, crate::Severity::Error);
        assert!(check_role_vocabulary(&first(&doc, "nav"), &ctx).is_none());
        assert!(check_role_vocabulary(&first(&doc, "p"), &ctx).is_none());
    }

    #[test]
    fn test_tabindex() {
        let doc = bri11iant_html::parse(
            r#"<html><body><a tabindex="0"></a><b tabindex="-1"></b><i tabindex="2"></i><u></u></body></html>"#,
        )
        .unwrap();
        let styles = ComputedStyles::default();
        let ctx = RuleContext::new(&doc, &styles);

        assert!(check_tabindex(&first(&doc, "a"), &ctx).is_none());
        assert!(check_tabindex(&first(&doc, "b"), &ctx).is_none());
        assert!(check_tabindex(&first(&doc, "i"), &ctx).is_some());
        assert!(check_tabindex(&first(&doc, "u"), &ctx).is_none());
    }

    #[test]
    fn test_contrast_needs_both_colors() {
        let doc = bri11iant_html::parse("<html><body><p>x</p></body></html>").unwrap();
        let p = first(&doc, "p");
        let mut styles = ComputedStyles::default();
        let ctx_style = |color: Option<&str>, bg: Option<&str>| ComputedStyle {
            color: color.map(String::from),
            background_color: bg.map(String::from),
            ..ComputedStyle::INITIAL
        };

        styles.insert(p.id(), ctx_style(Some("rgb(119, 119, 119)"), Some("rgb(255, 255, 255)")));
        let finding = check_contrast(&p, &RuleContext::new(&doc, &styles)).unwrap();
        assert!(finding.message.contains("4.48:1"));

        styles.insert(p.id(), ctx_style(Some("rgb(0, 0, 0)"), Some("rgb(255, 255, 255)")));
        assert!(check_contrast(&p, &RuleContext::new(&doc, &styles)).is_none());

        styles.insert(p.id(), ctx_style(Some("rgb(119, 119, 119)"), None));
        assert!(check_contrast(&p, &RuleContext::new(&doc, &styles)).is_none());

        styles.insert(p.id(), ctx_style(Some("rgb(119, 119, 119)"), Some("rgba(255, 255, 255, 0.5)")));
        assert!(check_contrast(&p, &RuleContext::new(&doc, &styles)).is_none());
    }
}
