//! Checks specific to one element type

use bri11iant_dom::ElementRef;

use super::{RuleContext, role_of};
use super::roles::check_allowance;
use crate::aria::{self, RoleAllowance};
use crate::finding::Finding;
use crate::messages;
use crate::navigation::detect_main_content;

const LABEL_ATTRIBUTES: [&str; 3] = ["aria-label", "aria-labelledby", "aria-describedby"];

/// `<a>`
pub(super) fn check_link_text(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    if elem.inner_html().is_empty() {
        return Some(Finding::warning(messages::LINK_EMPTY).extended());
    }
    if elem.has_attr("href") {
        return check_allowance(elem, RoleAllowance::OneOf(aria::A_WITH_HREF));
    }
    None
}

/// `<div>` and `<span>` without a role carry no semantics
pub(super) fn check_generic_role(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    if role_of(elem).is_some() {
        return None;
    }
    let message = if elem.is("span") { messages::SPAN_NO_ROLE } else { messages::DIV_NO_ROLE };
    Some(Finding::information(message))
}

/// ARIA labels on `<div>`, `<span>` and `<p>`
pub(super) fn check_generic_label(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    if LABEL_ATTRIBUTES.iter().any(|a| elem.has_attr(a)) {
        return Some(Finding::warning(messages::label_on_generic(elem.tag())));
    }
    None
}

pub(super) fn check_html_lang(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    match elem.attr("lang") {
        Some(lang) if !lang.trim().is_empty() => None,
        _ => Some(Finding::error(messages::HTML_LANG)),
    }
}

pub(super) fn check_head_title(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    match elem.find_descendant("title") {
        Some(_) => None,
        None => Some(Finding::error(messages::HEAD_TITLE)),
    }
}

pub(super) fn check_title_text(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    if elem.text_content().trim().is_empty() {
        return Some(Finding::error(messages::TITLE_EMPTY).extended());
    }
    None
}

/// `name=value` pairs of a viewport `content` attribute
fn viewport_properties<'a>(elem: &ElementRef<'a>) -> impl Iterator<Item = (String, &'a str)> {
    elem.attr("content")
        .unwrap_or_default()
        .split([',', ';'])
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_ascii_lowercase(), value.trim()))
        })
}

pub(super) fn check_meta_maximum_scale(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    let limited = viewport_properties(elem).any(|(name, value)| {
        name == "maximum-scale" && value.parse::<f64>().is_ok_and(|scale| scale <= 1.0)
    });
    limited.then(|| Finding::information(messages::META_MAXIMUM_SCALE).extended())
}

pub(super) fn check_meta_user_scalable(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    let disabled = viewport_properties(elem).any(|(name, value)| {
        name == "user-scalable" && (value.eq_ignore_ascii_case("no") || value == "0")
    });
    disabled.then(|| Finding::information(messages::META_USER_SCALABLE).extended())
}

pub(super) fn check_audio_transcript(_elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    Some(Finding::hint(messages::AUDIO_TRANSCRIPT))
}

pub(super) fn check_video_captions(_elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    Some(Finding::hint(messages::VIDEO_CAPTIONS))
}

pub(super) fn check_select(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    if elem.has_attr("multiple") {
        Some(Finding::hint(messages::SELECT_MULTIPLE))
    } else if !elem.has_attr("aria-live") {
        Some(Finding::hint(messages::SELECT_ARIA_LIVE))
    } else {
        None
    }
}

/// `<body>`: more than one `<main>` leaves the main content ambiguous
pub(super) fn check_single_main(_elem: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Option<Finding> {
    match detect_main_content(ctx.document) {
        Some(_) => None,
        None => Some(Finding::warning(messages::MULTIPLE_MAIN)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bri11iant_css::ComputedStyles;
    use crate::Severity;

    type SyncFn = fn(&ElementRef<'_>, &RuleContext<'_>) -> Option<Finding>;

    fn run(html: &str, tag: &str, check: SyncFn) -> Option<Finding> {
        let doc = bri11iant_html::parse(html).unwrap();
        let styles = ComputedStyles::default();
        let ctx = RuleContext::new(&doc, &styles);
        let elem = doc.elements().find(|e| e.is(tag)).unwrap();
        check(&elem, &ctx)
    }

    fn body(inner: &str) -> String {
        format!(r#"<html lang="en"><head><title>t</title></head><body>{}</body></html>"#, inner)
    }

    #[test]
    fn test_link_text() {
        let empty = run(&body(r#"<a href="/"></a>"#), "a", check_link_text).unwrap();
        assert_eq!(empty.severity, Severity::Warning);
        assert!(empty.extended);

        assert!(run(&body(r#"<a href="/">Home</a>"#), "a", check_link_text).is_none());
        assert!(run(&body(r#"<a href="/" role="tab">Home</a>"#), "a", check_link_text).is_none());
        let bad_role = run(&body(r#"<a href="/" role="heading">Home</a>"#), "a", check_link_text).unwrap();
        assert_eq!(bad_role.severity, Severity::Information);
        assert!(run(&body(r#"<a role="heading">Home</a>"#), "a", check_link_text).is_none());
    }

    #[test]
    fn test_generic_elements() {
        assert!(run(&body("<div>x</div>"), "div", check_generic_role).is_some());
        assert!(run(&body(r#"<div role="region">x</div>"#), "div", check_generic_role).is_none());
        assert!(run(&body(r#"<span aria-label="x">x</span>"#), "span", check_generic_label).is_some());
        assert!(run(&body(r#"<p aria-describedby="d">x</p>"#), "p", check_generic_label).is_some());
        assert!(run(&body("<p>x</p>"), "p", check_generic_label).is_none());
    }

    #[test]
    fn test_document_structure() {
        let bare = "<html><head></head><body></body></html>";
        assert_eq!(run(bare, "html", check_html_lang).map(|f| f.severity), Some(Severity::Error));
        assert!(run(bare, "head", check_head_title).is_some());
        assert!(run(&body(""), "html", check_html_lang).is_none());
        assert!(run(&body(""), "head", check_head_title).is_none());

        let blank_title = "<html><head><title>  </title></head></html>";
        assert!(run(blank_title, "title", check_title_text).is_some_and(|f| f.extended));
        assert!(run(&body(""), "title", check_title_text).is_none());
    }

    #[test]
    fn test_viewport_meta() {
        let meta = |content: &str| {
            format!(r#"<html><head><meta name="viewport" content="{}"></head></html>"#, content)
        };
        let locked = meta("width=device-width, maximum-scale=1, user-scalable=no");
        assert!(run(&locked, "meta", check_meta_maximum_scale).is_some());
        assert!(run(&locked, "meta", check_meta_user_scalable).is_some());

        let open = meta("width=device-width, maximum-scale=5, user-scalable=yes");
        assert!(run(&open, "meta", check_meta_maximum_scale).is_none());
        assert!(run(&open, "meta", check_meta_user_scalable).is_none());

        assert!(run(&meta("user-scalable=0"), "meta", check_meta_user_scalable).is_some());
    }

    #[test]
    fn test_media_and_select() {
        assert!(run(&body("<video></video>"), "video", check_video_captions).is_some());
        assert!(run(&body("<audio></audio>"), "audio", check_audio_transcript).is_some());
        let multiple = run(&body("<select multiple></select>"), "select", check_select).unwrap();
        assert_eq!(multiple.message, messages::SELECT_MULTIPLE);
        let plain = run(&body("<select></select>"), "select", check_select).unwrap();
        assert_eq!(plain.message, messages::SELECT_ARIA_LIVE);
        assert!(run(&body(r#"<select aria-live="polite"></select>"#), "select", check_select).is_none());
    }

    #[test]
    fn test_single_main() {
        assert!(run(&body("<main></main>"), "body", check_single_main).is_none());
        assert!(run(&body("<main></main><main></main>"), "body", check_single_main).is_some());
    }
}
