//! `<img>` checks
//!
//! The only asynchronous rule: when alt text is missing, an image
//! classifier may be asked for a suggestion.

use bri11iant_dom::ElementRef;

use super::roles::check_allowance;
use super::{CheckFuture, RuleContext, role_of};
use crate::aria::{self, RoleAllowance};
use crate::finding::Finding;
use crate::messages;

/// Alt text screen readers commonly truncate after
const MAX_ALT_LENGTH: usize = 125;

const NONDESCRIPTIVE: [&str; 5] = ["image", "picture", "logo", "icon", "graphic"];

pub(super) fn check_img<'a>(elem: ElementRef<'a>, ctx: &'a RuleContext<'a>) -> CheckFuture<'a> {
    Box::pin(async move {
        match elem.attr("alt") {
            Some(alt) => check_alt(&elem, alt),
            None => Some(missing_alt(&elem, ctx).await),
        }
    })
}

fn check_alt(elem: &ElementRef<'_>, alt: &str) -> Option<Finding> {
    if role_of(elem).is_some() {
        let allowed = if alt.is_empty() { aria::IMG_EMPTY_ALT } else { aria::IMG_WITH_ALT };
        return check_allowance(elem, RoleAllowance::OneOf(allowed));
    }

    let alt = alt.trim().to_lowercase();
    if alt.is_empty() {
        return None;
    }
    let subject = strip_article(&alt);

    if NONDESCRIPTIVE.contains(&subject) {
        Some(Finding::information(messages::ALT_NONDESCRIPTIVE))
    } else if NONDESCRIPTIVE.iter().any(|word| starts_with_word_of(subject, word)) {
        Some(Finding::information(messages::ALT_BAD_START))
    } else if alt.chars().count() > MAX_ALT_LENGTH {
        Some(Finding::information(messages::ALT_TOO_LONG))
    } else {
        None
    }
}

fn strip_article(alt: &str) -> &str {
    ["a ", "an "]
        .iter()
        .find_map(|article| alt.strip_prefix(article))
        .map_or(alt, str::trim_start)
}

/// "image of …", "picture of …"
fn starts_with_word_of(alt: &str, word: &str) -> bool {
    let mut words = alt.split_whitespace();
    words.next() == Some(word) && words.next() == Some("of")
}

async fn missing_alt(elem: &ElementRef<'_>, ctx: &RuleContext<'_>) -> Finding {
    let suggestion = match (ctx.classifier, elem.attr("src")) {
        (Some(classifier), Some(src)) if !src.is_empty() => match classifier.classify(src).await {
            Ok(counts) => counts.suggestion(),
            Err(err) => {
                tracing::debug!(src, %err, "image classification failed");
                None
            }
        },
        _ => None,
    };

    Finding::error(messages::alt_missing(suggestion.as_deref()))
}
