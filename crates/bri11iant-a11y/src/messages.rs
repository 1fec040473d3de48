//! Message texts shown to the user

pub const DIV_NO_ROLE: &str = r#"Use Semantic HTML5 or specify a WAI-ARIA role [role=""]"#;
pub const SPAN_NO_ROLE: &str = r#"Use Semantic HTML5 or specify a WAI-ARIA role [role=""]"#;
pub const LINK_EMPTY: &str = "Provide a descriptive text in between the tags";

pub const ALT_MISSING: &str =
    r#"Provide an alt text that describes the image, or alt="" if image is purely decorative"#;
pub const ALT_NONDESCRIPTIVE: &str = "Alt attribute must be specifically descriptive";
pub const ALT_BAD_START: &str = r#"Alt text should not begin with "image of" or similar phrasing"#;
pub const ALT_TOO_LONG: &str = "Alt text is too long - most screen readers cut off at 125 characters";

pub const INPUT_ARIA_LABEL_EMPTY: &str = r#"Provide a text within the aria label [aria-label=""]"#;
pub const INPUT_ARIA_LABELLEDBY_EMPTY: &str =
    r#"Provide an id within the aria labelledby [aria-labelledby=""]"#;
pub const INPUT_TITLE_ONLY: &str =
    r#"A title alone is not announced by every screen reader. Provide an aria label [aria-label=""]"#;
pub const INPUT_NO_LABEL: &str = r#"Provide an aria label [aria-label=""]"#;

pub const HTML_LANG: &str = r#"Provide a language [lang=""]"#;
pub const HEAD_TITLE: &str = "Provide a title within the <head> tags";
pub const TITLE_EMPTY: &str = "Provide a text within the <title> tags";

pub const META_MAXIMUM_SCALE: &str = "Avoid using [maximum-scale=1]";
pub const META_USER_SCALABLE: &str = "Enable pinching to zoom [user-scalable=yes]";

pub const AUDIO_TRANSCRIPT: &str = "Provide captions or a transcript for audio content";
pub const VIDEO_CAPTIONS: &str = r#"Provide captions for video content [<track kind="captions">]"#;

pub const SELECT_MULTIPLE: &str =
    "Multiple selection lists are hard to operate with a keyboard; consider a group of checkboxes";
pub const SELECT_ARIA_LIVE: &str =
    r#"Announce changes to dynamic select lists with a live region [aria-live="polite"]"#;

pub const MULTIPLE_MAIN: &str = "Use only one <main> landmark per page";

pub const TABINDEX: &str =
    r#"A tabindex other than 0 or -1 interferes with the focus order. Try restructuring the HTML"#;

/// Missing alt text, optionally with a classifier suggestion
pub fn alt_missing(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(
            r#"Provide an alt text that describes the image, such as "{}", or alt="" if image is purely decorative"#,
            s
        ),
        None => ALT_MISSING.to_string(),
    }
}

pub fn invalid_role(token: &str) -> String {
    format!(r#""{}" is not a valid WAI-ARIA role"#, token)
}

pub fn role_not_allowed(role: &str, tag: &str) -> String {
    format!(r#"The role "{}" is not allowed on <{}>"#, role, tag)
}

pub fn no_roles_allowed(tag: &str) -> String {
    format!("<{}> does not accept a WAI-ARIA role; remove the role attribute", tag)
}

pub fn label_on_generic(tag: &str) -> String {
    format!(
        "ARIA labels on <{}> are not reliably announced; use a semantic element or visible text",
        tag
    )
}

pub fn contrast(ratio: f64) -> String {
    format!(
        "Insufficient color contrast ({:.2}:1). Text needs a contrast ratio of at least 4.5:1",
        ratio
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_missing_suggestion() {
        assert_eq!(alt_missing(None), ALT_MISSING);
        assert!(alt_missing(Some("2 dogs and 1 cat")).contains(r#"such as "2 dogs and 1 cat""#));
    }

    #[test]
    fn test_formatted_messages() {
        assert!(invalid_role("bogus-role").contains("bogus-role"));
        assert!(role_not_allowed("button", "dialog").contains("<dialog>"));
        assert!(contrast(3.0).contains("3.00:1"));
    }
}
