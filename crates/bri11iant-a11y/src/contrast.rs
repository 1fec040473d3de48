//! Contrast Evaluation
//!
//! WCAG 2.x relative luminance and contrast ratio.

use bri11iant_css::{ColorError, Rgba, parse_color};

/// Normal text must reach this ratio
pub const MINIMUM_CONTRAST_RATIO: f64 = 4.5;

/// Contrast checker
pub struct ContrastChecker;

impl ContrastChecker {
    /// Calculate relative luminance
    pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
        }
        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }

    /// Calculate contrast ratio between two luminances
    pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Contrast ratio between two colors, alpha ignored.
    /// Rounded to six decimals so black on white is exactly 21.
    pub fn ratio(a: Rgba, b: Rgba) -> f64 {
        let ratio = Self::contrast_ratio(
            Self::luminance(a.r, a.g, a.b),
            Self::luminance(b.r, b.g, b.b),
        );
        (ratio * 1e6).round() / 1e6
    }

    /// Check if contrast meets WCAG AA for normal text
    pub fn meets_aa(ratio: f64) -> bool {
        ratio >= MINIMUM_CONTRAST_RATIO
    }
}

/// Contrast ratio between two CSS color values
pub fn contrast(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(ContrastChecker::ratio(parse_color(a)?, parse_color(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_ratio() {
        let white_lum = ContrastChecker::luminance(255, 255, 255);
        let black_lum = ContrastChecker::luminance(0, 0, 0);
        let ratio = ContrastChecker::contrast_ratio(white_lum, black_lum);
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_black_white_and_equal() {
        assert_eq!(contrast("#000000", "#FFFFFF"), Ok(21.0));
        assert_eq!(contrast("#777777", "#777777"), Ok(1.0));
    }

    #[test]
    fn test_symmetric_across_syntaxes() {
        let a = contrast("navy", "rgb(200, 200, 200)").unwrap();
        let b = contrast("rgb(200, 200, 200)", "#000080").unwrap();
        assert_eq!(a, b);
        assert!(a >= 1.0);
    }

    #[test]
    fn test_wcag() {
        assert!(ContrastChecker::meets_aa(5.0));
        assert!(ContrastChecker::meets_aa(4.5));
        assert!(!ContrastChecker::meets_aa(3.0));
        // #777 on white sits just under the threshold
        let grey = contrast("#777", "#fff").unwrap();
        assert!(grey > 4.4 && grey < 4.5);
    }

    #[test]
    fn test_invalid_color() {
        assert!(contrast("nonsense", "#fff").is_err());
    }
}
