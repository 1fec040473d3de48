//! Image classification for alt text suggestions
//!
//! The linter never ships a model. Callers plug in an [`ImageClassifier`]
//! and the `img` check turns its object counts into a suggestion such as
//! `2 dogs, 1 person, and 1 frisbee`.

use async_trait::async_trait;
use thiserror::Error;

/// Object detector over an image source
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Detect objects in the image at `src` (an already resolved path)
    async fn classify(&self, src: &str) -> Result<ObjectCounts, ClassifierError>;
}

/// Classifier errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to load image {src}: {reason}")]
    ImageLoad { src: String, reason: String },

    #[error("Model error: {0}")]
    Model(String),
}

/// Detected labels with their counts, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectCounts {
    entries: Vec<(String, usize)>,
}

impl ObjectCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more detection of `label`
    pub fn add(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Suggested alt text, or `None` when nothing was detected
    pub fn suggestion(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let items: Vec<String> = self
            .iter()
            .map(|(label, count)| format!("{} {}", count, pluralize(label, count)))
            .collect();
        Some(join_list(&items))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ObjectCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        for label in iter {
            counts.add(label.as_ref());
        }
        counts
    }
}

const UNCOUNTABLE: &[&str] = &["deer", "fish", "scissors", "series", "sheep", "skis", "species"];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("wife", "wives"),
    ("woman", "women"),
];

/// English plural of `word` for `count`. Multi-word labels pluralize
/// their last word ("wine glass" → "wine glasses").
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }

    let (head, last) = match word.rfind(' ') {
        Some(i) => word.split_at(i + 1),
        None => ("", word),
    };
    let lower = last.to_ascii_lowercase();

    let plural = if UNCOUNTABLE.contains(&lower.as_str()) {
        last.to_string()
    } else if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == lower) {
        plural.to_string()
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        format!("{}es", last)
    } else if lower.ends_with('y') && !lower[..lower.len() - 1].ends_with(['a', 'e', 'i', 'o', 'u']) {
        format!("{}ies", &last[..last.len() - 1])
    } else {
        format!("{}s", last)
    };

    format!("{}{}", head, plural)
}

/// Join as "A", "A and B" or "A, B, and C"
pub fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("dog", 1), "dog");
        assert_eq!(pluralize("dog", 2), "dogs");
        assert_eq!(pluralize("bus", 3), "buses");
        assert_eq!(pluralize("person", 2), "people");
        assert_eq!(pluralize("sheep", 4), "sheep");
        assert_eq!(pluralize("teddy bear", 2), "teddy bears");
        assert_eq!(pluralize("wine glass", 2), "wine glasses");
        assert_eq!(pluralize("puppy", 2), "puppies");
        assert_eq!(pluralize("toy", 0), "toys");
    }

    #[test]
    fn test_join_list() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_list(&items(&["A"])), "A");
        assert_eq!(join_list(&items(&["A", "B"])), "A and B");
        assert_eq!(join_list(&items(&["A", "B", "C"])), "A, B, and C");
    }

    #[test]
    fn test_counts_keep_first_seen_order() {
        let counts: ObjectCounts = ["dog", "person", "dog", "frisbee"].into_iter().collect();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.count("dog"), 2);
        assert_eq!(
            counts.suggestion().as_deref(),
            Some("2 dogs, 1 person, and 1 frisbee")
        );
        assert_eq!(ObjectCounts::new().suggestion(), None);
    }
}
