//! Source locations
//!
//! Findings point at elements; the editor wants line/column ranges in the
//! text it sent. An element is found by searching the text for its
//! serialization key, with two fallbacks for markup the parser normalized.

use bri11iant_dom::{Document, ElementRef};

use crate::diagnostics::{Position, Range};

/// Byte offset to line / UTF-16 column conversion
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset. Offsets past the end or inside a
    /// character are clamped back.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let character = self.text[start..offset].encode_utf16().count();
        Position::new(line as u32, character as u32)
    }

    /// Byte offset of a position, clamped to its line
    pub fn offset(&self, position: Position) -> usize {
        let Some(&start) = self.line_starts.get(position.line as usize) else {
            return self.text.len();
        };
        let end = self
            .line_starts
            .get(position.line as usize + 1)
            .map_or(self.text.len(), |&next| next - 1);

        let mut units = 0;
        for (i, c) in self.text[start..end].char_indices() {
            if units >= position.character as usize {
                return start + i;
            }
            units += c.len_utf16();
        }
        end
    }

    pub fn range(&self, start: usize, end: usize) -> Range {
        Range::new(self.position(start), self.position(end))
    }

    /// Text covered by a range
    pub fn slice(&self, range: Range) -> &'a str {
        let start = self.offset(range.start);
        let end = self.offset(range.end).max(start);
        &self.text[start..end]
    }
}

/// Maps elements of a parsed document back to the text it came from
#[derive(Debug)]
pub struct Locator<'a> {
    text: &'a str,
    lowercase: String,
    prefix: &'a str,
    index: LineIndex<'a>,
}

impl<'a> Locator<'a> {
    /// `prefix` is the directory injected by resource path resolution
    pub fn new(text: &'a str, prefix: &'a str) -> Self {
        Self {
            text,
            lowercase: text.to_ascii_lowercase(),
            prefix,
            index: LineIndex::new(text),
        }
    }

    pub fn index(&self) -> &LineIndex<'a> {
        &self.index
    }

    /// Range of `elem`: its opening tag, or the whole element when
    /// `extended`. Empty range at the start when it cannot be found.
    pub fn locate(&self, doc: &Document, elem: &ElementRef<'_>, extended: bool) -> Range {
        let (start, end) = self.span(doc, elem, extended).unwrap_or((0, 0));
        self.index.range(start, end)
    }

    fn span(&self, doc: &Document, elem: &ElementRef<'_>, extended: bool) -> Option<(usize, usize)> {
        let key = elem.outer_html();
        if let Some(span) = self.find_key(&key, extended) {
            return Some(span);
        }

        if !self.prefix.is_empty() && key.contains(self.prefix) {
            let stripped = key.replace(self.prefix, "");
            if let Some(span) = self.find_key(&stripped, extended) {
                return Some(span);
            }
        }

        tracing::trace!(tag = elem.tag(), "serialization key not in source, matching by tag");
        self.nth_tag(doc, elem)
    }

    /// First occurrence of `key`
    fn find_key(&self, key: &str, extended: bool) -> Option<(usize, usize)> {
        let start = self.text.find(key)?;
        let len = if extended { key.len() } else { opening_tag_len(key).unwrap_or(key.len()) };
        Some((start, start + len))
    }

    /// Opening tag of the n-th `<tag` in the text, where n is the
    /// element's index among elements with the same tag
    fn nth_tag(&self, doc: &Document, elem: &ElementRef<'_>) -> Option<(usize, usize)> {
        let tag = elem.tag().to_ascii_lowercase();
        let n = doc.elements().filter(|e| e.is(&tag)).position(|e| e.id() == elem.id())?;

        let needle = format!("<{}", tag);
        let start = self
            .lowercase
            .match_indices(&needle)
            .map(|(i, _)| i)
            .filter(|&i| {
                self.lowercase[i + needle.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
            })
            .nth(n)?;

        let len = opening_tag_len(&self.text[start..])?;
        Some((start, start + len))
    }
}

/// Length of the opening tag at the start of `markup`, through the first
/// `>` outside quoted attribute values
fn opening_tag_len(markup: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in markup.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}
