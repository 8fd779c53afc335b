//! Low-level scanning helpers over raw source text.
//!
//! Everything here works on byte offsets into the original `&str`. The
//! delimiters involved are all ASCII, so every offset returned is a valid
//! char boundary.

use regex::Regex;

pub(crate) fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// Read a quoted literal (`'`, `"` or `` ` ``) starting at `start`, after
/// skipping leading whitespace.
///
/// Returns the literal's contents and the offset just past the closing
/// quote. Escapes are not interpreted: the literal ends at the next
/// occurrence of the opening quote character.
pub(crate) fn read_string_literal(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = text.get(start..)?;
    let trimmed = rest.trim_start();
    let open = start + (rest.len() - trimmed.len());
    let quote = trimmed.chars().next()?;
    if quote != '\'' && quote != '"' && quote != '`' {
        return None;
    }
    let body_start = open + 1;
    let end = text[body_start..].find(quote)?;
    Some((&text[body_start..body_start + end], body_start + end + 1))
}

/// Given the offset of an opening delimiter, return the offset of the
/// delimiter that brings the depth back to zero.
///
/// Delimiters inside string or template literals are counted like any
/// other; callers accept that miscount as a known limitation.
pub(crate) fn matching_delimiter(text: &str, open_at: usize, open: u8, close: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open_at) != Some(&open) {
        return None;
    }
    let mut depth: usize = 0;
    for (offset, &byte) in bytes[open_at..].iter().enumerate() {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_at + offset);
            }
        }
    }
    None
}

/// Offset of the first non-whitespace byte at or after `start`.
pub(crate) fn skip_whitespace(text: &str, start: usize) -> usize {
    let rest = &text[start.min(text.len())..];
    start.min(text.len()) + (rest.len() - rest.trim_start().len())
}

/// Maps byte offsets to 1-based line numbers.
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub(crate) fn line_of(&self, offset: usize) -> u32 {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        (line + 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string_literal_quotes() {
        assert_eq!(read_string_literal("  '/a'", 0), Some(("/a", 6)));
        assert_eq!(read_string_literal("\"/b\" ,", 0), Some(("/b", 4)));
        assert_eq!(read_string_literal("`/c/${x}`", 0), Some(("/c/${x}", 9)));
        assert_eq!(read_string_literal("handler", 0), None);
        assert_eq!(read_string_literal("'unterminated", 0), None);
    }

    #[test]
    fn test_read_string_literal_stops_at_escaped_quote() {
        let (path, _) = read_string_literal(r"'/it\'s'", 0).unwrap();
        assert_eq!(path, r"/it\");
    }

    #[test]
    fn test_matching_delimiter_nested() {
        let text = "{ if (a) { b(); } else { c(); } }";
        assert_eq!(matching_delimiter(text, 0, b'{', b'}'), Some(text.len() - 1));
        assert_eq!(matching_delimiter(text, 9, b'{', b'}'), Some(16));
        assert_eq!(matching_delimiter("{ {", 0, b'{', b'}'), None);
        assert_eq!(matching_delimiter("x{}", 0, b'{', b'}'), None);
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(1), 1);
        assert_eq!(index.line_of(2), 2);
        assert_eq!(index.line_of(5), 3);
        assert_eq!(index.line_of(6), 4);
    }
}
