//! Literal substring search over the editor buffer.
//!
//! A linear scan of the full buffer text. Matches are non-overlapping and
//! reported in order; the empty query matches nothing.

use crate::editor::EditorBuffer;

/// A single search hit, located both by byte offset into the full text and
/// by (line, byte-column) for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the match start in the full buffer text.
    pub offset: usize,
    /// Zero-based line index of the match start.
    pub line: usize,
    /// Byte column of the match start within its line.
    pub col: usize,
}

/// Byte offsets of every non-overlapping occurrence of `query` in `text`.
///
/// The empty query is a no-op and returns no matches.
pub fn find_offsets(text: &str, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let mut offsets = Vec::new();
    let mut start = 0;
    while let Some(rel) = text[start..].find(query) {
        let pos = start + rel;
        offsets.push(pos);
        start = pos + query.len();
    }
    offsets
}

/// Locate every occurrence of `query` in the buffer.
pub fn find_matches(buffer: &EditorBuffer, query: &str) -> Vec<Match> {
    let text = buffer.text();
    find_offsets(&text, query)
        .into_iter()
        .map(|offset| {
            let (line, col) = buffer.byte_to_position(offset);
            Match { offset, line, col }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_no_matches() {
        assert!(find_offsets("any buffer content", "").is_empty());
        assert!(find_offsets("", "").is_empty());
    }

    #[test]
    fn test_no_occurrence_returns_empty() {
        assert!(find_offsets("hello world", "zzz").is_empty());
    }

    #[test]
    fn test_cat_dog_cat_offsets() {
        assert_eq!(find_offsets("cat dog cat", "cat"), vec![0, 8]);
    }

    #[test]
    fn test_matches_are_non_overlapping() {
        assert_eq!(find_offsets("aaaa", "aa"), vec![0, 2]);
    }

    #[test]
    fn test_match_at_end_of_text() {
        assert_eq!(find_offsets("xyz abc", "abc"), vec![4]);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        assert!(find_offsets("Cat", "cat").is_empty());
    }

    #[test]
    fn test_find_matches_reports_line_and_col() {
        let buf = EditorBuffer::from_text("cat\ndog cat\ncatnip");
        let matches = find_matches(&buf, "cat");
        assert_eq!(matches.len(), 3);
        assert_eq!((matches[0].line, matches[0].col), (0, 0));
        assert_eq!((matches[1].line, matches[1].col), (1, 4));
        assert_eq!((matches[2].line, matches[2].col), (2, 0));
        assert_eq!(matches[1].offset, 8);
    }

    #[test]
    fn test_find_matches_multibyte_text() {
        let buf = EditorBuffer::from_text("héllo héllo");
        let matches = find_matches(&buf, "héllo");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].offset, 0);
        // 'é' is two bytes, so the second match starts at byte 7
        assert_eq!(matches[1].offset, 7);
        assert_eq!(matches[1].col, 7);
    }
}
