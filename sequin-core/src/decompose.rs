//! Splitting of filename roots into alternating literal and digit runs.

use crate::error::{Result, SequenceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Literal,
    Digits,
}

impl SegmentKind {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            Self::Digits
        } else {
            Self::Literal
        }
    }
}

/// A maximal run of characters of the same kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn is_digits(&self) -> bool {
        self.kind == SegmentKind::Digits
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A filename root (no extension) decomposed into segments.
///
/// Concatenating the segments always gives back the original root, and two
/// neighbouring segments never share the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameRoot {
    segments: Vec<Segment>,
}

/// Head, midsection and tail view over a decomposed root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadMidTail<'a> {
    pub head: &'a Segment,
    /// Present only when the root has three or more segments
    pub mid: Option<&'a [Segment]>,
    /// Present only when the root has two or more segments
    pub tail: Option<&'a Segment>,
}

impl FilenameRoot {
    /// All segments in order
    pub fn body(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn head_mid_tail(&self) -> HeadMidTail<'_> {
        let n = self.segments.len();
        HeadMidTail {
            head: &self.segments[0],
            mid: (n >= 3).then(|| &self.segments[1..n - 1]),
            tail: (n >= 2).then(|| &self.segments[n - 1]),
        }
    }

    /// Character offset at which the segment at `index` starts
    pub fn char_offset(&self, index: usize) -> usize {
        self.segments[..index.min(self.segments.len())]
            .iter()
            .map(Segment::len)
            .sum()
    }

    /// Indices of all digit segments
    pub fn digit_indices(&self) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_digits())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn reassemble(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Split a filename root into maximal literal and digit runs.
pub fn decompose(root: &str) -> Result<FilenameRoot> {
    let mut chars = root.chars();
    let Some(first) = chars.next() else {
        return Err(SequenceError::InvalidArgument(
            "cannot decompose an empty filename root".to_string(),
        ));
    };

    let mut segments = vec![Segment {
        kind: SegmentKind::of(first),
        text: first.to_string(),
    }];

    for c in chars {
        let kind = SegmentKind::of(c);
        // segments is never empty here
        let last = segments.len() - 1;
        if segments[last].kind == kind {
            segments[last].text.push(c);
        } else {
            segments.push(Segment {
                kind,
                text: c.to_string(),
            });
        }
    }

    Ok(FilenameRoot { segments })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(root: &FilenameRoot) -> Vec<&str> {
        root.body().iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_decompose_mixed_root() {
        let root = decompose("20200504_my-file_0075").unwrap();
        assert_eq!(texts(&root), vec!["20200504", "_my-file_", "0075"]);
        assert!(root.body()[0].is_digits());
        assert!(!root.body()[1].is_digits());
        assert!(root.body()[2].is_digits());
    }

    #[test]
    fn test_decompose_trailing_digits() {
        let root = decompose("my_file75").unwrap();
        let view = root.head_mid_tail();
        assert_eq!(view.head.text, "my_file");
        assert!(view.mid.is_none());
        assert_eq!(view.tail.unwrap().text, "75");
    }

    #[test]
    fn test_decompose_no_digits() {
        let root = decompose("my_file").unwrap();
        let view = root.head_mid_tail();
        assert_eq!(view.head.text, "my_file");
        assert!(view.mid.is_none());
        assert!(view.tail.is_none());
    }

    #[test]
    fn test_decompose_multi_part_mid() {
        let root = decompose("a1b2c").unwrap();
        let view = root.head_mid_tail();
        assert_eq!(view.head.text, "a");
        let mid: Vec<&str> = view.mid.unwrap().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(mid, vec!["1", "b", "2"]);
        assert_eq!(view.tail.unwrap().text, "c");
    }

    #[test]
    fn test_decompose_single_char() {
        let root = decompose("7").unwrap();
        assert_eq!(root.len(), 1);
        assert!(root.body()[0].is_digits());
    }

    #[test]
    fn test_decompose_empty_fails() {
        assert!(matches!(
            decompose(""),
            Err(SequenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_char_offset_counts_chars_not_bytes() {
        let root = decompose("été_042").unwrap();
        assert_eq!(texts(&root), vec!["été_", "042"]);
        assert_eq!(root.char_offset(1), 4);
        assert_eq!(root.reassemble(), "été_042");
    }

    #[test]
    fn test_digit_indices() {
        let root = decompose("cam2_take_0010").unwrap();
        assert_eq!(root.digit_indices(), vec![1, 3]);
    }
}
