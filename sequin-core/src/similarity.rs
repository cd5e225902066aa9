//! Scoring of filename segments against sibling filenames.
//!
//! A frame counter changes from one sibling to the next while the fixed
//! parts of a name stay put, so a segment whose text differs from the same
//! character range in the siblings is a counter candidate.

use crate::decompose::Segment;

/// Scores how much a segment of the sample differs from its siblings.
///
/// Known weak spot: directories mixing unrelated prefixes (e.g. several
/// cameras) make fixed tokens look variable.
pub trait SegmentScorer {
    /// `offset` is the segment's character offset in the sample root
    fn score(&self, segment: &Segment, offset: usize, sibling_roots: &[&str]) -> usize;

    fn is_candidate(&self, segment: &Segment, score: usize) -> bool {
        score > 0 && segment.is_digits()
    }
}

/// Sums the Levenshtein distance between the segment and the same
/// character range of every sibling root
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl SegmentScorer for EditDistanceScorer {
    fn score(&self, segment: &Segment, offset: usize, sibling_roots: &[&str]) -> usize {
        let len = segment.len();
        sibling_roots
            .iter()
            .map(|root| {
                let window: String = root.chars().skip(offset).take(len).collect();
                levenshtein_distance(&window, &segment.text)
            })
            .sum()
    }
}

/// Minimum number of single-character insertions, deletions or
/// substitutions turning `s` into `t`
pub fn levenshtein_distance(s: &str, t: &str) -> usize {
    let s: Vec<char> = s.chars().collect();
    let t: Vec<char> = t.chars().collect();
    if s.is_empty() {
        return t.len();
    }
    if t.is_empty() {
        return s.len();
    }

    let mut previous: Vec<usize> = (0..=s.len()).collect();
    let mut current = vec![0; s.len() + 1];

    for (j, tc) in t.iter().enumerate() {
        current[0] = j + 1;
        for (i, sc) in s.iter().enumerate() {
            let substitution = previous[i] + usize::from(sc != tc);
            current[i + 1] = substitution
                .min(previous[i + 1] + 1)
                .min(current[i] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s.len()]
}

/// Number of siblings worth sampling when a full scan is not requested.
///
/// Rounds the count down to a power of ten (`4321` -> `1000`); counts whose
/// rounded value is ten or less are scanned completely.
pub fn sample_size(count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let digits = count.ilog10();
    let rounded = 10usize.pow(digits);
    if rounded > 10 {
        rounded
    } else {
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::{Segment, SegmentKind};

    fn digits(text: &str) -> Segment {
        Segment {
            kind: SegmentKind::Digits,
            text: text.to_string(),
        }
    }

    fn literal(text: &str) -> Segment {
        Segment {
            kind: SegmentKind::Literal,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("001", "001"), 0);
        assert_eq!(levenshtein_distance("001", "002"), 1);
    }

    #[test]
    fn test_levenshtein_is_symmetric() {
        assert_eq!(
            levenshtein_distance("frame_0001", "frm_01"),
            levenshtein_distance("frm_01", "frame_0001")
        );
    }

    #[test]
    fn test_scorer_counter_changes() {
        let scorer = EditDistanceScorer;
        let siblings = ["img_000", "img_002"];
        let counter = digits("001");
        let score = scorer.score(&counter, 4, &siblings);
        assert_eq!(score, 2);
        assert!(scorer.is_candidate(&counter, score));
    }

    #[test]
    fn test_scorer_static_prefix() {
        let scorer = EditDistanceScorer;
        let siblings = ["img_000", "img_002"];
        let prefix = literal("img_");
        let score = scorer.score(&prefix, 0, &siblings);
        assert_eq!(score, 0);
        assert!(!scorer.is_candidate(&prefix, score));
    }

    #[test]
    fn test_scorer_literal_never_candidate() {
        let scorer = EditDistanceScorer;
        assert!(!scorer.is_candidate(&literal("abc"), 5));
        assert!(!scorer.is_candidate(&digits("12"), 0));
    }

    #[test]
    fn test_scorer_short_sibling() {
        let scorer = EditDistanceScorer;
        // Sibling ends before the segment: the whole segment counts as distance
        let score = scorer.score(&digits("10"), 4, &["img_"]);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_sample_size() {
        assert_eq!(sample_size(0), 0);
        assert_eq!(sample_size(3), 3);
        assert_eq!(sample_size(10), 10);
        assert_eq!(sample_size(99), 99);
        assert_eq!(sample_size(100), 100);
        assert_eq!(sample_size(4321), 1000);
    }
}
