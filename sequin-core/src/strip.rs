//! Removal of separator punctuation around a sequence counter.
//!
//! Used to derive a "description" root from a sequence name, so that
//! `render_0001` yields `render` rather than `render_`.

use crate::decompose::FilenameRoot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of stripping a counter and its neighbouring special characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrippedRoot {
    pub root: String,
    /// Character offset (in the stripped root) to the characters removed there
    pub removed: BTreeMap<usize, String>,
}

impl StrippedRoot {
    fn unchanged(root: String) -> Self {
        Self {
            root,
            removed: BTreeMap::new(),
        }
    }

    /// Drop leading dots so the root does not turn into a hidden file
    pub fn strip_leading_dots(mut self) -> Self {
        let trimmed = self.root.trim_start_matches('.');
        let count = self.root.len() - trimmed.len();
        if count > 0 {
            self.root = trimmed.to_string();
            self.removed.insert(0, ".".repeat(count));
        }
        self
    }
}

/// Byte index where the leading run of special characters ends
fn leading_run_end(s: &str, is_special: &impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !is_special(*c))
        .map_or(s.len(), |(i, _)| i)
}

/// Byte index where the trailing run of special characters starts
fn trailing_run_start(s: &str, is_special: &impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .rev()
        .take_while(|(_, c)| is_special(*c))
        .last()
        .map_or(s.len(), |(i, _)| i)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Remove the digit segment at `digit_index` and the special characters
/// directly adjacent to it.
///
/// Never fails: when the index does not point at a digit segment the root
/// comes back unchanged, and when stripping would leave nothing at all the
/// root is returned with only the digits removed.
pub fn strip_special_chars(
    root: &FilenameRoot,
    digit_index: usize,
    special_chars: &[char],
) -> StrippedRoot {
    let Some(segment) = root.get(digit_index) else {
        return StrippedRoot::unchanged(root.reassemble());
    };
    if !segment.is_digits() {
        return StrippedRoot::unchanged(root.reassemble());
    }

    let body = root.body();
    let original_head: String = body[..digit_index].iter().map(|s| s.text.as_str()).collect();
    let original_tail: String = body[digit_index + 1..]
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    let digits_removed = format!("{original_head}{original_tail}");

    if special_chars.is_empty() {
        return StrippedRoot::unchanged(digits_removed);
    }

    let is_special = |c: char| special_chars.contains(&c);
    let mut head: &str = &original_head;
    let mut tail: &str = &original_tail;
    let mut removed = BTreeMap::new();

    let head_cut = trailing_run_start(head, &is_special);
    let tail_cut = leading_run_end(tail, &is_special);
    let head_run = &original_head[head_cut..];
    let tail_run = &original_tail[..tail_cut];

    if digit_index == 0 {
        if !tail_run.is_empty() {
            removed.insert(0, tail_run.to_string());
            tail = &original_tail[tail_cut..];
        }
    } else if digit_index == body.len() - 1 {
        if !head_run.is_empty() {
            removed.insert(char_len(&original_head[..head_cut]), head_run.to_string());
            head = &original_head[..head_cut];
        }
    } else {
        let head_all = !head_run.is_empty() && head_cut == 0;
        let tail_all = !tail_run.is_empty() && tail_cut == original_tail.len();

        if !head_run.is_empty() && !tail_run.is_empty() && !head_all && !tail_all {
            // Both sides keep content: only the tail's separator goes
            removed.insert(char_len(head), tail_run.to_string());
            tail = &original_tail[tail_cut..];
        } else {
            if head_all {
                removed.insert(0, head_run.to_string());
                head = "";
            }
            if tail_all {
                removed.insert(char_len(head), tail_run.to_string());
                tail = "";
            }
        }
    }

    if head.is_empty() && tail.is_empty() {
        return StrippedRoot::unchanged(digits_removed);
    }

    StrippedRoot {
        root: format!("{head}{tail}"),
        removed,
    }
}
