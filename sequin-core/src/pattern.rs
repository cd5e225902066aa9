use crate::decompose::FilenameRoot;
use crate::digit_format::{parse_digit_format_specifier, DigitFormatSpecifier};
use crate::error::{Result, SequenceError};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PatternPart {
    Literal(String),
    Counter(DigitFormatSpecifier),
}

/// A filename with at most one counter placeholder, extension included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPattern {
    parts: Vec<PatternPart>,
    /// Extension with its leading dot, original case preserved
    extension: String,
}

impl CanonicalPattern {
    /// A pattern with no counter: the root is taken verbatim
    pub fn literal(root: &str, extension: &str) -> Self {
        Self {
            parts: vec![PatternPart::Literal(root.to_string())],
            extension: extension.to_string(),
        }
    }

    /// Build a pattern from a decomposed root, replacing the segment at
    /// `counter_index` with a digit format specifier
    pub fn with_counter(root: &FilenameRoot, counter_index: usize, extension: &str) -> Result<Self> {
        let mut parts: Vec<PatternPart> = Vec::with_capacity(3);
        for (i, segment) in root.body().iter().enumerate() {
            if i == counter_index {
                let spec = parse_digit_format_specifier(&segment.text)?;
                parts.push(PatternPart::Counter(spec));
                continue;
            }
            // Merge neighbouring literals so the pattern stays minimal
            if let Some(PatternPart::Literal(prev)) = parts.last_mut() {
                prev.push_str(&segment.text);
            } else {
                parts.push(PatternPart::Literal(segment.text.clone()));
            }
        }

        if !parts.iter().any(|p| matches!(p, PatternPart::Counter(_))) {
            return Err(SequenceError::InvalidArgument(format!(
                "segment {} does not exist in '{}'",
                counter_index,
                root.reassemble()
            )));
        }

        Ok(Self {
            parts,
            extension: extension.to_string(),
        })
    }

    pub fn parts(&self) -> &[PatternPart] {
        &self.parts
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn counter(&self) -> Option<DigitFormatSpecifier> {
        self.parts.iter().find_map(|p| match p {
            PatternPart::Counter(spec) => Some(*spec),
            PatternPart::Literal(_) => None,
        })
    }

    pub fn has_counter(&self) -> bool {
        self.counter().is_some()
    }

    /// The root with the counter left out
    pub fn literal_root(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                PatternPart::Literal(text) => Some(text.as_str()),
                PatternPart::Counter(_) => None,
            })
            .collect()
    }

    /// Root (no extension) with the counter set to `value`
    pub fn render_root(&self, value: u64) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                PatternPart::Literal(text) => text.clone(),
                PatternPart::Counter(spec) => spec.render(value),
            })
            .collect()
    }

    /// Root (no extension) with the counter replaced by arbitrary text
    pub fn substitute(&self, counter: &str) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                PatternPart::Literal(text) => text.as_str(),
                PatternPart::Counter(_) => counter,
            })
            .collect()
    }

    /// Full filename with the counter set to `value`
    pub fn render(&self, value: u64) -> String {
        format!("{}{}", self.render_root(value), self.extension)
    }

    /// printf-style filename (`img_%03d.jpg`), literal `%` escaped as `%%`
    pub fn token_filename(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                PatternPart::Literal(text) => out.push_str(&text.replace('%', "%%")),
                PatternPart::Counter(spec) => out.push_str(&spec.token()),
            }
        }
        out.push_str(&self.extension.replace('%', "%%"));
        out
    }

    /// Character offset of the counter within the root
    pub fn counter_offset(&self) -> Option<usize> {
        let mut offset = 0;
        for part in &self.parts {
            match part {
                PatternPart::Literal(text) => offset += text.chars().count(),
                PatternPart::Counter(_) => return Some(offset),
            }
        }
        None
    }

    /// Whether the counter sits in the first half of the token filename
    pub fn counter_leads(&self) -> bool {
        let mut offset = 0;
        for part in &self.parts {
            match part {
                PatternPart::Literal(text) => offset += text.replace('%', "%%").chars().count(),
                PatternPart::Counter(_) => {
                    return offset < self.token_filename().chars().count() / 2;
                },
            }
        }
        false
    }

    /// Anchored regex source; the counter is capture group 1
    pub fn to_regex(&self, strict: bool) -> String {
        let mut source = String::from("^");
        for part in &self.parts {
            match part {
                PatternPart::Literal(text) => source.push_str(&regex::escape(text)),
                PatternPart::Counter(spec) => {
                    source.push('(');
                    source.push_str(&spec.to_regex(strict));
                    source.push(')');
                },
            }
        }
        source.push_str(&regex::escape(&self.extension));
        source.push('$');
        source
    }

    pub fn matcher(&self, strict: bool) -> Result<SequenceMatcher> {
        let source = self.to_regex(strict);
        let regex = RegexBuilder::new(&source).build().map_err(|e| {
            SequenceError::InvalidArgument(format!("cannot build pattern regex '{}': {}", source, e))
        })?;
        Ok(SequenceMatcher {
            regex,
            has_counter: self.has_counter(),
        })
    }
}

impl fmt::Display for CanonicalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token_filename())
    }
}

/// Compiled matcher for filenames belonging to a pattern
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    regex: Regex,
    has_counter: bool,
}

impl SequenceMatcher {
    pub fn is_match(&self, filename: &str) -> bool {
        self.regex.is_match(filename)
    }

    /// Text of the counter within a matching filename
    pub fn counter_text<'a>(&self, filename: &'a str) -> Option<&'a str> {
        if !self.has_counter {
            return None;
        }
        self.regex
            .captures(filename)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Numeric counter value, padding ignored
    pub fn counter_value(&self, filename: &str) -> Option<u64> {
        self.counter_text(filename).and_then(|t| t.parse().ok())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
