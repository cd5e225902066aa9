use crate::error::{Result, SequenceError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest counter that still fits in a `u64`
pub const MAX_WIDTH: usize = 19;

/// A decimal counter placeholder of fixed width, or unpadded when `width == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitFormatSpecifier {
    width: usize,
}

impl DigitFormatSpecifier {
    pub fn new(width: usize) -> Result<Self> {
        if width > MAX_WIDTH {
            return Err(SequenceError::InvalidArgument(format!(
                "counter of {} digits is wider than the supported maximum of {} (frame numbers must fit in an unsigned 64-bit integer)",
                width, MAX_WIDTH
            )));
        }
        Ok(Self { width })
    }

    pub const fn unpadded() -> Self {
        Self { width: 0 }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_padded(&self) -> bool {
        self.width > 0
    }

    /// Regex fragment matching a counter of this width.
    ///
    /// Non-strict matching accepts anything from one digit up to the width.
    pub fn to_regex(&self, strict: bool) -> String {
        match (self.width, strict) {
            (0, _) => r"\d+".to_string(),
            (w, true) => format!(r"\d{{{}}}", w),
            (w, false) => format!(r"\d{{1,{}}}", w),
        }
    }

    /// Render a counter value, zero-padded to the width
    pub fn render(&self, value: u64) -> String {
        format!("{:0width$}", value, width = self.width)
    }

    /// printf-style token (`%d`, `%04d`) understood by external converters
    pub fn token(&self) -> String {
        if self.width == 0 {
            "%d".to_string()
        } else {
            format!("%0{}d", self.width)
        }
    }

    /// Parse a printf-style token produced by [`Self::token`]
    pub fn from_token(token: &str) -> Result<Self> {
        let malformed = || {
            SequenceError::InvalidArgument(format!(
                "'{}' is not a valid digit format specifier (expected '%d' or '%0<n>d')",
                token
            ))
        };

        let inner = token
            .strip_prefix('%')
            .and_then(|t| t.strip_suffix('d'))
            .ok_or_else(malformed)?;
        if inner.is_empty() {
            return Ok(Self::unpadded());
        }
        let digits = inner.strip_prefix('0').ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let width: usize = digits.parse().map_err(|_| malformed())?;
        if width == 0 {
            return Err(malformed());
        }
        Self::new(width)
    }
}

impl fmt::Display for DigitFormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Derive a specifier from the literal counter text of a filename.
///
/// A single digit is treated as unpadded; anything longer keeps its length
/// as the padding width.
pub fn parse_digit_format_specifier(numeric: &str) -> Result<DigitFormatSpecifier> {
    if numeric.is_empty() || !numeric.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SequenceError::InvalidArgument(format!(
            "'{}' must be an optionally zero-padded integer number",
            numeric
        )));
    }
    match numeric.len() {
        1 => Ok(DigitFormatSpecifier::unpadded()),
        n => DigitFormatSpecifier::new(n),
    }
}

/// Free-function form of [`DigitFormatSpecifier::to_regex`]
pub fn to_regex(spec: &DigitFormatSpecifier, strict: bool) -> String {
    spec.to_regex(strict)
}
