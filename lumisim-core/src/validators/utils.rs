//! Common Validation Utilities
//!
//! Shared parsing and range checks used by every input validator. All
//! functions are pure and never panic on user text.
//!
//! ## Draft Parsing
//!
//! While the user is typing, a field passes through states that are not yet
//! numbers: `""`, `"-"`, `"1."`, `"1e"`. These must not be reported as
//! errors, let alone clamped, or two-digit entry becomes impossible (typing
//! `1` on the way to `12` would snap to the minimum). [`parse_draft`] tells
//! "not a number yet" apart from "never going to be a number".
//!
//! ```text
//! ""       -> Empty
//! "1e"     -> Incomplete
//! "12,5"   -> Number(12.5)      (comma decimal separator)
//! "abc"    -> NotANumber
//! ```

use alloc::string::String;

use crate::traits::Validatable;

/// Outcome of parsing a field that may still be in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedDraft {
    /// Nothing entered
    Empty,
    /// A prefix of a valid number
    Incomplete,
    /// Cannot become a number by typing more
    NotANumber,
    /// Finite number
    Number(f64),
}

/// Parse user text, accepting `,` as the decimal separator
pub fn parse_draft(raw: &str) -> ParsedDraft {
    let text = raw.trim();
    if text.is_empty() {
        return ParsedDraft::Empty;
    }

    let normalized: String = text.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_valid() => ParsedDraft::Number(value),
        Ok(_) => ParsedDraft::NotANumber,
        Err(_) if is_number_prefix(&normalized) => ParsedDraft::Incomplete,
        Err(_) => ParsedDraft::NotANumber,
    }
}

/// True for text that more typing could turn into a number
///
/// Accepts prefixes of `[+-]digits[.digits][(e|E)[+-]digits]`. The exponent
/// needs at least one mantissa digit before it.
fn is_number_prefix(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    if matches!(chars.peek(), Some('+' | '-')) {
        chars.next();
    }

    let mut mantissa_digits = false;
    let mut seen_point = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => mantissa_digits = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        chars.next();
    }

    match chars.next() {
        None => true,
        Some('e' | 'E') if mantissa_digits => {
            if matches!(chars.peek(), Some('+' | '-')) {
                chars.next();
            }
            chars.all(|c| c.is_ascii_digit())
        }
        Some(_) => false,
    }
}

/// Check a finite value against a positive minimum
pub fn meets_minimum(value: f64, min: f64) -> bool {
    value.is_valid() && value >= min
}
