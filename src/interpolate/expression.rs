//! Placeholder expressions: `["!"] name ["?" pattern]`

use std::fmt;

/// The parsed body of a `${...}` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression<'a> {
    /// Text between `${` and the matching `}`, untouched
    pub raw: &'a str,
    /// Trimmed name with any leading `!` removed
    pub name: &'a str,
    /// True when the name was prefixed with `!`
    pub invert: bool,
    /// Sub-template after the first `?`, not yet expanded
    pub pattern: Option<&'a str>,
}

impl<'a> Expression<'a> {
    /// Split raw placeholder text into name, negation and pattern.
    ///
    /// A `?` in first position does not start a pattern; it stays part of
    /// the name.
    pub fn parse(raw: &'a str) -> Self {
        let (name, pattern) = match raw.find('?') {
            Some(pos) if pos > 0 => (trim_control(&raw[..pos]), Some(&raw[pos + 1..])),
            _ => (trim_control(raw), None),
        };

        let (name, invert) = match name.strip_prefix('!') {
            Some(rest) => (trim_control(rest), true),
            None => (name, false),
        };

        Self {
            raw,
            name,
            invert,
            pattern,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.pattern.is_some()
    }

    /// Byte offset of the pattern within `raw`
    pub fn pattern_offset(&self) -> Option<usize> {
        self.pattern.map(|p| self.raw.len() - p.len())
    }

    /// Whether a conditional placeholder takes its pattern for `replacement`.
    ///
    /// Non-empty means true; `!` flips the decision.
    pub fn takes_pattern(&self, replacement: &str) -> bool {
        self.invert == replacement.is_empty()
    }
}

/// Strip spaces and ASCII control characters; other Unicode whitespace stays
fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

/// Renders the placeholder back in its source form, `${raw}`
impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}}}", self.raw)
    }
}
