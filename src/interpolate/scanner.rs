//! Segment scanner
//!
//! Splits a template into literal text, complete placeholders and an
//! optional unterminated tail. Literal text is every character outside a
//! placeholder except the `$` that opens one, so all segments borrow from
//! the template.

use std::str::CharIndices;

use super::expression::Expression;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

/// One piece of a scanned template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, emitted as-is
    Text(&'a str),
    /// A complete `${...}` placeholder; `span` covers the delimiters
    Placeholder { expression: Expression<'a>, span: Span },
    /// A `${` that is never closed; runs to the end of the template
    Unterminated { span: Span },
}

/// Iterator over the segments of a template
pub struct Segments<'a> {
    source: &'a str,
    chars: CharIndices<'a>,
    text_start: usize,
    prev: Option<char>,
    pending: Option<Segment<'a>>,
    finished: bool,
}

/// Scan `template` into segments
pub fn segments(template: &str) -> Segments<'_> {
    Segments {
        source: template,
        chars: template.char_indices(),
        text_start: 0,
        prev: None,
        pending: None,
        finished: false,
    }
}

impl<'a> Segments<'a> {
    /// Consume the body of a placeholder whose `$` sits at `open`.
    fn placeholder(&mut self, open: usize) -> Segment<'a> {
        let body = open + 2;
        let mut level = 1usize;

        for (index, c) in self.chars.by_ref() {
            match c {
                '{' => level += 1,
                '}' => {
                    level -= 1;
                    if level == 0 {
                        self.prev = Some(c);
                        self.text_start = index + 1;
                        return Segment::Placeholder {
                            expression: Expression::parse(&self.source[body..index]),
                            span: open..index + 1,
                        };
                    }
                }
                _ => {}
            }
        }

        self.finished = true;
        self.text_start = self.source.len();
        Segment::Unterminated {
            span: open..self.source.len(),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        if self.finished {
            return None;
        }

        while let Some((index, c)) = self.chars.next() {
            let prev = self.prev.replace(c);
            if c != '{' || prev != Some('$') {
                continue;
            }

            // `$` is a single byte
            let open = index - 1;
            let text = &self.source[self.text_start..open];
            let placeholder = self.placeholder(open);
            if text.is_empty() {
                return Some(placeholder);
            }
            self.pending = Some(placeholder);
            return Some(Segment::Text(text));
        }

        self.finished = true;
        let text = &self.source[self.text_start..];
        (!text.is_empty()).then_some(Segment::Text(text))
    }
}
