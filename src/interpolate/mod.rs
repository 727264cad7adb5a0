//! Placeholder interpolation
//!
//! Expands `${name}` placeholders in free text against a [`Resolver`].
//!
//! # Syntax
//!
//! ```text
//! ${name}             replaced by the resolved value
//! ${name?pattern}     pattern (itself a template) if the value is non-empty
//! ${!name?pattern}    pattern if the value is empty
//! ```
//!
//! A placeholder whose name does not resolve is kept verbatim. A `$` that
//! does not open a placeholder, and braces outside one, are literal text.
//! An unterminated placeholder is dropped together with the rest of the
//! template.
//!
//! # Example
//!
//! ```rust
//! use text_processor::interpolate;
//!
//! let resolve = |name: &str| match name {
//!     "user" => Some("ada".to_string()),
//!     "admin" => Some(String::new()),
//!     _ => None,
//! };
//!
//! assert_eq!(interpolate("hi ${user}${admin? (admin)}", &resolve), "hi ada");
//! assert_eq!(interpolate("${!admin?guest} ${missing}", &resolve), "guest ${missing}");
//! ```

mod expression;
mod scanner;

pub use expression::Expression;
pub use scanner::{segments, Segment, Segments, Span};

use std::convert::Infallible;

use log::{debug, trace};

use crate::resolver::Resolver;
use crate::Error;

/// Why an expansion stopped before completing
#[derive(Debug, PartialEq, Eq)]
pub enum Halt<E> {
    /// The resolver failed
    Resolver(E),
    /// Conditional patterns nested deeper than the configured limit
    TooDeep { limit: usize },
}

impl<E> From<Halt<E>> for Error
where
    E: Into<Error>,
{
    fn from(halt: Halt<E>) -> Self {
        match halt {
            Halt::Resolver(e) => e.into(),
            Halt::TooDeep { limit } => Error::DepthExceeded { limit },
        }
    }
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Template expander with an optional recursion cap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interpolator {
    max_depth: Option<usize>,
}

impl Interpolator {
    /// Create an expander without a depth limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many conditional patterns may nest inside each other
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Expand `template` against an infallible resolver
    pub fn expand<R: Resolver + ?Sized>(
        &self,
        template: &str,
        resolver: &R,
    ) -> Result<String, Error> {
        self.try_expand(template, |name| Ok::<_, Infallible>(resolver.resolve(name)))
            .map_err(Error::from)
    }

    /// Expand `template`, stopping at the first resolver error
    pub fn try_expand<E, F>(&self, template: &str, mut resolve: F) -> Result<String, Halt<E>>
    where
        F: FnMut(&str) -> Result<Option<String>, E>,
    {
        self.expand_at(template, &mut resolve, 0)
    }

    fn expand_at<E, F>(
        &self,
        template: &str,
        resolve: &mut F,
        depth: usize,
    ) -> Result<String, Halt<E>>
    where
        F: FnMut(&str) -> Result<Option<String>, E>,
    {
        let mut output = String::with_capacity(template.len());

        for segment in segments(template) {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder { expression, .. } => {
                    let Some(replacement) = resolve(expression.name).map_err(Halt::Resolver)? else {
                        trace!("unresolved placeholder '{}' kept", expression.name);
                        output.push_str("${");
                        output.push_str(expression.raw);
                        output.push('}');
                        continue;
                    };

                    match expression.pattern {
                        None => output.push_str(&replacement),
                        Some(pattern) if expression.takes_pattern(&replacement) => {
                            if let Some(limit) = self.max_depth {
                                if depth >= limit {
                                    return Err(Halt::TooDeep { limit });
                                }
                            }
                            output.push_str(&self.expand_at(pattern, resolve, depth + 1)?);
                        }
                        Some(_) => {}
                    }
                }
                Segment::Unterminated { span } => {
                    debug!(
                        "unterminated placeholder at {}..{} dropped",
                        span.start, span.end
                    );
                }
            }
        }

        Ok(output)
    }
}

/// Expand `template`, resolving each placeholder name through `resolver`
pub fn interpolate<R: Resolver + ?Sized>(template: &str, resolver: &R) -> String {
    match try_interpolate(template, |name| Ok::<_, Infallible>(resolver.resolve(name))) {
        Ok(output) => output,
        Err(never) => match never {},
    }
}

/// Expand `template` with a fallible resolver.
///
/// The first resolver error aborts the expansion and is returned unchanged.
pub fn try_interpolate<E, F>(template: &str, resolve: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<Option<String>, E>,
{
    Interpolator::new()
        .try_expand(template, resolve)
        .map_err(|halt| match halt {
            Halt::Resolver(e) => e,
            Halt::TooDeep { limit } => unreachable!("no depth limit set, yet exceeded {limit}"),
        })
}
