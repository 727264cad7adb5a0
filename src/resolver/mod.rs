//! Name resolvers
//!
//! A [`Resolver`] maps a placeholder name to its replacement text, or to
//! `None` when it has no mapping. `Some("")` is a real value: it selects the
//! empty branch of a conditional placeholder instead of leaving the
//! placeholder untouched.
//!
//! Four sources are provided: configuration keys ([`ConfigResolver`]),
//! positional arguments ([`ArgsResolver`]), object fields ([`ObjectResolver`])
//! and string-keyed maps ([`MapResolver`]). Any `Fn(&str) -> Option<String>`
//! closure is a resolver too.

mod args;
mod config;
mod map;
mod object;

pub use args::ArgsResolver;
pub use config::ConfigResolver;
pub use map::MapResolver;
pub use object::{Navigable, ObjectResolver};

/// Maps a placeholder name to replacement text
pub trait Resolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Parse a placeholder name as a positional index, as `i32` text
pub(crate) fn parse_index(name: &str) -> Option<i32> {
    name.parse::<i32>().ok()
}
