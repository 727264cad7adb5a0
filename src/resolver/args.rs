//! Positional argument resolver: `${0}`, `${1}`, ...

use crate::value::{to_text, Separator, Value};

use super::{parse_index, Resolver};

/// Resolves numeric names to the argument at that index
#[derive(Debug, Clone, Copy)]
pub struct ArgsResolver<'a> {
    args: &'a [Value<'a>],
}

impl<'a> ArgsResolver<'a> {
    pub fn new(args: &'a [Value<'a>]) -> Self {
        Self { args }
    }
}

impl Resolver for ArgsResolver<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        let index = usize::try_from(parse_index(name)?).ok()?;
        self.args
            .get(index)
            .map(|arg| to_text(arg, Separator::CommaSpace))
    }
}
