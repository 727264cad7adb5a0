//! Object-graph resolver: `${user.address.city}`

use std::fmt;

use crate::value::{to_text, Separator, Value};

use super::Resolver;

/// A type whose fields can be reached from a placeholder path.
///
/// Lookup of a path segment tries [`field`](Navigable::field) on the object
/// and then along its [`parent`](Navigable::parent) chain, and only then
/// [`accessor`](Navigable::accessor) along the same chain. Any segment that
/// nothing answers makes the whole path unresolved.
///
/// Plain structs can use the [`navigable!`](crate::navigable) macro.
pub trait Navigable: fmt::Debug {
    /// A stored field by name
    fn field(&self, name: &str) -> Option<Value<'_>>;

    /// The embedded value whose fields this type inherits
    fn parent(&self) -> Option<&dyn Navigable> {
        None
    }

    /// A computed, argument-free property by name
    fn accessor(&self, _name: &str) -> Option<Value<'_>> {
        None
    }
}

/// Look up one path segment on `object`
fn lookup<'a>(object: &'a dyn Navigable, name: &str) -> Option<Value<'a>> {
    let chain = || {
        std::iter::successors(Some(object), |current: &&'a dyn Navigable| {
            let current: &'a dyn Navigable = *current;
            current.parent()
        })
    };

    chain()
        .find_map(|o| o.field(name))
        .or_else(|| chain().find_map(|o| o.accessor(name)))
}

/// Follow a dotted path from `object`
fn lookup_path<'a>(object: &'a dyn Navigable, path: &str) -> Option<Value<'a>> {
    match path.find('.') {
        Some(pos) if pos > 0 => match lookup(object, &path[..pos])? {
            Value::Object(inner) => lookup_path(inner, &path[pos + 1..]),
            _ => None,
        },
        _ => lookup(object, path),
    }
}

/// Resolves dotted paths against a root object
#[derive(Debug, Clone, Copy)]
pub struct ObjectResolver<'a> {
    root: Option<&'a dyn Navigable>,
}

impl<'a> ObjectResolver<'a> {
    pub fn new(root: Option<&'a dyn Navigable>) -> Self {
        Self { root }
    }
}

impl Resolver for ObjectResolver<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        let value = lookup_path(self.root?, name)?;
        Some(to_text(&value, Separator::CommaSpace))
    }
}
