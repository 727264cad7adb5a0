//! Configuration resolver

use crate::config::Configuration;

use super::{parse_index, Resolver};

/// Resolves names as configuration keys.
///
/// Integer names are reserved for positional arguments and never resolve
/// here, so a template can go through an argument pass and a configuration
/// pass in either order.
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'a> {
    config: Option<&'a Configuration>,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(config: Option<&'a Configuration>) -> Self {
        Self { config }
    }
}

impl Resolver for ConfigResolver<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        let config = self.config?;
        if parse_index(name).is_some() || !config.contains_value(name) {
            return None;
        }
        Some(config.get_value(name).as_str().unwrap_or_default().to_string())
    }
}
