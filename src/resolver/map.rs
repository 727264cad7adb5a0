//! Map resolver

use std::collections::HashMap;

use crate::value::{to_text, Separator, ToValue};

use super::Resolver;

/// Resolves names as keys of a string-keyed map
#[derive(Debug)]
pub struct MapResolver<'a, V> {
    map: Option<&'a HashMap<String, V>>,
}

impl<'a, V> MapResolver<'a, V> {
    pub fn new(map: Option<&'a HashMap<String, V>>) -> Self {
        Self { map }
    }
}

impl<V: ToValue> Resolver for MapResolver<'_, V> {
    fn resolve(&self, name: &str) -> Option<String> {
        let value = self.map?.get(name)?;
        Some(to_text(&value.to_value(), Separator::CommaSpace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_present_and_missing_keys() {
        let mut map = HashMap::new();
        map.insert("city".to_string(), Value::from("Szeged"));
        map.insert("none".to_string(), Value::Null);

        let resolver = MapResolver::new(Some(&map));
        assert_eq!(resolver.resolve("city"), Some("Szeged".to_string()));
        assert_eq!(resolver.resolve("none"), Some(String::new()));
        assert_eq!(resolver.resolve("zip"), None);
    }

    #[test]
    fn test_absent_map() {
        let resolver: MapResolver<'_, String> = MapResolver::new(None);
        assert_eq!(resolver.resolve("anything"), None);
    }

    #[test]
    fn test_plain_typed_values() {
        let map: HashMap<String, u32> = [("n".to_string(), 7)].into_iter().collect();
        assert_eq!(MapResolver::new(Some(&map)).resolve("n"), Some("7".to_string()));
    }
}
