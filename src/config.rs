//! Key/value configuration store
//!
//! Values are kept as canonical strings. They can be set programmatically
//! with [`Configuration::set_value`] or loaded from a TOML file, where nested
//! tables become dotted keys:
//!
//! ```toml
//! [processor]
//! max_depth = 16
//!
//! [values]
//! greeting = "hello"
//!
//! [values.browser]
//! size = "1024x768"     # key "browser.size"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::processor::ProcessorConfig;
use crate::value::{to_text, Separator, Value};

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Configuration values by key; a key may be set to an explicit null
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    store: BTreeMap<String, Option<String>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the key has been set, even to null
    pub fn contains_value(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// The stored value; empty when the key is unset or null
    pub fn get_value(&self, name: &str) -> ConfigValue<'_> {
        ConfigValue(self.store.get(name).and_then(|v| v.as_deref()))
    }

    /// Store a value in its canonical string form.
    ///
    /// Null is kept as an explicit null, paths are made absolute and lists
    /// are joined with `,`.
    pub fn set_value<'v>(&mut self, key: impl Into<String>, value: impl Into<Value<'v>>) {
        let stored = match value.into() {
            Value::Null => None,
            Value::Path(path) => Some(
                std::path::absolute(&*path)
                    .unwrap_or_else(|_| path.into_owned())
                    .display()
                    .to_string(),
            ),
            other => Some(to_text(&other, Separator::Comma)),
        };
        self.store.insert(key.into(), stored);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.store.remove(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Copy every entry of `other` over this configuration
    pub fn merge(&mut self, other: &Configuration) {
        for (key, value) in &other.store {
            self.store.insert(key.clone(), value.clone());
        }
    }
}

/// A configuration value with typed accessors.
///
/// Accessors return `None` when the key is unset or null, or when the text
/// does not parse as the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigValue<'a>(Option<&'a str>);

impl<'a> ConfigValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Parse the text with `FromStr`
    pub fn parse<T: FromStr>(&self) -> Option<T> {
        self.0?.parse().ok()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.parse()
    }

    pub fn to_i32(&self) -> Option<i32> {
        self.parse()
    }

    pub fn to_i16(&self) -> Option<i16> {
        self.parse()
    }

    pub fn to_i8(&self) -> Option<i8> {
        self.parse()
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.parse()
    }

    pub fn to_f32(&self) -> Option<f32> {
        self.parse()
    }

    /// True only for `true` in any letter case
    pub fn to_bool(&self) -> Option<bool> {
        self.0.map(|s| s.eq_ignore_ascii_case("true"))
    }

    /// Comma-separated items, each trimmed; blank text is an empty list
    pub fn to_list(&self) -> Option<Vec<&'a str>> {
        let text = self.0?;
        if text.trim().is_empty() {
            return Some(Vec::new());
        }
        Some(text.split(',').map(str::trim).collect())
    }

    pub fn to_path(&self) -> Option<PathBuf> {
        self.0.filter(|s| !s.is_empty()).map(PathBuf::from)
    }

    /// Pick the matching choice; an exact match beats a case-insensitive one
    pub fn to_choice<'c>(&self, choices: &[&'c str]) -> Option<&'c str> {
        pick_choice(self.0?.trim(), choices)
    }

    /// Every listed item that names a choice, in list order without repeats.
    ///
    /// Items matching no choice are skipped.
    pub fn to_choice_set<'c>(&self, choices: &[&'c str]) -> Option<Vec<&'c str>> {
        let mut set: Vec<&'c str> = Vec::new();
        for item in self.to_list()? {
            match pick_choice(item, choices) {
                Some(choice) if !set.contains(&choice) => set.push(choice),
                Some(_) => {}
                None => debug!("'{}' is not one of {:?}", item, choices),
            }
        }
        Some(set)
    }
}

fn pick_choice<'c>(name: &str, choices: &[&'c str]) -> Option<&'c str> {
    if name.is_empty() {
        return None;
    }

    let mut result = None;
    for &choice in choices {
        if choice == name {
            return Some(choice);
        }
        if choice.eq_ignore_ascii_case(name) {
            result = Some(choice);
        }
    }
    result
}

impl fmt::Display for ConfigValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.unwrap_or_default())
    }
}

/// A parsed configuration file: engine settings plus values
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub processor: ProcessorConfig,
    pub values: Configuration,
}

/// TOML structure for deserializing configuration files
#[derive(Deserialize)]
struct TomlConfigFile {
    processor: Option<TomlProcessor>,
    #[serde(default)]
    values: toml::Table,
}

#[derive(Deserialize)]
struct TomlProcessor {
    max_depth: Option<usize>,
}

impl ConfigFile {
    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_str(&content)?;
        debug!(
            "loaded {} configuration values from {}",
            file.values.len(),
            path.display()
        );
        Ok(file)
    }

    /// Load a configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfigFile = toml::from_str(content)?;

        let mut values = Configuration::new();
        flatten("", &parsed.values, &mut values)?;

        let processor = ProcessorConfig {
            max_depth: parsed.processor.and_then(|p| p.max_depth),
        };

        Ok(ConfigFile { processor, values })
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut Configuration) -> Result<(), ConfigError> {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(inner) => flatten(&key, inner, out)?,
            other => {
                let text = toml_text(&key, other)?;
                out.set_value(key, text);
            }
        }
    }
    Ok(())
}

fn toml_text(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| toml_text(key, item))
            .collect::<Result<Vec<_>, _>>()?
            .join(","),
        toml::Value::Table(_) => {
            return Err(ConfigError::invalid_value(
                key,
                "tables inside arrays are not supported",
            ))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_canonical_forms() {
        let mut config = Configuration::new();
        config.set_value("list", vec![Value::from("a"), Value::Null, Value::from(2)]);
        config.set_value("flag", true);
        config.set_value("null", Value::Null);

        assert_eq!(config.get_value("list").as_str(), Some("a,,2"));
        assert_eq!(config.get_value("flag").as_str(), Some("true"));
        assert!(config.contains_value("null"));
        assert_eq!(config.get_value("null").as_str(), None);
        assert!(!config.contains_value("other"));
    }

    #[test]
    fn test_set_value_makes_paths_absolute() {
        let mut config = Configuration::new();
        config.set_value("dir", Path::new("reports"));
        let stored = config.get_value("dir").to_path().unwrap();
        assert!(stored.is_absolute());
        assert!(stored.ends_with("reports"));
    }

    #[test]
    fn test_numeric_accessors() {
        let mut config = Configuration::new();
        config.set_value("n", "300");
        config.set_value("x", "1.5");
        config.set_value("bad", "12a");

        assert_eq!(config.get_value("n").to_i64(), Some(300));
        assert_eq!(config.get_value("n").to_i16(), Some(300));
        assert_eq!(config.get_value("n").to_i8(), None);
        assert_eq!(config.get_value("x").to_f64(), Some(1.5));
        assert_eq!(config.get_value("bad").to_i32(), None);
        assert_eq!(config.get_value("missing").to_i32(), None);
    }

    #[test]
    fn test_bool_accessor() {
        let mut config = Configuration::new();
        config.set_value("a", "TRUE");
        config.set_value("b", "yes");
        assert_eq!(config.get_value("a").to_bool(), Some(true));
        assert_eq!(config.get_value("b").to_bool(), Some(false));
        assert_eq!(config.get_value("c").to_bool(), None);
    }

    #[test]
    fn test_list_accessor() {
        let mut config = Configuration::new();
        config.set_value("l", " a, b ,c ");
        config.set_value("blank", "  ");
        assert_eq!(config.get_value("l").to_list(), Some(vec!["a", "b", "c"]));
        assert_eq!(config.get_value("blank").to_list(), Some(vec![]));
    }

    #[test]
    fn test_choice_accessor() {
        let mut config = Configuration::new();
        config.set_value("exact", "Chrome");
        config.set_value("loose", "FIREFOX");
        config.set_value("none", "safari");
        let choices = ["chrome", "Chrome", "Firefox"];
        assert_eq!(config.get_value("exact").to_choice(&choices), Some("Chrome"));
        assert_eq!(config.get_value("loose").to_choice(&choices), Some("Firefox"));
        assert_eq!(config.get_value("none").to_choice(&choices), None);
    }

    #[test]
    fn test_choice_set_accessor() {
        let mut config = Configuration::new();
        config.set_value("browsers", "firefox, Chrome,safari,FIREFOX,, chrome");
        config.set_value("blank", "");
        let choices = ["Chrome", "chrome", "Firefox"];
        assert_eq!(
            config.get_value("browsers").to_choice_set(&choices),
            Some(vec!["Firefox", "Chrome", "chrome"])
        );
        assert_eq!(config.get_value("blank").to_choice_set(&choices), Some(vec![]));
        assert_eq!(config.get_value("missing").to_choice_set(&choices), None);
    }

    #[test]
    fn test_empty_path_is_none() {
        let mut config = Configuration::new();
        config.set_value("p", "");
        assert_eq!(config.get_value("p").to_path(), None);
    }

    #[test]
    fn test_parse_toml_flattens_tables() {
        let toml_str = r#"
[processor]
max_depth = 8

[values]
greeting = "hello"
port = 8080
ratio = 0.5
debug = false
browsers = ["chrome", "firefox"]

[values.window]
size = "1024x768"
"#;
        let file = ConfigFile::from_str(toml_str).expect("Should parse");
        assert_eq!(file.processor.max_depth, Some(8));
        let values = &file.values;
        assert_eq!(values.get_value("greeting").as_str(), Some("hello"));
        assert_eq!(values.get_value("port").to_i32(), Some(8080));
        assert_eq!(values.get_value("ratio").as_str(), Some("0.5"));
        assert_eq!(values.get_value("debug").to_bool(), Some(false));
        assert_eq!(values.get_value("browsers").as_str(), Some("chrome,firefox"));
        assert_eq!(values.get_value("window.size").as_str(), Some("1024x768"));
    }

    #[test]
    fn test_parse_toml_without_sections() {
        let file = ConfigFile::from_str("").expect("Should parse");
        assert_eq!(file.processor.max_depth, None);
        assert!(file.values.is_empty());
    }

    #[test]
    fn test_tables_in_arrays_are_rejected() {
        let toml_str = r#"
[[values.servers]]
host = "a"
"#;
        let err = ConfigFile::from_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "servers"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = ConfigFile::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = Configuration::new();
        base.set_value("a", "1");
        base.set_value("b", "2");
        let mut extra = Configuration::new();
        extra.set_value("b", "3");
        base.merge(&extra);
        assert_eq!(base.get_value("a").as_str(), Some("1"));
        assert_eq!(base.get_value("b").as_str(), Some("3"));
        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
