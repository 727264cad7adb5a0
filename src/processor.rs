//! Text processor: expands templates against the built-in value sources

use std::collections::HashMap;

use crate::config::Configuration;
use crate::interpolate::Interpolator;
use crate::resolver::{
    ArgsResolver, ConfigResolver, MapResolver, Navigable, ObjectResolver, Resolver,
};
use crate::value::{ToValue, Value};
use crate::Error;

/// Configuration options for template expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Maximum nesting of conditional patterns; unlimited when `None`
    pub max_depth: Option<usize>,
}

impl ProcessorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum conditional nesting depth
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

/// Expands templates against configuration, arguments, objects and maps.
///
/// # Example
///
/// ```rust
/// use text_processor::{Configuration, TextProcessor, Value};
///
/// let mut config = Configuration::new();
/// config.set_value("greeting", "Hello");
///
/// let processor = TextProcessor::new();
/// let text = processor
///     .process_with_config_and_args("${greeting}, ${0}!", Some(&config), &[Value::from("World")])
///     .unwrap();
/// assert_eq!(text, "Hello, World!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextProcessor {
    config: ProcessorConfig,
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    fn interpolator(&self) -> Interpolator {
        match self.config.max_depth {
            Some(limit) => Interpolator::new().with_max_depth(limit),
            None => Interpolator::new(),
        }
    }

    /// Expand a possibly absent template.
    ///
    /// An absent template is rejected with [`Error::InvalidArgument`].
    pub fn process<R: Resolver + ?Sized>(
        &self,
        template: Option<&str>,
        resolver: &R,
    ) -> Result<String, Error> {
        let template = template.ok_or(Error::InvalidArgument("template must not be absent"))?;
        self.interpolator().expand(template, resolver)
    }

    /// Expand configuration keys; integer names are left for arguments
    pub fn process_with_config(
        &self,
        template: &str,
        config: Option<&Configuration>,
    ) -> Result<String, Error> {
        self.process(Some(template), &ConfigResolver::new(config))
    }

    /// Expand positional placeholders `${0}`, `${1}`, ...
    pub fn process_with_args(&self, template: &str, args: &[Value<'_>]) -> Result<String, Error> {
        self.process(Some(template), &ArgsResolver::new(args))
    }

    /// Expand arguments first, then configuration keys in the result.
    ///
    /// An argument may therefore expand to a placeholder that the
    /// configuration pass resolves.
    pub fn process_with_config_and_args(
        &self,
        template: &str,
        config: Option<&Configuration>,
        args: &[Value<'_>],
    ) -> Result<String, Error> {
        let with_args = self.process_with_args(template, args)?;
        self.process_with_config(&with_args, config)
    }

    /// Expand dotted field paths against `object`
    pub fn process_with_object(
        &self,
        template: &str,
        object: Option<&dyn Navigable>,
    ) -> Result<String, Error> {
        self.process(Some(template), &ObjectResolver::new(object))
    }

    /// Expand map keys
    pub fn process_with_map<V: ToValue>(
        &self,
        template: &str,
        map: Option<&HashMap<String, V>>,
    ) -> Result<String, Error> {
        self.process(Some(template), &MapResolver::new(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ProcessorConfig::new().with_max_depth(4);
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(TextProcessor::with_config(config.clone()).config(), &config);
    }

    #[test]
    fn test_absent_template_is_rejected() {
        let processor = TextProcessor::new();
        let resolve = |_: &str| Some("x".to_string());
        let err = processor.process(None, &resolve).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_config_and_args_run_two_passes() {
        let mut config = Configuration::new();
        config.set_value("k", "v");
        let processor = TextProcessor::new();
        let text = processor
            .process_with_config_and_args("${0}", Some(&config), &[Value::from("k")])
            .unwrap();
        // the argument pass substitutes the bare name, not a placeholder
        assert_eq!(text, "k");

        let text = processor
            .process_with_config_and_args("${${0}}", Some(&config), &[Value::from("k")])
            .unwrap();
        assert_eq!(text, "${${0}}");
    }

    #[test]
    fn test_args_leave_config_names_for_second_pass() {
        let mut config = Configuration::new();
        config.set_value("user", "ada");
        let processor = TextProcessor::new();
        let text = processor
            .process_with_config_and_args(
                "${user} has ${0} items",
                Some(&config),
                &[Value::from(3)],
            )
            .unwrap();
        assert_eq!(text, "ada has 3 items");
    }

    #[test]
    fn test_argument_expanding_to_placeholder() {
        let mut config = Configuration::new();
        config.set_value("k", "v");
        let processor = TextProcessor::new();
        let text = processor
            .process_with_config_and_args("${0}", Some(&config), &[Value::from("${k}")])
            .unwrap();
        assert_eq!(text, "v");
    }

    #[test]
    fn test_depth_limit_is_applied() {
        let processor = TextProcessor::with_config(ProcessorConfig::new().with_max_depth(0));
        let resolve = |_: &str| Some("1".to_string());
        assert!(matches!(
            processor.process(Some("${a?b}"), &resolve),
            Err(Error::DepthExceeded { limit: 0 })
        ));
        assert_eq!(processor.process(Some("${a}"), &resolve).unwrap(), "1");
    }
}
