//! Text Processor - `${...}` placeholder expansion for text templates
//!
//! Templates are free text with placeholders. A placeholder names a value
//! that a [`Resolver`] supplies: a configuration key, a positional argument,
//! a field path on an object, or a map key. Conditional placeholders include
//! a sub-template depending on whether the value is empty.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use text_processor::TextProcessor;
//!
//! let mut vars = HashMap::new();
//! vars.insert("name".to_string(), "Ada");
//! vars.insert("title".to_string(), "");
//!
//! let text = TextProcessor::new()
//!     .process_with_map("Dear ${title?${title} }${name}, cost: 5$", Some(&vars))
//!     .unwrap();
//! assert_eq!(text, "Dear Ada, cost: 5$");
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod interpolate;
mod macros;
pub mod processor;
pub mod resolver;
pub mod value;

pub use check::{check, check_with_config_and_args};
pub use config::{ConfigError, ConfigFile, ConfigValue, Configuration};
pub use error::{Diagnostic, Severity};
pub use interpolate::{interpolate, try_interpolate, Interpolator};
pub use processor::{ProcessorConfig, TextProcessor};
pub use resolver::{
    ArgsResolver, ConfigResolver, MapResolver, Navigable, ObjectResolver, Resolver,
};
pub use value::{to_text, Separator, ToValue, Value};

use thiserror::Error;

/// Errors that can occur while processing a template
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was absent
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Conditional patterns nested deeper than allowed
    #[error("conditional patterns nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    /// Error loading configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
