//! Pipeline configuration
//!
//! Every setting has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! max_depth = 64
//! strict = false
//! extract_object = false
//!
//! [markup]
//! indent = "  "
//! start_indent = 0
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::parser::ParseOptions;
use crate::renderer::MarkupConfig;
use crate::tree::{DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("max_depth {depth} is above the supported maximum of {max}")]
    DepthTooLarge { depth: usize, max: usize },
}

/// Configuration for the complete parse → build → render pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Deepest component nesting accepted (top level is 1); values above
    /// [`MAX_DEPTH_CEILING`] are capped when used
    pub max_depth: usize,
    /// Reject unknown object keys
    pub strict: bool,
    /// Parse only the outermost `{...}` of the input
    pub extract_object: bool,
    /// Markup output settings
    pub markup: MarkupConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            extract_object: false,
            markup: MarkupConfig::default(),
        }
    }
}

impl UiConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Set the maximum component depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable strict field checking
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable JSON object extraction from surrounding text
    pub fn with_extract_object(mut self, extract: bool) -> Self {
        self.extract_object = extract;
        self
    }

    /// Set the markup configuration
    pub fn with_markup(mut self, markup: MarkupConfig) -> Self {
        self.markup = markup;
        self
    }

    /// Reject settings the pipeline would not honour as given
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_DEPTH_CEILING {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                max: MAX_DEPTH_CEILING,
            });
        }
        Ok(())
    }

    /// Options for the validation stage
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
            strict: self.strict,
            extract_object: self.extract_object,
        }
    }
}

impl FromStr for UiConfig {
    type Err = ConfigError;

    /// Load configuration from a TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
