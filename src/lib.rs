//! Intent UI - validate and render generated user interfaces
//!
//! A constrained generator (usually a language model) describes a UI as a
//! JSON component tree. This library treats that text as untrusted: it is
//! parsed, checked against a fixed schema, built into an owned tree under a
//! depth limit, and rendered to indented, escaped markup.
//!
//! # Example
//!
//! ```rust
//! use intent_ui::render;
//!
//! let markup = render(r#"{"components": [{"type": "button", "label": "OK"}]}"#).unwrap();
//! assert_eq!(markup, "<button>\n  OK\n</button>\n");
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod renderer;
pub mod schema;
pub mod tree;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use config::{ConfigError, UiConfig};
pub use error::ParseError;
pub use generator::{generate_markup, generate_ui, GenerationRequest, Generator, GeneratorError};
pub use parser::{parse, parse_with_options, ParseOptions, ValidatedUi};
pub use renderer::{render_markup, MarkupConfig};
pub use schema::{ui_schema, Attribute, Component, ComponentType, InvalidAttributeName, Ui};
pub use tree::{
    materialize, materialize_with_depth, TreeError, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING,
};

/// Broad category of a pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Text is not parseable JSON
    SyntaxError,
    /// JSON does not match the UI schema
    SchemaViolation,
    /// Nesting exceeds the configured maximum depth
    DepthExceeded,
    /// The generator failed or returned nothing
    ExternalFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::SchemaViolation => "SchemaViolation",
            ErrorKind::DepthExceeded => "DepthExceeded",
            ErrorKind::ExternalFailure => "ExternalFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur anywhere in the pipeline
#[derive(Debug, Error)]
pub enum UiError {
    /// Error while parsing or validating
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Error while building the tree
    #[error("{0}")]
    Tree(#[from] TreeError),

    /// Error from the generator collaborator
    #[error("external failure: {0}")]
    External(#[from] GeneratorError),
}

impl UiError {
    /// The failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            UiError::Parse(ParseError::Syntax { .. }) => ErrorKind::SyntaxError,
            UiError::Parse(ParseError::Schema { .. }) => ErrorKind::SchemaViolation,
            UiError::Parse(ParseError::Nesting { .. }) | UiError::Tree(_) => {
                ErrorKind::DepthExceeded
            }
            UiError::External(_) => ErrorKind::ExternalFailure,
        }
    }

    /// Human-readable diagnostic with source context
    pub fn report(&self, source: &str, filename: &str) -> String {
        match self {
            UiError::Parse(e) => e.format(source, filename),
            UiError::Tree(e) => e.format(source, filename),
            UiError::External(e) => format!("Error: {}\n", e),
        }
    }
}

/// Parse, validate and build a UI tree with default configuration
pub fn parse_ui(source: &str) -> Result<Ui, UiError> {
    parse_ui_with_config(source, &UiConfig::default())
}

/// Parse, validate and build a UI tree
///
/// Either the whole tree is returned or an error; nothing partial.
pub fn parse_ui_with_config(source: &str, config: &UiConfig) -> Result<Ui, UiError> {
    let built = parse_with_options(source, &config.parse_options())
        .map_err(UiError::from)
        .and_then(|validated| {
            materialize_with_depth(validated, config.max_depth).map_err(UiError::from)
        });

    built.map_err(|e| {
        tracing::warn!(kind = %e.kind(), error = %e, "rejected UI document");
        e
    })
}

/// Render a UI document to markup with default configuration
///
/// This is the main entry point for the library.
pub fn render(source: &str) -> Result<String, UiError> {
    render_with_config(source, &UiConfig::default())
}

/// Render a UI document to markup with custom configuration
///
/// # Example
///
/// ```rust
/// use intent_ui::{render_with_config, MarkupConfig, UiConfig};
///
/// let config = UiConfig::new().with_markup(MarkupConfig::new().with_indent_width(4));
/// let markup = render_with_config(
///     r#"{"components": [{"type": "div", "label": "", "children": [{"type": "button", "label": "OK"}]}]}"#,
///     &config,
/// )
/// .unwrap();
/// assert_eq!(markup, "<div>\n    <button>\n        OK\n    </button>\n</div>\n");
/// ```
pub fn render_with_config(source: &str, config: &UiConfig) -> Result<String, UiError> {
    let ui = parse_ui_with_config(source, config)?;
    Ok(render_markup(&ui, &config.markup))
}

impl FromStr for Ui {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_ui(s)
    }
}
