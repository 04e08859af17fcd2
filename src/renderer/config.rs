//! Configuration for markup rendering

use serde::Deserialize;

/// Configuration options for markup output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// Whitespace emitted once per nesting level
    pub indent: String,

    /// Number of indent units applied to top-level components
    pub start_indent: usize,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            start_indent: 0,
        }
    }
}

impl MarkupConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indent unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Use `width` spaces per level
    pub fn with_indent_width(self, width: usize) -> Self {
        self.with_indent(" ".repeat(width))
    }

    /// Set the starting indent level
    pub fn with_start_indent(mut self, levels: usize) -> Self {
        self.start_indent = levels;
        self
    }
}
