//! Parser and validator for generated UI documents
//!
//! Raw generator text is parsed as JSON and checked against the fixed UI
//! contract before any component is built. The result is a flat arena
//! ([`ValidatedUi`]) that the tree materializer turns into components.

mod ir;
mod nesting;
mod validate;

pub use ir::{NodeId, ValidatedNode, ValidatedUi};
pub use validate::validate;

use serde::Deserialize;

use crate::error::ParseError;
use crate::tree::{DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};

/// Extra bracket levels allowed for keys outside the schema
const NESTING_SLACK: usize = 32;

/// Options controlling how strictly input is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest component nesting a document may describe, capped at
    /// [`MAX_DEPTH_CEILING`]
    pub max_depth: usize,

    /// Reject object keys the schema does not define
    pub strict: bool,

    /// Parse only the span from the first `{` to the last `}`
    pub extract_object: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            extract_object: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_extract_object(mut self, extract: bool) -> Self {
        self.extract_object = extract;
        self
    }

    /// `max_depth` after applying [`MAX_DEPTH_CEILING`]
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }

    /// JSON bracket depth allowed before parsing
    ///
    /// A component at level `d` sits at JSON depth `2d + 1` (root object,
    /// `components` array, then object/`children` pairs); its attribute
    /// objects sit two levels below that. Ignored extra keys may nest a
    /// little deeper, so the guard adds a fixed slack and leaves exact
    /// depth checks to the tree materializer.
    pub fn nesting_limit(&self) -> usize {
        2 * self.effective_max_depth() + 3 + NESTING_SLACK
    }
}

/// Parse and validate a UI document with default options
pub fn parse(source: &str) -> Result<ValidatedUi, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse and validate a UI document
pub fn parse_with_options(
    source: &str,
    options: &ParseOptions,
) -> Result<ValidatedUi, ParseError> {
    let base = if options.extract_object {
        let (start, end) = object_bounds(source)
            .ok_or_else(|| ParseError::syntax(source, 0, "no JSON object found"))?;
        tracing::debug!(start, end, "extracted JSON object from generator output");
        start..end
    } else {
        0..source.len()
    };
    let text = &source[base.clone()];

    let limit = options.nesting_limit();
    nesting::check(text, limit)
        .map_err(|offset| ParseError::nesting(source, base.start + offset, limit))?;

    let mut de = serde_json::Deserializer::from_str(text);
    // Depth is already bounded by the nesting check above.
    de.disable_recursion_limit();
    let value = serde_json::Value::deserialize(&mut de)
        .and_then(|value| de.end().map(|()| value))
        .map_err(|e| ParseError::from_json(&e, source, base.start))?;

    let validated = validate(&value, options)?;
    tracing::debug!(
        nodes = validated.len(),
        roots = validated.roots().len(),
        "validated UI document"
    );
    Ok(validated)
}

/// Byte range from the first `{` to the last `}` inclusive
fn object_bounds(source: &str) -> Option<(usize, usize)> {
    let start = source.find('{')?;
    let end = source.rfind('}')?;
    (start < end).then_some((start, end + 1))
}
