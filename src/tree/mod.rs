//! Tree materializer
//!
//! Builds owned [`Component`](crate::schema::Component) trees from a
//! validated arena, refusing trees deeper than a configured limit.

mod error;
mod materialize;

pub use error::TreeError;
pub use materialize::{materialize, materialize_with_depth};

/// Maximum component nesting accepted unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest depth limit honoured; higher settings are capped to this
///
/// Parsing and tree building both recurse once per level, so this bounds
/// stack use no matter what a caller configures.
pub const MAX_DEPTH_CEILING: usize = 128;
