//! Markup renderer for component trees
//!
//! This module takes a [`Ui`](crate::schema::Ui) and produces indented,
//! escaped HTML-like markup.

pub mod config;
pub mod markup;

pub use config::MarkupConfig;
pub use markup::{escape_markup, render_component, render_markup, MarkupBuilder};
