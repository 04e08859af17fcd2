//! Fixed schema for generated user interfaces
//!
//! The closed component enumeration, the component tree types, and the
//! JSON Schema document handed to the generator.

mod json_schema;
pub mod types;

pub use json_schema::ui_schema;
pub use types::{
    Attribute, Component, ComponentType, InvalidAttributeName, Ui, UnknownComponentType,
};
