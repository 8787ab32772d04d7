//! Derive JSON Schema documents from tabular model metadata.
//!
//! A [`Model`] lists [`Column`]s; a [`SchemaAdapter`] maps each kept column
//! to a schema property through the type table in [`TYPE_CONVERSIONS`],
//! titles the schema with the model's human name and marks presence-validated
//! fields as `required`. [`ColumnFilter`] selects columns with `only` /
//! `except` lists, and [`AdapterConfig`] loads all of this from YAML.
//!
//! # Example
//!
//! ```
//! use jsonschema_serializer_model::{Column, ModelDefinition, from_model};
//! use serde_json::json;
//!
//! let product = ModelDefinition {
//!     human_name: Some("Product".into()),
//!     presence_required_fields: vec!["name".into()],
//!     columns: vec![Column::new("name", "varchar"), Column::new("price", "decimal")],
//! };
//!
//! let builder = from_model(&product, None, None).unwrap();
//! assert_eq!(
//!     builder.schema().to_value(),
//!     json!({
//!         "type": "object",
//!         "properties": {"name": {"type": "string"}, "price": {"type": "number"}},
//!         "title": "Product",
//!         "required": ["name"]
//!     })
//! );
//! ```

mod adapter;
mod column;
mod config;
mod error;
mod filter;
mod mapping;

pub use adapter::{ConfiguredAdapter, DefaultAdapter, SchemaAdapter, from_model};
pub use column::{Column, ColumnType, Model, ModelDefinition};
pub use config::AdapterConfig;
pub use error::{ModelError, Result};
pub use filter::{AllowedAttributes, ColumnFilter};
pub use mapping::{
    TYPE_CONVERSIONS, TypeMapping, UnsupportedPrimitiveType, schema_kind, try_schema_kind,
};
