//! Composition engine for JSON Schema documents.
//!
//! This crate builds schema documents; it never validates instance data.
//!
//! - [`Fragment`]: one schema node, a [`Kind`]-fixing [`Shape`] plus ordered
//!   pass-through keywords.
//! - [`NamedProperty`]: a `(name, fragment)` pair, merged by the caller into
//!   a parent's [`Properties`].
//! - [`Preset`]: a reusable specialization fixing title, description and/or
//!   default for every fragment built through it.
//! - [`Builder`]: the fluent façade that owns a root object schema.
//!
//! Merging ([`Properties::merge_with`]) resolves duplicate declarations with a
//! [`MergeStrategy`]; [`lint_schema`] reports structural inconsistencies in a
//! finished document.
//!
//! # Example
//!
//! ```
//! use jsonschema_serializer_core::*;
//! use serde_json::json;
//!
//! let builder = Builder::build(|b| {
//!     b.title("Newsletter").required(["subscribers"]);
//!
//!     let subscriber = b.object_schema(Options::new().with("required", json!(["age"])), |p| {
//!         p.merge(b.string("first_name", Options::new()))
//!             .merge(b.string("last_name", Options::new()))
//!             .merge(b.integer("age", Options::new()));
//!     });
//!     b.property(b.array("subscribers", subscriber, Options::new().with("minItems", 1)));
//! });
//!
//! let text = builder.render(false).unwrap();
//! let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
//! assert_eq!(parsed["properties"]["subscribers"]["minItems"], json!(1));
//! assert_eq!(parsed["properties"]["subscribers"]["items"]["required"], json!(["age"]));
//! assert!(lint_schema(builder.schema()).is_empty());
//! ```

mod builder;
mod error;
mod merge;
mod preset;
mod types;
mod validate;

pub use builder::Builder;
pub use error::{Result, SchemaError};
pub use merge::MergeStrategy;
pub use preset::Preset;
pub use types::*;
pub use validate::{LintWarning, lint_schema};
