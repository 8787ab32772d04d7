//! Model-to-schema translation.
//!
//! [`SchemaAdapter::from_model`] turns a [`Model`] into a [`Builder`] whose
//! root schema has one property per kept column, the model's human name as
//! title and its presence-validated fields as `required`. Each step is a
//! hook an adapter can override.

use jsonschema_serializer_core::{Builder, Kind, NamedProperty, Options};
use tracing::debug;

use crate::column::{Column, Model};
use crate::error::Result;
use crate::filter::ColumnFilter;
use crate::mapping::{TypeMapping, schema_kind};

/// Translates models into schemas.
///
/// Every hook has a default; implementors override only what differs.
pub trait SchemaAdapter {
    /// Root title; `None` leaves the schema untitled.
    fn schema_title<M: Model + ?Sized>(&self, model: &M) -> Option<String> {
        model
            .human_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// Root description; none by default.
    fn schema_description<M: Model + ?Sized>(&self, _model: &M) -> Option<String> {
        None
    }

    /// The `required` list, after filtering.
    fn required_fields<M: Model + ?Sized>(&self, model: &M, filter: &ColumnFilter) -> Vec<String> {
        filter.filter_required(model.presence_required_fields())
    }

    fn column_kind(&self, column: &Column) -> Kind {
        schema_kind(&column.primitive())
    }

    /// Builds the property for one kept column.
    ///
    /// # Errors
    ///
    /// Fails only when [`column_kind`](Self::column_kind) yields
    /// [`Kind::Array`], which needs `items`.
    fn format_column(&self, builder: &Builder, column: &Column) -> Result<NamedProperty> {
        let kind = self.column_kind(column);
        debug!(column = %column.name, %kind, "formatting column");
        Ok(builder.named_fragment(kind, &column.name, Options::new())?)
    }

    /// Runs the whole translation.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`format_column`](Self::format_column).
    fn from_model<M: Model + ?Sized>(&self, model: &M, filter: &ColumnFilter) -> Result<Builder> {
        let mut builder = Builder::new();

        if let Some(title) = self.schema_title(model) {
            builder.title(title);
        }
        if let Some(description) = self.schema_description(model) {
            builder.description(description);
        }

        let required = self.required_fields(model, filter);
        if !required.is_empty() {
            builder.required(required);
        }

        for column in filter.select(model.columns()) {
            let named = self.format_column(&builder, column)?;
            builder.property(named);
        }
        Ok(builder)
    }
}

/// Title from the human name, lenient type mapping, no defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdapter;

impl SchemaAdapter for DefaultAdapter {}

/// An adapter tuned by [`AdapterConfig`](crate::AdapterConfig) settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfiguredAdapter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub types: TypeMapping,
    /// Emit column defaults as the property `default`.
    pub include_defaults: bool,
}

impl SchemaAdapter for ConfiguredAdapter {
    fn schema_title<M: Model + ?Sized>(&self, model: &M) -> Option<String> {
        self.title.clone().or_else(|| DefaultAdapter.schema_title(model))
    }

    fn schema_description<M: Model + ?Sized>(&self, _model: &M) -> Option<String> {
        self.description.clone()
    }

    fn column_kind(&self, column: &Column) -> Kind {
        self.types.kind_for(&column.primitive())
    }

    fn format_column(&self, builder: &Builder, column: &Column) -> Result<NamedProperty> {
        let mut opts = Options::new();
        if self.include_defaults {
            if let Some(default) = &column.default {
                opts.set("default", default.clone());
            }
        }
        Ok(builder.named_fragment(self.column_kind(column), &column.name, opts)?)
    }
}

/// Translates `model` with the [`DefaultAdapter`].
///
/// # Errors
///
/// Returns [`ModelError::FilterConflict`](crate::ModelError::FilterConflict)
/// when both `only` and `except` are supplied, before any column is read.
///
/// # Examples
///
/// ```
/// use jsonschema_serializer_model::{Column, from_model};
/// use serde_json::json;
///
/// let columns = vec![Column::new("x", "decimal"), Column::new("t", "text")];
/// let builder = from_model(&columns, None, Some(vec!["x".into()])).unwrap();
/// assert_eq!(
///     builder.schema().to_value(),
///     json!({"type": "object", "properties": {"t": {"type": "string"}}})
/// );
/// ```
pub fn from_model<M: Model + ?Sized>(
    model: &M,
    only: Option<Vec<String>>,
    except: Option<Vec<String>>,
) -> Result<Builder> {
    let filter = ColumnFilter::new(only, except)?;
    DefaultAdapter.from_model(model, &filter)
}
