//! Column descriptors and the [`Model`] abstraction.
//!
//! A model is anything that can list its columns; it may also expose a
//! human-readable name and the fields a presence rule makes mandatory.
//! [`ModelDefinition`] is the serde-loadable form used by tooling.
//!
//! # Example YAML
//!
//! ```yaml
//! human_name: Product
//! presence_required_fields: [name]
//! columns:
//!   - { name: name, type: varchar }
//!   - { name: price, type: { type: decimal } }
//!   - { name: in_stock, type: boolean, default: true }
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// The storage type of a column.
///
/// Either a bare symbol (`"decimal"`) or nested type metadata
/// (`{ "type": "decimal" }`), as different storage layers report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnType {
    Symbol(String),
    Metadata {
        #[serde(rename = "type")]
        sql_type: String,
    },
}

impl ColumnType {
    /// Returns the primitive type symbol, lowercased and trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonschema_serializer_model::ColumnType;
    ///
    /// assert_eq!(ColumnType::Symbol("TEXT".into()).primitive(), "text");
    /// assert_eq!(ColumnType::Metadata { sql_type: "decimal".into() }.primitive(), "decimal");
    /// ```
    pub fn primitive(&self) -> String {
        let raw = match self {
            ColumnType::Symbol(symbol) => symbol,
            ColumnType::Metadata { sql_type } => sql_type,
        };
        raw.trim().to_ascii_lowercase()
    }
}

impl From<&str> for ColumnType {
    fn from(symbol: &str) -> Self {
        ColumnType::Symbol(symbol.to_string())
    }
}

/// One column of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Shorthand for `self.column_type.primitive()`.
    pub fn primitive(&self) -> String {
        self.column_type.primitive()
    }
}

/// A source of column metadata.
pub trait Model {
    /// Columns in declaration order.
    fn columns(&self) -> &[Column];

    /// Human-readable model name, used as the schema title.
    fn human_name(&self) -> Option<&str> {
        None
    }

    /// Field names guarded by a presence rule, in rule order.
    ///
    /// May repeat a name when several rules cover it.
    fn presence_required_fields(&self) -> &[String] {
        &[]
    }
}

impl Model for [Column] {
    fn columns(&self) -> &[Column] {
        self
    }
}

impl Model for Vec<Column> {
    fn columns(&self) -> &[Column] {
        self
    }
}

/// A model described in a YAML or JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_name: Option<String>,
    #[serde(default)]
    pub presence_required_fields: Vec<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl ModelDefinition {
    /// Loads a definition, choosing the format by extension.
    ///
    /// `.json` files are read as JSON; anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ModelError::IoError) if the file cannot be
    /// read, or [`JsonError`](crate::ModelError::JsonError) /
    /// [`YamlError`](crate::ModelError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let definition = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(definition)
    }

    /// Saves the definition as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ModelError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::ModelError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(std::fs::File::create(path)?);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

impl Model for ModelDefinition {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn human_name(&self) -> Option<&str> {
        self.human_name.as_deref()
    }

    fn presence_required_fields(&self) -> &[String] {
        &self.presence_required_fields
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_column_type_forms() {
        let symbol: Column = serde_json::from_value(json!({"name": "a", "type": "decimal"})).unwrap();
        let nested: Column =
            serde_json::from_value(json!({"name": "a", "type": {"type": "decimal"}})).unwrap();
        assert_eq!(symbol.primitive(), "decimal");
        assert_eq!(nested.primitive(), "decimal");
        assert_ne!(symbol, nested);
    }

    #[test]
    fn test_column_default_is_optional() {
        let column: Column =
            serde_json::from_value(json!({"name": "flag", "type": "boolean", "default": true}))
                .unwrap();
        assert_eq!(column.default, Some(json!(true)));

        let value = serde_json::to_value(Column::new("flag", "boolean")).unwrap();
        assert_eq!(value, json!({"name": "flag", "type": "boolean"}));
    }

    #[test]
    fn test_slice_model_has_no_enrichment() {
        let columns = vec![Column::new("a", "text")];
        assert_eq!(columns.columns().len(), 1);
        assert_eq!(columns.human_name(), None);
        assert!(columns.presence_required_fields().is_empty());
        assert_eq!(columns[..].columns()[0].name, "a");
    }

    #[test]
    fn test_definition_from_yaml() {
        let yaml = r#"
human_name: Product
presence_required_fields: [name]
columns:
  - { name: name, type: varchar }
  - { name: price, type: { type: DECIMAL } }
"#;
        let definition: ModelDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definition.human_name(), Some("Product"));
        assert_eq!(definition.presence_required_fields(), ["name".to_string()]);
        assert_eq!(definition.columns()[1].primitive(), "decimal");
    }

    #[test]
    fn test_definition_minimal() {
        let definition: ModelDefinition = serde_yaml::from_str("{}").unwrap();
        assert_eq!(definition, ModelDefinition::default());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("product.json");
        std::fs::write(
            &json_path,
            r#"{"columns": [{"name": "price", "type": "decimal"}]}"#,
        )
        .unwrap();
        let definition = ModelDefinition::load(&json_path).unwrap();
        assert_eq!(definition.columns().len(), 1);

        let yaml_path = dir.path().join("product.yml");
        definition.save(&yaml_path).unwrap();
        assert_eq!(ModelDefinition::load(&yaml_path).unwrap(), definition);
    }
}
