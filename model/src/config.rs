//! Adapter configuration for schema generation runs.
//!
//! Defines the YAML-serializable settings that control which columns become
//! properties, how primitive types map to schema kinds, and how the result
//! is rendered.
//!
//! # Example YAML
//!
//! ```yaml
//! except:
//!   - password_digest
//! title: Product
//! description: A sellable item
//! type_overrides:
//!   uuid: string
//!   bigint: integer
//! include_defaults: true
//! pretty: false
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use jsonschema_serializer_core::Kind;
use serde::{Deserialize, Serialize};

use crate::adapter::ConfiguredAdapter;
use crate::error::Result;
use crate::filter::ColumnFilter;
use crate::mapping::TypeMapping;

fn default_pretty() -> bool {
    true
}

/// Settings for one schema generation run.
///
/// Loaded from a YAML file, typically next to the model definition.
///
/// # Examples
///
/// ```
/// use jsonschema_serializer_model::AdapterConfig;
///
/// let config: AdapterConfig = serde_yaml::from_str("except: [secret]").unwrap();
/// assert!(config.is_allowed("name"));
/// assert!(!config.is_allowed("secret"));
/// assert!(config.pretty);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Columns to keep (absent = keep all).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<String>>,
    /// Columns to drop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Vec<String>>,
    /// Extra names appended to `only`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_attributes: Vec<String>,
    /// Overrides the model's human name as schema title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primitive type to schema kind, ahead of the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_overrides: BTreeMap<String, Kind>,
    /// Emit column defaults as property `default`.
    #[serde(default)]
    pub include_defaults: bool,
    /// Pretty-print the rendered schema.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            only: None,
            except: None,
            allowed_attributes: Vec::new(),
            title: None,
            description: None,
            type_overrides: BTreeMap::new(),
            include_defaults: false,
            pretty: default_pretty(),
        }
    }
}

impl AdapterConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ModelError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::ModelError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ModelError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::ModelError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Builds the column filter, with `allowed_attributes` appended to `only`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterConflict`](crate::ModelError::FilterConflict) when an
    /// allow-list (`only` or `allowed_attributes`) meets an `except` list.
    pub fn filter(&self) -> Result<ColumnFilter> {
        let mut only = self.only.clone();
        if !self.allowed_attributes.is_empty() {
            only.get_or_insert_with(Vec::new)
                .extend(self.allowed_attributes.iter().cloned());
        }
        ColumnFilter::new(only, self.except.clone())
    }

    /// Returns `true` if a column called `name` would be kept.
    ///
    /// A conflicting configuration keeps nothing.
    pub fn is_allowed(&self, name: &str) -> bool {
        self.filter().is_ok_and(|filter| filter.keeps(name))
    }

    /// The adapter these settings describe.
    pub fn adapter(&self) -> ConfiguredAdapter {
        ConfiguredAdapter {
            title: self.title.clone(),
            description: self.description.clone(),
            types: self
                .type_overrides
                .iter()
                .map(|(primitive, kind)| (primitive.clone(), *kind))
                .collect(),
            include_defaults: self.include_defaults,
        }
    }

    pub fn type_mapping(&self) -> TypeMapping {
        self.adapter().types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn sample_yaml() -> &'static str {
        r#"
only:
  - name
  - price
allowed_attributes:
  - sku
title: Product
type_overrides:
  UUID: string
  money: number
include_defaults: true
pretty: false
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: AdapterConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.only, Some(vec!["name".to_string(), "price".to_string()]));
        assert_eq!(config.except, None);
        assert_eq!(config.allowed_attributes, vec!["sku"]);
        assert_eq!(config.title.as_deref(), Some("Product"));
        assert_eq!(config.type_overrides.get("money"), Some(&Kind::Number));
        assert!(config.include_defaults);
        assert!(!config.pretty);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: AdapterConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.filter().unwrap(), ColumnFilter::All);
    }

    #[test]
    fn test_allowed_attributes_extend_only() {
        let config: AdapterConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(
            config.filter().unwrap(),
            ColumnFilter::Only(vec!["name".into(), "price".into(), "sku".into()])
        );
        assert!(config.is_allowed("sku"));
        assert!(!config.is_allowed("secret"));
    }

    #[test]
    fn test_allowed_attributes_alone() {
        let config = AdapterConfig {
            allowed_attributes: vec!["a".into()],
            ..AdapterConfig::default()
        };
        assert_eq!(config.filter().unwrap(), ColumnFilter::Only(vec!["a".into()]));
    }

    #[test]
    fn test_conflicting_lists() {
        let config: AdapterConfig = serde_yaml::from_str("only: []\nexcept: []").unwrap();
        assert!(matches!(config.filter(), Err(ModelError::FilterConflict)));
        assert!(!config.is_allowed("anything"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: std::result::Result<AdapterConfig, _> =
            serde_yaml::from_str("type_overrides: { uuid: text }");
        assert!(result.is_err());
    }

    #[test]
    fn test_adapter_settings() {
        let config: AdapterConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        let adapter = config.adapter();
        assert_eq!(adapter.title.as_deref(), Some("Product"));
        assert!(adapter.include_defaults);
        assert_eq!(config.type_mapping().kind_for("uuid"), Kind::String);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adapter.yml");
        let config: AdapterConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        config.save(&path).unwrap();
        assert_eq!(AdapterConfig::load(&path).unwrap(), config);
    }
}
