//! Column primitive type to schema kind mapping.

use std::collections::BTreeMap;

use jsonschema_serializer_core::Kind;
use thiserror::Error;
use tracing::debug;

/// Built-in primitive conversions.
pub const TYPE_CONVERSIONS: [(&str, Kind); 7] = [
    ("boolean", Kind::Boolean),
    ("datetime", Kind::String),
    ("decimal", Kind::Number),
    ("float", Kind::Number),
    ("integer", Kind::Integer),
    ("text", Kind::String),
    ("varchar", Kind::String),
];

/// A primitive type with no known schema kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported primitive type: {0}")]
pub struct UnsupportedPrimitiveType(pub String);

/// Strict lookup in [`TYPE_CONVERSIONS`].
///
/// # Errors
///
/// Returns [`UnsupportedPrimitiveType`] for an unmapped primitive.
pub fn try_schema_kind(primitive: &str) -> Result<Kind, UnsupportedPrimitiveType> {
    TYPE_CONVERSIONS
        .iter()
        .find(|(name, _)| *name == primitive)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| UnsupportedPrimitiveType(primitive.to_string()))
}

/// Lenient lookup: unmapped primitives become [`Kind::String`].
///
/// # Examples
///
/// ```
/// use jsonschema_serializer_core::Kind;
/// use jsonschema_serializer_model::schema_kind;
///
/// assert_eq!(schema_kind("decimal"), Kind::Number);
/// assert_eq!(schema_kind("uuid"), Kind::String);
/// ```
pub fn schema_kind(primitive: &str) -> Kind {
    try_schema_kind(primitive).unwrap_or_else(|err| {
        debug!(%err, "falling back to string");
        Kind::String
    })
}

/// Conversions with caller-supplied overrides layered over the built-in
/// table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMapping {
    overrides: BTreeMap<String, Kind>,
}

impl TypeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `primitive` to `kind`, ahead of the built-in table.
    ///
    /// The primitive is matched lowercased.
    pub fn with_override(mut self, primitive: impl AsRef<str>, kind: Kind) -> Self {
        self.overrides
            .insert(primitive.as_ref().to_ascii_lowercase(), kind);
        self
    }

    pub fn overrides(&self) -> &BTreeMap<String, Kind> {
        &self.overrides
    }

    pub fn kind_for(&self, primitive: &str) -> Kind {
        match self.overrides.get(primitive) {
            Some(kind) => *kind,
            None => schema_kind(primitive),
        }
    }
}

impl FromIterator<(String, Kind)> for TypeMapping {
    fn from_iter<I: IntoIterator<Item = (String, Kind)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TypeMapping::new(), |mapping, (primitive, kind)| {
                mapping.with_override(primitive, kind)
            })
    }
}
