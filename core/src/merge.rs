//! Property merging with configurable conflict resolution.
//!
//! Named constructors never touch a parent object; the caller merges the
//! returned [`NamedProperty`] into a [`Properties`] mapping. [`MergeStrategy`]
//! decides what happens when the name is already declared.
//!
//! # Example
//!
//! ```
//! use jsonschema_serializer_core::*;
//!
//! let b = Builder::new();
//! let mut properties = Properties::new();
//! properties
//!     .merge(b.string("name", Options::new()))
//!     .merge(b.integer("age", Options::new()));
//!
//! let err = properties
//!     .merge_with(b.boolean("age", Options::new()), MergeStrategy::Strict)
//!     .unwrap_err();
//! assert!(matches!(err, SchemaError::DuplicateProperty(ref name) if name == "age"));
//! ```

use crate::error::{Result, SchemaError};
use crate::types::{NamedProperty, Properties};

/// Property merge behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// The incoming declaration replaces the existing one, keeping its
    /// position (plain hash-merge semantics).
    #[default]
    Override,
    /// The first declaration wins; later ones are ignored.
    KeepExisting,
    /// A second declaration of the same name is an error.
    Strict,
}

impl Properties {
    /// Merges a named property, replacing any existing declaration.
    pub fn merge(&mut self, named: NamedProperty) -> &mut Self {
        let (name, fragment) = named.into_parts();
        self.insert(name, fragment);
        self
    }

    /// Merges a named property using `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateProperty`] under
    /// [`MergeStrategy::Strict`] when the name is already declared; the
    /// mapping is left unchanged.
    pub fn merge_with(&mut self, named: NamedProperty, strategy: MergeStrategy) -> Result<&mut Self> {
        if self.contains(&named.name) {
            match strategy {
                MergeStrategy::Override => {}
                MergeStrategy::KeepExisting => return Ok(self),
                MergeStrategy::Strict => return Err(SchemaError::DuplicateProperty(named.name)),
            }
        }
        Ok(self.merge(named))
    }

    /// Merges every entry of `other`, in its declaration order.
    ///
    /// # Errors
    ///
    /// Under [`MergeStrategy::Strict`], fails on the first duplicated name.
    /// Entries merged before the duplicate stay merged.
    pub fn extend_from(&mut self, other: Properties, strategy: MergeStrategy) -> Result<&mut Self> {
        for (name, fragment) in other {
            self.merge_with(NamedProperty::new(name, fragment), strategy)?;
        }
        Ok(self)
    }
}
