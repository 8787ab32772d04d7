//! Reusable fragment specializations.
//!
//! A [`Preset`] fixes a fragment kind together with a title, description
//! and/or default value. Every fragment built through the preset carries
//! those attributes, merged after the type's default shape and before the
//! caller's options, so per-call options always win.
//!
//! Presets can extend other presets, which gives a small inheritance chain of
//! reusable schema components:
//!
//! ```
//! use std::sync::LazyLock;
//!
//! use jsonschema_serializer_core::{Kind, Options, Preset};
//! use serde_json::json;
//!
//! static FLAG: LazyLock<Preset> = LazyLock::new(|| {
//!     Preset::new(Kind::Boolean)
//!         .with_description("a feature flag")
//!         .with_default(false)
//! });
//! static BETA_FLAG: LazyLock<Preset> =
//!     LazyLock::new(|| Preset::extend(&FLAG).with_title("Beta"));
//!
//! let fragment = BETA_FLAG.anonymous(Options::new().default_value(true)).unwrap();
//! assert_eq!(
//!     fragment.to_value(),
//!     json!({"type": "boolean", "title": "Beta", "description": "a feature flag", "default": true})
//! );
//! ```

use serde_json::Value;

use crate::error::Result;
use crate::types::{Fragment, Kind, NamedProperty, Options};

/// Fixed attributes shared by every fragment built through it.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    kind: Kind,
    title: Option<Value>,
    description: Option<Value>,
    default: Option<Value>,
}

impl Preset {
    /// Creates an unspecialized preset for `kind`.
    ///
    /// Building through it yields the bare default shape merged with the
    /// caller's options.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            default: None,
        }
    }

    /// Creates a preset inheriting `parent`'s kind and attributes.
    ///
    /// Attributes set on the child afterwards replace the inherited ones.
    pub fn extend(parent: &Preset) -> Self {
        parent.clone()
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn title(&self) -> Option<&Value> {
        self.title.as_ref()
    }

    pub fn description(&self) -> Option<&Value> {
        self.description.as_ref()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Fixes the `title` attribute, replacing any previous title.
    pub fn set_title(&mut self, title: impl Into<Value>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Fixes the `description` attribute, replacing any previous description.
    pub fn set_description(&mut self, description: impl Into<Value>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Fixes the `default` attribute, replacing any previous default.
    pub fn set_default(&mut self, default: impl Into<Value>) -> &mut Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<Value>) -> Self {
        self.set_title(title);
        self
    }

    pub fn with_description(mut self, description: impl Into<Value>) -> Self {
        self.set_description(description);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.set_default(default);
        self
    }

    /// Returns `true` when at least one attribute is fixed.
    pub fn is_specialized(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.default.is_some()
    }

    /// Returns the attributes actually set, in title, description, default
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonschema_serializer_core::{Kind, Preset};
    /// use serde_json::json;
    ///
    /// let preset = Preset::new(Kind::String).with_default("n/a").with_title("Code");
    /// let attributes = preset.resolve_attributes();
    /// assert_eq!(attributes, vec![("title", &json!("Code")), ("default", &json!("n/a"))]);
    ///
    /// assert!(Preset::new(Kind::String).resolve_attributes().is_empty());
    /// ```
    pub fn resolve_attributes(&self) -> Vec<(&'static str, &Value)> {
        [
            ("title", self.title.as_ref()),
            ("description", self.description.as_ref()),
            ("default", self.default.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }

    /// Builds an unnamed fragment through this preset.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingItems`](crate::SchemaError::MissingItems)
    /// for an array preset when `opts` carries no `items`.
    pub fn anonymous(&self, opts: Options) -> Result<Fragment> {
        Fragment::compose(self.kind, &self.resolve_attributes(), opts)
    }

    /// Builds a [`NamedProperty`] through this preset.
    ///
    /// # Errors
    ///
    /// Same as [`Preset::anonymous`].
    pub fn named(&self, name: impl Into<String>, opts: Options) -> Result<NamedProperty> {
        Ok(NamedProperty::new(name, self.anonymous(opts)?))
    }
}

impl From<Kind> for Preset {
    fn from(kind: Kind) -> Self {
        Preset::new(kind)
    }
}
