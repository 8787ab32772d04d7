//! Fluent construction of a root schema document.
//!
//! [`Builder`] owns one root `object` fragment. Root-level attributes
//! (`title`, `description`, `required`) are set directly on the builder;
//! properties are produced by the per-type constructors and merged into
//! [`Builder::properties`] by the caller.
//!
//! # Example
//!
//! ```
//! use jsonschema_serializer_core::{Builder, Options};
//! use serde_json::json;
//!
//! let builder = Builder::build(|b| {
//!     b.title("a title").required(["a"]);
//!     let a = b.string("a", Options::new().with("minLength", 2));
//!     let c = b.array("c", b.integer_schema(Options::new()), Options::new().with("minItems", 1));
//!     b.property(a).property(c);
//! });
//!
//! assert_eq!(
//!     builder.schema().to_value(),
//!     json!({
//!         "type": "object",
//!         "properties": {
//!             "a": {"type": "string", "minLength": 2},
//!             "c": {"type": "array", "items": {"type": "integer"}, "minItems": 1}
//!         },
//!         "title": "a title",
//!         "required": ["a"]
//!     })
//! );
//! ```

use serde_json::Value;

use crate::error::Result;
use crate::types::{Fragment, Kind, NamedProperty, Options, Properties, Shape};

/// Assembles one root schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct Builder {
    schema: Fragment,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder around a fresh `{type: object, properties: {}}` root.
    pub fn new() -> Self {
        Self {
            schema: Fragment::object(),
        }
    }

    /// Creates a builder and runs `setup` on it once.
    pub fn build(setup: impl FnOnce(&mut Builder)) -> Self {
        let mut builder = Self::new();
        setup(&mut builder);
        builder
    }

    /// Returns the root fragment as assembled so far.
    pub fn schema(&self) -> &Fragment {
        &self.schema
    }

    /// Consumes the builder, returning the root fragment.
    pub fn into_schema(self) -> Fragment {
        self.schema
    }

    /// Sets (or replaces) the root `title`.
    pub fn title(&mut self, title: impl Into<Value>) -> &mut Self {
        self.schema.set("title", title);
        self
    }

    /// Sets (or replaces) the root `description`.
    pub fn description(&mut self, description: impl Into<Value>) -> &mut Self {
        self.schema.set("description", description);
        self
    }

    /// Replaces the root `required` list wholesale.
    ///
    /// Order and duplicates are kept as given. An empty input produces an
    /// empty list; to omit `required` entirely, don't call this.
    pub fn required<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Value> = names.into_iter().map(|n| Value::String(n.into())).collect();
        self.schema.set("required", Value::Array(names));
        self
    }

    /// Returns the root `properties` mapping.
    pub fn properties(&mut self) -> &mut Properties {
        match &mut self.schema.shape {
            Shape::Object(properties) => properties,
            _ => unreachable!("builder root is always an object fragment"),
        }
    }

    /// Merges a named property into the root, replacing any previous
    /// declaration with the same name.
    pub fn property(&mut self, named: NamedProperty) -> &mut Self {
        self.properties().merge(named);
        self
    }

    /// A `boolean` property. Useful options: `default`, `title`, `description`.
    pub fn boolean(&self, name: impl Into<String>, opts: Options) -> NamedProperty {
        NamedProperty::new(name, self.boolean_schema(opts))
    }

    /// An `integer` property. Useful options: `enum`, `minimum`, `maximum`,
    /// `multipleOf`.
    pub fn integer(&self, name: impl Into<String>, opts: Options) -> NamedProperty {
        NamedProperty::new(name, self.integer_schema(opts))
    }

    /// A `number` property. Useful options: `enum`, `minimum`, `maximum`,
    /// `multipleOf`.
    pub fn number(&self, name: impl Into<String>, opts: Options) -> NamedProperty {
        NamedProperty::new(name, self.number_schema(opts))
    }

    /// A `string` property. Useful options: `format`, `minLength`, `enum`.
    pub fn string(&self, name: impl Into<String>, opts: Options) -> NamedProperty {
        NamedProperty::new(name, self.string_schema(opts))
    }

    /// An `object` property whose nested properties are declared by `setup`.
    pub fn object(
        &self,
        name: impl Into<String>,
        opts: Options,
        setup: impl FnOnce(&mut Properties),
    ) -> NamedProperty {
        NamedProperty::new(name, self.object_schema(opts, setup))
    }

    /// An `array` property of `items`. Useful options: `minItems`,
    /// `maxItems`, `default`.
    pub fn array(&self, name: impl Into<String>, items: Fragment, opts: Options) -> NamedProperty {
        NamedProperty::new(name, self.array_schema(items, opts))
    }

    pub fn boolean_schema(&self, opts: Options) -> Fragment {
        Fragment::decorated(Shape::Boolean, &[], opts)
    }

    pub fn integer_schema(&self, opts: Options) -> Fragment {
        Fragment::decorated(Shape::Integer, &[], opts)
    }

    pub fn number_schema(&self, opts: Options) -> Fragment {
        Fragment::decorated(Shape::Number, &[], opts)
    }

    pub fn string_schema(&self, opts: Options) -> Fragment {
        Fragment::decorated(Shape::String, &[], opts)
    }

    /// An unnamed `object` fragment; `setup` receives its `properties`
    /// mapping for inline declarations, to any nesting depth.
    ///
    /// ```
    /// use jsonschema_serializer_core::{Builder, Options};
    ///
    /// let b = Builder::new();
    /// let subscriber = b.object_schema(Options::new().title("subscriber"), |p| {
    ///     p.merge(b.string("first_name", Options::new()))
    ///         .merge(b.integer("age", Options::new()));
    /// });
    /// assert_eq!(subscriber.properties().unwrap().len(), 2);
    /// ```
    pub fn object_schema(&self, opts: Options, setup: impl FnOnce(&mut Properties)) -> Fragment {
        let mut fragment = Fragment::decorated(Shape::Object(Properties::new()), &[], opts);
        if let Shape::Object(properties) = &mut fragment.shape {
            setup(properties);
        }
        fragment
    }

    /// An unnamed `array` fragment of `items`.
    pub fn array_schema(&self, items: Fragment, opts: Options) -> Fragment {
        Fragment::decorated(Shape::Array(Box::new(items)), &[], opts)
    }

    /// A property whose kind is only known at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingItems`](crate::SchemaError::MissingItems)
    /// for [`Kind::Array`] without `items` in `opts`.
    pub fn named_fragment(
        &self,
        kind: Kind,
        name: impl Into<String>,
        opts: Options,
    ) -> Result<NamedProperty> {
        Fragment::named(kind, name, opts)
    }

    /// An unnamed fragment whose kind is only known at runtime.
    ///
    /// # Errors
    ///
    /// Same as [`Builder::named_fragment`].
    pub fn anonymous_fragment(&self, kind: Kind, opts: Options) -> Result<Fragment> {
        Fragment::anonymous(kind, opts)
    }

    /// Renders the root schema, pretty-printed or compact.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`](crate::SchemaError::Json) if
    /// serialization fails.
    pub fn render(&self, pretty: bool) -> Result<String> {
        self.schema.render(pretty)
    }

    /// Renders the root schema pretty-printed.
    ///
    /// # Errors
    ///
    /// Same as [`Builder::render`].
    pub fn to_json(&self) -> Result<String> {
        self.render(true)
    }
}
