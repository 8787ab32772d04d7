//! Schema fragment definitions.
//!
//! A [`Fragment`] is one JSON Schema node: a [`Shape`] (which fixes the
//! `type` keyword and, for objects and arrays, the structural children) plus
//! an ordered map of pass-through keywords such as `minimum`, `enum` or
//! `title`. Keywords are emitted in the order they were merged.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};

/// The six JSON Schema types a fragment can carry.
///
/// # Examples
///
/// ```
/// use jsonschema_serializer_core::Kind;
///
/// assert_eq!(Kind::Number.as_str(), "number");
/// assert_eq!("array".parse::<Kind>().unwrap(), Kind::Array);
/// assert!("null".parse::<Kind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// `true` / `false`.
    Boolean,
    /// Whole numbers.
    Integer,
    /// Any JSON number.
    Number,
    /// Text.
    String,
    /// A mapping with named `properties`.
    Object,
    /// A homogeneous sequence described by `items`.
    Array,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 6] = [
        Kind::Boolean,
        Kind::Integer,
        Kind::Number,
        Kind::String,
        Kind::Object,
        Kind::Array,
    ];

    /// Returns the JSON Schema type tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }

    /// Returns the fixed default mapping for this kind.
    ///
    /// Scalars map to `{type}`, objects to `{type, properties: {}}` and arrays
    /// to `{type}`; array `items` are always supplied separately.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonschema_serializer_core::Kind;
    /// use serde_json::json;
    ///
    /// let shape = serde_json::Value::Object(Kind::Object.default_shape());
    /// assert_eq!(shape, json!({"type": "object", "properties": {}}));
    /// ```
    pub fn default_shape(self) -> Map<String, Value> {
        let mut shape = Map::new();
        shape.insert("type".to_string(), Value::from(self.as_str()));
        if self == Kind::Object {
            shape.insert("properties".to_string(), Value::Object(Map::new()));
        }
        shape
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownKind(s.to_string()))
    }
}

/// Structural part of a fragment.
///
/// The variant fixes the fragment's [`Kind`]; objects always own a
/// [`Properties`] mapping and arrays always own their `items` fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Boolean,
    Integer,
    Number,
    String,
    Object(Properties),
    Array(Box<Fragment>),
}

impl Shape {
    /// Returns the kind this shape serializes as.
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Boolean => Kind::Boolean,
            Shape::Integer => Kind::Integer,
            Shape::Number => Kind::Number,
            Shape::String => Kind::String,
            Shape::Object(_) => Kind::Object,
            Shape::Array(_) => Kind::Array,
        }
    }

    /// Returns the default shape for `kind`, or `None` for arrays, which
    /// cannot exist without `items`.
    pub fn empty(kind: Kind) -> Option<Self> {
        match kind {
            Kind::Boolean => Some(Shape::Boolean),
            Kind::Integer => Some(Shape::Integer),
            Kind::Number => Some(Shape::Number),
            Kind::String => Some(Shape::String),
            Kind::Object => Some(Shape::Object(Properties::new())),
            Kind::Array => None,
        }
    }
}

/// Caller-supplied options for a fragment constructor.
///
/// Options are an ordered set of pass-through keywords plus the `items`
/// fragment used by arrays. They are merged last, so they win over the type
/// defaults and over [`Preset`](crate::Preset) attributes.
///
/// # Examples
///
/// ```
/// use jsonschema_serializer_core::Options;
///
/// let opts = Options::new()
///     .with("minLength", 2)
///     .title("Name");
/// assert_eq!(opts.get("minLength"), Some(&serde_json::json!(2)));
/// assert_eq!(opts.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub(crate) items: Option<Box<Fragment>>,
    pub(crate) keywords: Map<String, Value>,
}

impl Options {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or overrides) a keyword.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds (or overrides) a keyword in place.
    ///
    /// An `items` value that reads as a fragment becomes the array items,
    /// as if given through [`Options::items`]. Any other `items` value is
    /// kept as a plain keyword.
    ///
    /// ```
    /// use jsonschema_serializer_core::{Fragment, Kind, Options};
    /// use serde_json::json;
    ///
    /// let opts = Options::new().with("items", json!({"type": "integer"}));
    /// let integers = Fragment::anonymous(Kind::Array, opts).unwrap();
    /// assert_eq!(integers.items().map(Fragment::kind), Some(Kind::Integer));
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if key == "items" {
            match Fragment::parse(value.clone(), "#/items") {
                Ok(items) => {
                    self.keywords.retain(|key, _| key != "items");
                    self.items = Some(Box::new(items));
                    return self;
                }
                Err(err) => debug!(%err, "keeping `items` as a plain keyword"),
            }
        }
        self.keywords.insert(key, value);
        self
    }

    /// Sets the `items` fragment for array constructors.
    pub fn items(mut self, items: Fragment) -> Self {
        self.keywords.retain(|key, _| key != "items");
        self.items = Some(Box::new(items));
        self
    }

    /// Shorthand for `.with("title", value)`.
    pub fn title(self, value: impl Into<Value>) -> Self {
        self.with("title", value)
    }

    /// Shorthand for `.with("description", value)`.
    pub fn description(self, value: impl Into<Value>) -> Self {
        self.with("description", value)
    }

    /// Shorthand for `.with("default", value)`.
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        self.with("default", value)
    }

    /// Looks up a keyword.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keywords.get(key)
    }

    /// Number of options set, the `items` fragment included.
    pub fn len(&self) -> usize {
        self.keywords.len() + usize::from(self.items.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.items.is_none()
    }

    /// Builds options from a JSON object, keeping its key order.
    ///
    /// Unlike [`Options::set`], an `items` entry must read as a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidFragment`] if `value` is not an object,
    /// or if its `items` entry is not a valid fragment.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(SchemaError::invalid(
                "#",
                format!("options must be a JSON object, found {value}"),
            ));
        };

        let mut opts = Self::new();
        for (key, value) in map {
            if key == "items" {
                opts.items = Some(Box::new(Fragment::parse(value, "#/items")?));
            } else {
                opts.keywords.insert(key, value);
            }
        }
        Ok(opts)
    }
}

impl From<Map<String, Value>> for Options {
    fn from(keywords: Map<String, Value>) -> Self {
        keywords
            .into_iter()
            .fold(Self::new(), |opts, (key, value)| opts.with(key, value))
    }
}

/// A single schema node.
///
/// Equality is structural: two fragments are equal when they have the same
/// shape and the same keywords, whatever order those were merged in.
///
/// # Examples
///
/// ```
/// use jsonschema_serializer_core::{Fragment, Kind, Options};
/// use serde_json::json;
///
/// let age = Fragment::anonymous(Kind::Integer, Options::new().with("minimum", 0)).unwrap();
/// assert_eq!(age.to_value(), json!({"type": "integer", "minimum": 0}));
///
/// // arrays need items
/// assert!(Fragment::anonymous(Kind::Array, Options::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub(crate) shape: Shape,
    pub(crate) keywords: Map<String, Value>,
}

impl Fragment {
    /// Creates a bare `{type: object, properties: {}}` fragment.
    pub fn object() -> Self {
        Self::from_shape(Shape::Object(Properties::new()))
    }

    /// Creates a bare fragment from a shape, with no keywords.
    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            keywords: Map::new(),
        }
    }

    /// Builds an unnamed fragment: default shape, then `opts`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingItems`] for [`Kind::Array`] when `opts`
    /// carries no `items`.
    pub fn anonymous(kind: Kind, opts: Options) -> Result<Self> {
        Self::compose(kind, &[], opts)
    }

    /// Builds a [`NamedProperty`] wrapping [`Fragment::anonymous`].
    ///
    /// # Errors
    ///
    /// Same as [`Fragment::anonymous`].
    pub fn named(kind: Kind, name: impl Into<String>, opts: Options) -> Result<NamedProperty> {
        Ok(NamedProperty::new(name, Self::anonymous(kind, opts)?))
    }

    /// Shape, then `attributes` in order, then `opts`.
    pub(crate) fn compose(
        kind: Kind,
        attributes: &[(&'static str, &Value)],
        mut opts: Options,
    ) -> Result<Self> {
        let shape = match Shape::empty(kind) {
            Some(shape) => shape,
            None => Shape::Array(opts.items.take().ok_or(SchemaError::MissingItems)?),
        };
        Ok(Self::decorated(shape, attributes, opts))
    }

    pub(crate) fn decorated(
        shape: Shape,
        attributes: &[(&'static str, &Value)],
        opts: Options,
    ) -> Self {
        let mut fragment = Self::from_shape(shape);
        for (key, value) in attributes {
            fragment.set(*key, (*value).clone());
        }

        let Options { items, keywords } = opts;
        for (key, value) in keywords {
            fragment.set(key, value);
        }
        if let Some(items) = items {
            if fragment.kind() == Kind::Array {
                warn!("ignoring `items` option: array items already supplied");
            } else {
                // Not structural outside arrays; pass it through like any keyword.
                fragment
                    .keywords
                    .insert("items".to_string(), items.to_value());
            }
        }
        fragment
    }

    /// Returns the fragment's type.
    pub fn kind(&self) -> Kind {
        self.shape.kind()
    }

    /// Returns the structural part of the fragment.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the `properties` mapping of an object fragment.
    pub fn properties(&self) -> Option<&Properties> {
        match &self.shape {
            Shape::Object(properties) => Some(properties),
            _ => None,
        }
    }

    /// Returns the mutable `properties` mapping of an object fragment.
    pub fn properties_mut(&mut self) -> Option<&mut Properties> {
        match &mut self.shape {
            Shape::Object(properties) => Some(properties),
            _ => None,
        }
    }

    /// Returns the `items` fragment of an array fragment.
    pub fn items(&self) -> Option<&Fragment> {
        match &self.shape {
            Shape::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a pass-through keyword.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keywords.get(key)
    }

    /// Returns every pass-through keyword in merge order.
    pub fn keywords(&self) -> &Map<String, Value> {
        &self.keywords
    }

    /// Sets or overrides a keyword.
    ///
    /// `type`, plus `properties` on objects and `items` on arrays, are owned
    /// by the shape and cannot be overridden; such keys are dropped with a
    /// warning and `false` is returned.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if self.is_structural(&key) {
            warn!(keyword = %key, kind = %self.kind(), "ignoring structural keyword");
            return false;
        }
        self.keywords.insert(key, value.into());
        true
    }

    fn is_structural(&self, key: &str) -> bool {
        match key {
            "type" => true,
            "properties" => matches!(self.shape, Shape::Object(_)),
            "items" => matches!(self.shape, Shape::Array(_)),
            _ => false,
        }
    }

    /// Converts the fragment into a generic JSON value.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(self.kind().as_str()));
        match &self.shape {
            Shape::Object(properties) => {
                map.insert("properties".to_string(), properties.to_value());
            }
            Shape::Array(items) => {
                map.insert("items".to_string(), items.to_value());
            }
            _ => {}
        }
        for (key, value) in &self.keywords {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Renders the fragment as JSON text.
    ///
    /// Pretty output uses two-space indentation; compact output has no
    /// whitespace at all.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] if serialization fails.
    pub fn render(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Parses a JSON document back into a fragment tree.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidFragment`] when a node is not an object,
    /// has a missing or unknown `type`, has malformed `properties`, or is an
    /// array without a single `items` fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonschema_serializer_core::{Fragment, Kind};
    /// use serde_json::json;
    ///
    /// let fragment = Fragment::from_value(json!({
    ///     "type": "array",
    ///     "items": {"type": "string"},
    ///     "minItems": 1
    /// })).unwrap();
    /// assert_eq!(fragment.kind(), Kind::Array);
    /// assert_eq!(fragment.items().unwrap().kind(), Kind::String);
    /// assert_eq!(fragment.get("minItems"), Some(&json!(1)));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        Self::parse(value, "#")
    }

    fn parse(value: Value, path: &str) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(SchemaError::invalid(
                path,
                format!("expected a JSON object, found {value}"),
            ));
        };

        let mut kind = None;
        let mut properties = None;
        let mut items = None;
        let mut keywords = Map::new();
        for (key, value) in map {
            match key.as_str() {
                "type" => kind = Some(parse_kind(value, path)?),
                "properties" => properties = Some(value),
                "items" => items = Some(value),
                _ => {
                    keywords.insert(key, value);
                }
            }
        }

        let Some(kind) = kind else {
            return Err(SchemaError::invalid(path, "missing `type`"));
        };
        let shape = match kind {
            Kind::Object => {
                let properties = match properties.take() {
                    Some(value) => Properties::parse(value, &format!("{path}/properties"))?,
                    None => Properties::new(),
                };
                Shape::Object(properties)
            }
            Kind::Array => {
                let Some(value) = items.take() else {
                    return Err(SchemaError::invalid(path, "array fragment requires `items`"));
                };
                if value.is_array() {
                    return Err(SchemaError::invalid(
                        path,
                        "tuple-form `items` is not supported",
                    ));
                }
                Shape::Array(Box::new(Self::parse(value, &format!("{path}/items"))?))
            }
            Kind::Boolean => Shape::Boolean,
            Kind::Integer => Shape::Integer,
            Kind::Number => Shape::Number,
            Kind::String => Shape::String,
        };

        // Non-structural for this kind: keep as plain keywords.
        if let Some(value) = properties {
            keywords.insert("properties".to_string(), value);
        }
        if let Some(value) = items {
            keywords.insert("items".to_string(), value);
        }

        Ok(Self { shape, keywords })
    }
}

fn parse_kind(value: Value, path: &str) -> Result<Kind> {
    match value {
        Value::String(name) => name
            .parse()
            .map_err(|_| SchemaError::invalid(path, format!("unknown type `{name}`"))),
        other => Err(SchemaError::invalid(
            path,
            format!("`type` must be a string, found {other}"),
        )),
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let structural = usize::from(!matches!(
            self.shape,
            Shape::Boolean | Shape::Integer | Shape::Number | Shape::String
        ));
        let mut map = serializer.serialize_map(Some(1 + structural + self.keywords.len()))?;
        map.serialize_entry("type", &self.kind())?;
        match &self.shape {
            Shape::Object(properties) => map.serialize_entry("properties", properties)?,
            Shape::Array(items) => map.serialize_entry("items", items)?,
            _ => {}
        }
        for (key, value) in &self.keywords {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Fragment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Fragment::from_value(value).map_err(de::Error::custom)
    }
}

impl From<&Fragment> for Value {
    fn from(fragment: &Fragment) -> Self {
        fragment.to_value()
    }
}

/// A one-entry mapping from a property name to its fragment.
///
/// Every named constructor returns one; the caller merges it into a parent
/// object's [`Properties`].
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProperty {
    /// Property name.
    pub name: String,
    /// Property schema.
    pub fragment: Fragment,
}

impl NamedProperty {
    pub fn new(name: impl Into<String>, fragment: Fragment) -> Self {
        Self {
            name: name.into(),
            fragment,
        }
    }

    /// Splits into `(name, fragment)`.
    pub fn into_parts(self) -> (String, Fragment) {
        (self.name, self.fragment)
    }

    /// Converts into the single-entry JSON object `{name: fragment}`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.name.clone(), self.fragment.to_value());
        Value::Object(map)
    }
}

impl Serialize for NamedProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.fragment)?;
        map.end()
    }
}

/// The ordered `properties` mapping of an object fragment.
///
/// Entries keep their first insertion position; re-inserting a name replaces
/// its fragment in place. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, Fragment)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a property by name.
    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, fragment)| fragment)
    }

    /// Looks up a property by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Fragment> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, fragment)| fragment)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Inserts a property, returning the fragment it replaced.
    pub fn insert(&mut self, name: impl Into<String>, fragment: Fragment) -> Option<Fragment> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => Some(std::mem::replace(existing, fragment)),
            None => {
                self.entries.push((name, fragment));
                None
            }
        }
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, fragment)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.entries
            .iter()
            .map(|(name, fragment)| (name.as_str(), fragment))
    }

    /// Converts into a generic JSON object.
    pub fn to_value(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(name, fragment)| (name.clone(), fragment.to_value()))
            .collect();
        Value::Object(map)
    }

    fn parse(value: Value, path: &str) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(SchemaError::invalid(
                path,
                format!("`properties` must be a JSON object, found {value}"),
            ));
        };
        let mut properties = Self::new();
        for (name, value) in map {
            let fragment = Fragment::parse(value, &format!("{path}/{name}"))?;
            properties.insert(name, fragment);
        }
        Ok(properties)
    }
}

impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, fragment)| other.get(name) == Some(fragment))
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fragment) in &self.entries {
            map.serialize_entry(name, fragment)?;
        }
        map.end()
    }
}

impl IntoIterator for Properties {
    type Item = (String, Fragment);
    type IntoIter = std::vec::IntoIter<(String, Fragment)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<NamedProperty> for Properties {
    fn from(named: NamedProperty) -> Self {
        let mut properties = Self::new();
        properties.insert(named.name, named.fragment);
        properties
    }
}

impl FromIterator<NamedProperty> for Properties {
    fn from_iter<I: IntoIterator<Item = NamedProperty>>(iter: I) -> Self {
        let mut properties = Self::new();
        for named in iter {
            properties.insert(named.name, named.fragment);
        }
        properties
    }
}
