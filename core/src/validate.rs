//! Structural lint for assembled schemas.
//!
//! The builder accepts any pass-through keyword, so it cannot stop a caller
//! from writing `minimum: 10, maximum: 1` or requiring a property that was
//! never declared. [`lint_schema`] walks a finished fragment tree and reports
//! such inconsistencies. It inspects the schema document only; it never
//! validates instance data.
//!
//! # Examples
//!
//! ```
//! use jsonschema_serializer_core::*;
//!
//! let builder = Builder::build(|b| {
//!     b.required(["name"]);
//!     b.property(b.string("name", Options::new()));
//! });
//! assert!(lint_schema(builder.schema()).is_empty());
//!
//! let builder = Builder::build(|b| {
//!     b.required(["missing"]);
//! });
//! let warnings = lint_schema(builder.schema());
//! assert!(matches!(warnings[0], LintWarning::RequiredNotDeclared { .. }));
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::types::{Fragment, Shape};

/// A structural problem found in a schema document.
///
/// Each variant carries the path of the offending fragment, written as a
/// JSON pointer fragment (`#`, `#/properties/tags/items`, ...). Property
/// names are escaped, so `a/b` appears as `#/properties/a~1b`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// `required` lists a name with no matching property.
    #[error("{path}: required property `{name}` is not declared")]
    RequiredNotDeclared { path: String, name: String },
    /// `required` is not an array of strings.
    #[error("{path}: `required` must be an array of strings")]
    InvalidRequired { path: String },
    /// `enum` is empty or not an array.
    #[error("{path}: `enum` must be a non-empty array")]
    EmptyEnum { path: String },
    /// A lower bound exceeds its upper bound.
    #[error("{path}: `{lower}` is greater than `{upper}`")]
    InvertedRange {
        path: String,
        lower: &'static str,
        upper: &'static str,
    },
    /// `multipleOf` is zero, negative or not a number.
    #[error("{path}: `multipleOf` must be a number strictly greater than 0")]
    NonPositiveMultipleOf { path: String },
}

const RANGES: [(&str, &str); 3] = [
    ("minimum", "maximum"),
    ("minLength", "maxLength"),
    ("minItems", "maxItems"),
];

/// Lints a whole fragment tree, depth first.
///
/// Returns every warning found, in document order; an empty vector means the
/// schema is consistent.
pub fn lint_schema(schema: &Fragment) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let mut path = String::from("#");
    lint_fragment(schema, &mut path, &mut warnings);
    warnings
}

fn lint_fragment(fragment: &Fragment, path: &mut String, warnings: &mut Vec<LintWarning>) {
    lint_keywords(fragment, path, warnings);

    match fragment.shape() {
        Shape::Object(properties) => {
            lint_required(fragment, path, warnings);
            for (name, child) in properties.iter() {
                let len = path.len();
                path.push_str("/properties/");
                push_pointer_token(path, name);
                lint_fragment(child, path, warnings);
                path.truncate(len);
            }
        }
        Shape::Array(items) => {
            let len = path.len();
            path.push_str("/items");
            lint_fragment(items, path, warnings);
            path.truncate(len);
        }
        _ => {}
    }
}

/// Appends `token` escaped per RFC 6901: `~` as `~0`, `/` as `~1`.
fn push_pointer_token(path: &mut String, token: &str) {
    for c in token.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            _ => path.push(c),
        }
    }
}

fn lint_required(fragment: &Fragment, path: &str, warnings: &mut Vec<LintWarning>) {
    let Some(required) = fragment.get("required") else {
        return;
    };
    let Some(names) = required
        .as_array()
        .and_then(|names| names.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
    else {
        warnings.push(LintWarning::InvalidRequired {
            path: path.to_string(),
        });
        return;
    };

    let properties = fragment.properties();
    for name in names {
        if !properties.is_some_and(|p| p.contains(name)) {
            warnings.push(LintWarning::RequiredNotDeclared {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }
}

fn lint_keywords(fragment: &Fragment, path: &str, warnings: &mut Vec<LintWarning>) {
    if let Some(values) = fragment.get("enum") {
        if values.as_array().is_none_or(Vec::is_empty) {
            warnings.push(LintWarning::EmptyEnum {
                path: path.to_string(),
            });
        }
    }

    for (lower, upper) in RANGES {
        let bounds = (
            fragment.get(lower).and_then(Value::as_f64),
            fragment.get(upper).and_then(Value::as_f64),
        );
        if let (Some(low), Some(high)) = bounds {
            if low > high {
                warnings.push(LintWarning::InvertedRange {
                    path: path.to_string(),
                    lower,
                    upper,
                });
            }
        }
    }

    if let Some(step) = fragment.get("multipleOf") {
        if !step.as_f64().is_some_and(|step| step > 0.0) {
            warnings.push(LintWarning::NonPositiveMultipleOf {
                path: path.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lint(value: Value) -> Vec<LintWarning> {
        lint_schema(&Fragment::from_value(value).unwrap())
    }

    #[test]
    fn test_consistent_schema_has_no_warnings() {
        let warnings = lint(json!({
            "type": "object",
            "properties": {
                "a": {"type": "string", "minLength": 2, "maxLength": 4},
                "e": {"type": "integer", "enum": [1, 2, 3], "multipleOf": 1}
            },
            "required": ["a", "a"]
        }));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_required_not_declared() {
        let warnings = lint(json!({
            "type": "object",
            "properties": {"a": {"type": "string"}},
            "required": ["a", "b"]
        }));
        assert_eq!(
            warnings,
            vec![LintWarning::RequiredNotDeclared {
                path: "#".to_string(),
                name: "b".to_string()
            }]
        );
    }

    #[test]
    fn test_invalid_required() {
        let warnings = lint(json!({"type": "object", "required": "a"}));
        assert_eq!(
            warnings,
            vec![LintWarning::InvalidRequired {
                path: "#".to_string()
            }]
        );
    }

    #[test]
    fn test_nested_paths() {
        let warnings = lint(json!({
            "type": "object",
            "properties": {
                "subscribers": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {"age": {"type": "integer", "enum": []}}
                    }
                }
            }
        }));
        assert_eq!(
            warnings,
            vec![
                LintWarning::InvertedRange {
                    path: "#/properties/subscribers".to_string(),
                    lower: "minItems",
                    upper: "maxItems",
                },
                LintWarning::EmptyEnum {
                    path: "#/properties/subscribers/items/properties/age".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_property_names_are_escaped() {
        let warnings = lint(json!({
            "type": "object",
            "properties": {
                "a/b": {"type": "string", "enum": []},
                "a": {
                    "type": "object",
                    "properties": {"b": {"type": "string", "enum": []}}
                },
                "m~n": {"type": "integer", "minimum": 2, "maximum": 1}
            }
        }));
        let paths: Vec<&str> = warnings
            .iter()
            .map(|w| match w {
                LintWarning::EmptyEnum { path } | LintWarning::InvertedRange { path, .. } => {
                    path.as_str()
                }
                other => panic!("unexpected warning: {other}"),
            })
            .collect();
        assert_eq!(
            paths,
            vec!["#/properties/a~1b", "#/properties/a/properties/b", "#/properties/m~0n"]
        );
    }

    #[test]
    fn test_non_positive_multiple_of() {
        let warnings = lint(json!({"type": "number", "multipleOf": 0}));
        assert_eq!(
            warnings,
            vec![LintWarning::NonPositiveMultipleOf {
                path: "#".to_string()
            }]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = LintWarning::InvertedRange {
            path: "#/properties/b".to_string(),
            lower: "minimum",
            upper: "maximum",
        };
        assert_eq!(
            warning.to_string(),
            "#/properties/b: `minimum` is greater than `maximum`"
        );
    }
}
