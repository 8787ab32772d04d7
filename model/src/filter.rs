//! Column selection with `only` / `except` lists.
//!
//! Filters never mutate the model; they return the kept columns in their
//! original relative order.

use tracing::debug;

use crate::column::Column;
use crate::error::{ModelError, Result};

/// Which columns become schema properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnFilter {
    /// Every column.
    #[default]
    All,
    /// Only the listed columns.
    Only(Vec<String>),
    /// Every column except the listed ones.
    Except(Vec<String>),
}

impl ColumnFilter {
    /// Builds a filter from optional allow and deny lists.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FilterConflict`] when both lists are supplied,
    /// even if either is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonschema_serializer_model::{ColumnFilter, ModelError};
    ///
    /// let filter = ColumnFilter::new(None, Some(vec!["x".into()])).unwrap();
    /// assert!(!filter.keeps("x"));
    ///
    /// let err = ColumnFilter::new(Some(vec![]), Some(vec![])).unwrap_err();
    /// assert!(matches!(err, ModelError::FilterConflict));
    /// ```
    pub fn new(only: Option<Vec<String>>, except: Option<Vec<String>>) -> Result<Self> {
        match (only, except) {
            (Some(_), Some(_)) => Err(ModelError::FilterConflict),
            (Some(only), None) => Ok(ColumnFilter::Only(only)),
            (None, Some(except)) => Ok(ColumnFilter::Except(except)),
            (None, None) => Ok(ColumnFilter::All),
        }
    }

    /// Returns `true` when a column called `name` is kept.
    pub fn keeps(&self, name: &str) -> bool {
        match self {
            ColumnFilter::All => true,
            ColumnFilter::Only(names) => names.iter().any(|n| n == name),
            ColumnFilter::Except(names) => !names.iter().any(|n| n == name),
        }
    }

    /// Returns the kept columns in their original order.
    pub fn select<'a>(&self, columns: &'a [Column]) -> Vec<&'a Column> {
        let kept: Vec<&Column> = columns.iter().filter(|c| self.keeps(&c.name)).collect();
        debug!(
            filter = ?self,
            columns = columns.len(),
            kept = kept.len(),
            "selected model columns"
        );
        kept
    }

    /// Narrows presence-required field names to the filtered set.
    ///
    /// An `only` filter intersects and deduplicates, keeping `required`
    /// order. An `except` filter subtracts and keeps duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonschema_serializer_model::ColumnFilter;
    ///
    /// let required = vec!["a".to_string(), "b".to_string(), "a".to_string()];
    ///
    /// let only = ColumnFilter::Only(vec!["a".into()]);
    /// assert_eq!(only.filter_required(&required), vec!["a"]);
    ///
    /// let except = ColumnFilter::Except(vec!["b".into()]);
    /// assert_eq!(except.filter_required(&required), vec!["a", "a"]);
    /// ```
    pub fn filter_required(&self, required: &[String]) -> Vec<String> {
        match self {
            ColumnFilter::All => required.to_vec(),
            ColumnFilter::Only(_) => {
                let mut kept: Vec<String> = Vec::new();
                for name in required {
                    if self.keeps(name) && !kept.contains(name) {
                        kept.push(name.clone());
                    }
                }
                kept
            }
            ColumnFilter::Except(_) => required
                .iter()
                .filter(|name| self.keeps(name))
                .cloned()
                .collect(),
        }
    }
}

/// An allow-list accumulated over several calls.
///
/// Names keep their call order; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedAttributes {
    names: Vec<String>,
}

impl AllowedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `names` to the list.
    pub fn allow<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Turns the list into an `only` filter.
    pub fn into_filter(self) -> ColumnFilter {
        ColumnFilter::Only(self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("x", "decimal"),
            Column::new("t", "text"),
            Column::new("n", "integer"),
        ]
    }

    fn names(selected: &[&Column]) -> Vec<String> {
        selected.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_all_keeps_everything() {
        let columns = columns();
        assert_eq!(names(&ColumnFilter::All.select(&columns)), vec!["x", "t", "n"]);
    }

    #[test]
    fn test_only_preserves_column_order() {
        let columns = columns();
        let filter = ColumnFilter::Only(vec!["n".into(), "x".into(), "missing".into()]);
        assert_eq!(names(&filter.select(&columns)), vec!["x", "n"]);
    }

    #[test]
    fn test_except_drops_listed() {
        let columns = columns();
        let filter = ColumnFilter::Except(vec!["x".into()]);
        assert_eq!(names(&filter.select(&columns)), vec!["t", "n"]);
        // the input is untouched
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_conflict_even_when_empty() {
        assert!(matches!(
            ColumnFilter::new(Some(vec![]), Some(vec!["a".into()])),
            Err(ModelError::FilterConflict)
        ));
        assert_eq!(ColumnFilter::new(None, None).unwrap(), ColumnFilter::All);
        assert_eq!(
            ColumnFilter::new(Some(vec![]), None).unwrap(),
            ColumnFilter::Only(vec![])
        );
    }

    #[test]
    fn test_empty_only_keeps_nothing() {
        let columns = columns();
        assert!(ColumnFilter::Only(vec![]).select(&columns).is_empty());
    }

    #[test]
    fn test_filter_required_all() {
        let required = vec!["a".to_string(), "a".to_string()];
        assert_eq!(ColumnFilter::All.filter_required(&required), required);
    }

    #[test]
    fn test_allowed_attributes_accumulate() {
        let mut allowed = AllowedAttributes::new();
        allowed.allow(["name", "price"]).allow(["name"]);
        assert_eq!(allowed.names(), ["name", "price", "name"]);
        assert_eq!(
            allowed.into_filter(),
            ColumnFilter::Only(vec!["name".into(), "price".into(), "name".into()])
        );
    }
}
