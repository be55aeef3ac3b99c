//! Filter constraints rendered as Solr `fq` parameters.
//!
//! A constraint names one field and carries the values it may take:
//!
//! | Values | Rendered filter |
//! |--------|-----------------|
//! | none | dropped |
//! | `["a"]` | `field:"a"` |
//! | `["a", "b"]` | `field:("a" OR "b")` |
//!
//! Constraints in a list are combined with logical AND by the backend, one
//! `fq` parameter each. A leading `-` on the field name negates the filter.

use serde::{Deserialize, Serialize};

/// A field restriction on a GOlr query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConstraint {
    field: String,
    values: Vec<String>,
}

impl FilterConstraint {
    /// Exact match on a single value.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            values: vec![value.into()],
        }
    }

    /// Match any of the given values.
    pub fn any_of<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Exclude documents whose field matches the value.
    pub fn exclude(field: impl AsRef<str>, value: impl Into<String>) -> Self {
        let field = field.as_ref();
        let field = field.strip_prefix('-').unwrap_or(field);
        Self::eq(format!("-{}", field), value)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Render as an `fq` value, or `None` when there are no values.
    pub fn to_filter_query(&self) -> Option<String> {
        match self.values.as_slice() {
            [] => None,
            [value] => Some(format!("{}:\"{}\"", self.field, value)),
            values => {
                let alternatives = values
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                Some(format!("{}:({})", self.field, alternatives))
            }
        }
    }
}
