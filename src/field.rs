//! Table cell values.

use std::fmt;

/// Separator used when a list is rendered into a single cell.
pub const LIST_SEPARATOR: &str = "; ";

/// A single value or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// A scalar from an optional value; `None` becomes an empty scalar.
    #[must_use]
    pub fn optional(value: Option<&str>) -> Self {
        Self::Scalar(value.unwrap_or_default().to_string())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(value) => value.is_empty(),
            Self::List(values) => values.iter().all(String::is_empty),
        }
    }

    /// The value as one string, list items joined with `separator`.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::List(values) => values
                .iter()
                .filter(|v| !v.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(separator),
        }
    }

    /// Cell text: the joined value, or `placeholder` when empty.
    #[must_use]
    pub fn render(&self, placeholder: &str) -> String {
        if self.is_empty() {
            placeholder.to_string()
        } else {
            self.joined(LIST_SEPARATOR)
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined(LIST_SEPARATOR))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[String]> for FieldValue {
    fn from(values: &[String]) -> Self {
        Self::List(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_list_join() {
        assert_eq!(FieldValue::from("YWHAB").to_string(), "YWHAB");
        let list = FieldValue::from(vec!["KCIP1".to_string(), "P29".to_string()]);
        assert_eq!(list.to_string(), "KCIP1; P29");
        assert_eq!(list.joined(","), "KCIP1,P29");
    }

    #[test]
    fn empty_values_render_placeholder() {
        assert_eq!(FieldValue::optional(None).render("na"), "na");
        assert_eq!(FieldValue::List(Vec::new()).render("na"), "na");
        assert_eq!(FieldValue::List(vec![String::new()]).render("na"), "na");
        assert_eq!(FieldValue::optional(Some("x")).render("na"), "x");
    }

    #[test]
    fn empty_list_items_skipped() {
        let list = FieldValue::List(vec!["a".to_string(), String::new(), "b".to_string()]);
        assert_eq!(list.render("na"), "a; b");
    }
}
