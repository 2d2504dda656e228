//! Field value types.
//!
//! This module defines the runtime representation of form values. The schema
//! dispatches on the tag when checking constraints.

use crate::model::FileRef;
use serde::{Deserialize, Serialize};

/// Runtime representation of a single form value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    /// Free text (name, description, price)
    Text(String),

    /// Numeric input (rating)
    Number(f64),

    /// Files picked in a file input, in selection order
    ///
    /// Constraints are evaluated against the first file only.
    Files(Vec<FileRef>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn file(file: FileRef) -> Self {
        FieldValue::Files(vec![file])
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The first file, if this is a file value with at least one entry.
    pub fn first_file(&self) -> Option<&FileRef> {
        match self {
            FieldValue::Files(files) => files.first(),
            _ => None,
        }
    }

    /// Whether the value counts as "not supplied" for optional fields.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Files(files) => files.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_file_takes_selection_order() {
        let value = FieldValue::Files(vec![
            FileRef::new("a.png", 1, "image/png"),
            FileRef::new("b.gif", 2, "image/gif"),
        ]);
        assert_eq!(value.first_file().unwrap().name, "a.png");
        assert!(FieldValue::Files(vec![]).first_file().is_none());
        assert!(FieldValue::text("x").first_file().is_none());
    }

    #[test]
    fn accessors_only_match_their_tag() {
        assert_eq!(FieldValue::text("x").as_text(), Some("x"));
        assert_eq!(FieldValue::Number(3.0).as_text(), None);
        assert_eq!(FieldValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(FieldValue::text("3").as_number(), None);
    }

    #[test]
    fn blank_values() {
        assert!(FieldValue::text("").is_blank());
        assert!(!FieldValue::text(" ").is_blank());
        assert!(FieldValue::Files(vec![]).is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
    }
}
