//! # Validation Schema
//!
//! Declarative rules describing each form field and what it accepts.
//!
//! ## Field Kinds
//!
//! | Kind | Value | Checks |
//! |------|-------|--------|
//! | `Text` | [`FieldValue::Text`] | minimum trimmed length |
//! | `Number` | [`FieldValue::Number`] | minimum, maximum |
//! | `File` | [`FieldValue::Files`] | first file's size and MIME type |
//!
//! ## Evaluation
//!
//! - Every field is evaluated; one field failing never hides another.
//! - Within a field, the first failing constraint supplies the message.
//! - A value of the wrong kind fails the field's first constraint.
//! - Validation is pure: it reads a snapshot and returns data.
//!
//! ## Usage
//!
//! ```
//! use destinasi::config::FormConfig;
//! use destinasi::schema::{validate, FieldValue, Schema};
//! use std::collections::BTreeMap;
//!
//! let schema = Schema::destination(&FormConfig::default());
//! let values = BTreeMap::from([("rating".to_string(), FieldValue::Number(0.0))]);
//! let errors = validate(&schema, &values).unwrap_err();
//! assert_eq!(errors.get("rating"), Some("Please enter a valid rating"));
//! ```

mod spec;
mod validate;
mod value;

pub use spec::{Check, Constraint, FieldKind, FieldRule, Schema};
pub use validate::{validate, ValidatedValues, ValidationErrors};
pub use value::FieldValue;
