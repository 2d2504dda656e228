//! Whole-form validation.
//!
//! [`validate`] is a pure function over a snapshot of the value store. Every
//! rule is evaluated (no short-circuit across fields) and each failing field
//! contributes exactly one message.

use super::spec::Schema;
use super::value::FieldValue;
use crate::error::{DestinasiError, Result};
use crate::model::{DestinationPayload, FileRef};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-field error messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

/// A snapshot that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedValues(BTreeMap<String, FieldValue>);

impl ValidatedValues {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    fn text(&self, field: &str) -> Result<String> {
        self.get(field)
            .and_then(FieldValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| DestinasiError::Payload(format!("{} is not text", field)))
    }

    fn number(&self, field: &str) -> Result<f64> {
        self.get(field)
            .and_then(FieldValue::as_number)
            .ok_or_else(|| DestinasiError::Payload(format!("{} is not a number", field)))
    }

    fn first_file(&self, field: &str) -> Result<FileRef> {
        self.get(field)
            .and_then(FieldValue::first_file)
            .cloned()
            .ok_or_else(|| DestinasiError::Payload(format!("{} has no file", field)))
    }

    /// Shape the destination fields into a create payload.
    ///
    /// Text is passed through as entered; trimming only applies to the check.
    pub fn to_destination_payload(&self) -> Result<DestinationPayload> {
        Ok(DestinationPayload {
            destination: self.text("destination")?,
            image: self.first_file("image")?,
            description: self.text("description")?,
            price: self.text("price")?,
            rating: self.number("rating")?,
        })
    }
}

/// Validate `values` against every rule of `schema`.
pub fn validate(
    schema: &Schema,
    values: &BTreeMap<String, FieldValue>,
) -> std::result::Result<ValidatedValues, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for rule in schema.rules() {
        if let Some(message) = rule.first_failure(values.get(&rule.name)) {
            errors.insert(&rule.name, message);
        }
    }

    if errors.is_empty() {
        Ok(ValidatedValues(values.clone()))
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;

    fn schema() -> Schema {
        Schema::destination(&FormConfig::default())
    }

    fn valid_values() -> BTreeMap<String, FieldValue> {
        BTreeMap::from([
            ("destination".to_string(), FieldValue::text("Bromo")),
            (
                "image".to_string(),
                FieldValue::file(FileRef::new("bromo.jpg", 120_000, "image/jpeg")),
            ),
            ("description".to_string(), FieldValue::text("Volcano")),
            ("price".to_string(), FieldValue::text("Rp. 50.000")),
            ("rating".to_string(), FieldValue::Number(4.0)),
        ])
    }

    #[test]
    fn valid_values_pass_with_no_errors() {
        let validated = validate(&schema(), &valid_values()).unwrap();
        let payload = validated.to_destination_payload().unwrap();
        assert_eq!(payload.destination, "Bromo");
        assert_eq!(payload.image.name, "bromo.jpg");
        assert_eq!(payload.rating, 4.0);
    }

    #[test]
    fn every_failing_field_reports_once() {
        let values = BTreeMap::from([("rating".to_string(), FieldValue::Number(0.0))]);
        let errors = validate(&schema(), &values).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.get("destination"),
            Some("Please enter a valid destination name")
        );
        assert_eq!(errors.get("description"), Some("Please enter a valid description"));
        assert_eq!(errors.get("price"), Some("Please enter a valid price"));
        assert_eq!(errors.get("rating"), Some("Please enter a valid rating"));
        assert_eq!(errors.get("image"), Some("Max image size is 5MB."));
        assert_eq!(errors.get("id"), None);
    }

    #[test]
    fn oversize_image_fails_size_regardless_of_type() {
        for mime in ["image/png", "image/gif", "text/plain"] {
            let mut values = valid_values();
            values.insert(
                "image".into(),
                FieldValue::file(FileRef::new("big", 500_001, mime)),
            );
            let errors = validate(&schema(), &values).unwrap_err();
            assert_eq!(errors.get("image"), Some("Max image size is 5MB."));
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn image_at_exact_threshold_passes() {
        let mut values = valid_values();
        values.insert(
            "image".into(),
            FieldValue::file(FileRef::new("edge.webp", 500_000, "image/webp")),
        );
        assert!(validate(&schema(), &values).is_ok());
    }

    #[test]
    fn gif_fails_type_check() {
        let mut values = valid_values();
        values.insert(
            "image".into(),
            FieldValue::file(FileRef::new("anim.gif", 100, "image/gif")),
        );
        let errors = validate(&schema(), &values).unwrap_err();
        assert_eq!(
            errors.get("image"),
            Some("Only .jpg, .jpeg, .png and .webp formats are supported.")
        );
    }

    #[test]
    fn only_first_file_is_checked() {
        let mut values = valid_values();
        values.insert(
            "image".into(),
            FieldValue::Files(vec![
                FileRef::new("ok.png", 10, "image/png"),
                FileRef::new("bad.gif", 900_000, "image/gif"),
            ]),
        );
        assert!(validate(&schema(), &values).is_ok());
    }

    #[test]
    fn rating_bounds() {
        let mut values = valid_values();
        values.insert("rating".into(), FieldValue::Number(0.0));
        let errors = validate(&schema(), &values).unwrap_err();
        assert_eq!(errors.get("rating"), Some("Please enter a valid rating"));

        values.insert("rating".into(), FieldValue::Number(5.0));
        assert!(validate(&schema(), &values).is_ok());

        // Upper bound is advertised but not checked by default.
        values.insert("rating".into(), FieldValue::Number(6.0));
        assert!(validate(&schema(), &values).is_ok());
    }

    #[test]
    fn text_given_as_number_fails() {
        let mut values = valid_values();
        values.insert("rating".into(), FieldValue::text("4"));
        let errors = validate(&schema(), &values).unwrap_err();
        assert_eq!(errors.get("rating"), Some("Please enter a valid rating"));
    }

    #[test]
    fn errors_serialize_as_a_flat_map() {
        let values = BTreeMap::from([("rating".to_string(), FieldValue::Number(3.0))]);
        let errors = validate(&schema(), &values).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["price"], "Please enter a valid price");
    }
}
