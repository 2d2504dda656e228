//! # Domain Types
//!
//! The record the form edits, and the payload shapes sent to the remote
//! collaborator. These shapes are the only boundary contract the core owns.
//!
//! A [`Destination`] is always owned by the remote side: identifiers are assigned
//! there on creation and the core only ever holds copies.

use crate::schema::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted record.
///
/// Assigned externally. Compared by exact string equality, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a route-supplied identifier. Empty means "no record".
    pub fn from_route(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A destination record as returned by the remote collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: RecordId,
    pub destination: String,
    /// Reference to the stored image (usually a URL), not the file itself.
    pub image: String,
    pub description: String,
    /// Kept as entered; currency-agnostic.
    pub price: String,
    pub rating: i64,
}

impl Destination {
    /// Form values carried by this record, keyed by field name.
    ///
    /// The image slot receives the stored reference as text, since no file has
    /// been picked; it will not pass validation until one is.
    pub fn field_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("destination", FieldValue::text(&self.destination)),
            ("image", FieldValue::text(&self.image)),
            ("description", FieldValue::text(&self.description)),
            ("price", FieldValue::text(&self.price)),
            ("rating", FieldValue::Number(self.rating as f64)),
        ]
    }
}

/// A user-selected file, as the form sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    /// Byte length.
    pub size: u64,
    pub mime_type: String,
    /// Opaque blob handle owned by the UI layer.
    pub handle: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            handle: format!("blob:{}", name),
            name,
            size,
            mime_type: mime_type.into(),
        }
    }
}

/// Payload for creating a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationPayload {
    pub destination: String,
    pub image: FileRef,
    pub description: String,
    pub price: String,
    /// Integrality is not checked by the form; the remote side coerces.
    pub rating: f64,
}

/// Payload for updating a record: the create payload plus the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: DestinationPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_route_id_means_no_record() {
        assert_eq!(RecordId::from_route(""), None);
        assert_eq!(RecordId::from_route("abc"), Some(RecordId::new("abc")));
    }

    #[test]
    fn route_id_is_not_normalized() {
        assert_eq!(RecordId::from_route(" abc ").unwrap().as_str(), " abc ");
    }

    #[test]
    fn record_maps_to_form_values() {
        let record = Destination {
            id: RecordId::new("abc"),
            destination: "Bromo".into(),
            image: "https://cdn.example/bromo.png".into(),
            description: "Volcano".into(),
            price: "Rp. 50.000".into(),
            rating: 4,
        };
        let values = record.field_values();
        let names: Vec<_> = values.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["destination", "image", "description", "price", "rating"]
        );
        assert!(values.contains(&("image", FieldValue::text("https://cdn.example/bromo.png"))));
        assert!(values.contains(&("rating", FieldValue::Number(4.0))));
    }

    #[test]
    fn update_payload_flattens_fields() {
        let payload = UpdatePayload {
            id: RecordId::new("abc"),
            fields: DestinationPayload {
                destination: "Bromo".into(),
                image: FileRef::new("bromo.png", 10, "image/png"),
                description: "Volcano".into(),
                price: "Rp. 50.000".into(),
                rating: 4.0,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["destination"], "Bromo");
        assert_eq!(json["image"]["mime_type"], "image/png");
    }
}
