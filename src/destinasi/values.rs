//! # Field Value Store
//!
//! The in-memory mapping from field name to current value for one form session.
//!
//! - Created with each rule's declared default (text fields empty, no file,
//!   rating as configured on the schema).
//! - Field names are checked against the schema; unknown names are rejected.
//! - User writes mark a field dirty; [`FieldValueStore::reset`] restores defaults
//!   and clears all dirty marks.
//! - Hydration is all-or-nothing: the full set of incoming values is built
//!   first and then swapped in. Names the schema does not know are skipped.

use crate::error::{DestinasiError, Result};
use crate::schema::{FieldValue, Schema};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct FieldValueStore {
    defaults: BTreeMap<String, FieldValue>,
    values: BTreeMap<String, FieldValue>,
    dirty: BTreeSet<String>,
    known: BTreeSet<String>,
}

impl FieldValueStore {
    /// Start a store with one default per schema field.
    pub fn new(schema: &Schema) -> Self {
        let defaults: BTreeMap<String, FieldValue> = schema
            .rules()
            .iter()
            .map(|rule| (rule.name.clone(), rule.initial_value()))
            .collect();

        Self {
            values: defaults.clone(),
            known: defaults.keys().cloned().collect(),
            defaults,
            dirty: BTreeSet::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Write a user-supplied value. No validation runs here.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<()> {
        if !self.known.contains(name) {
            return Err(DestinasiError::UnknownField(name.to_string()));
        }
        self.values.insert(name.to_string(), value);
        self.dirty.insert(name.to_string());
        Ok(())
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.dirty.contains(name)
    }

    pub fn has_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.dirty.clear();
    }

    /// Overwrite every incoming field, e.g. from [`Destination::field_values`].
    ///
    /// [`Destination::field_values`]: crate::model::Destination::field_values
    pub fn hydrate<'a, I>(&mut self, incoming: I)
    where
        I: IntoIterator<Item = (&'a str, FieldValue)>,
    {
        let mut next = self.values.clone();
        for (name, value) in incoming {
            if self.known.contains(name) {
                next.insert(name.to_string(), value);
            }
        }
        self.values = next;
        self.dirty.clear();
    }

    pub fn snapshot(&self) -> BTreeMap<String, FieldValue> {
        self.values.clone()
    }

    pub fn is_default(&self) -> bool {
        self.values == self.defaults
    }
}
