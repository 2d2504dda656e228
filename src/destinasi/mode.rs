//! # Mode Resolution
//!
//! A form session is either creating a new record or editing an existing one.
//! The mode is never stored as a sentinel: [`SessionMode::Edit`] carries the
//! identifier it resolved to.

use crate::model::{Destination, RecordId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum SessionMode {
    Create,
    Edit(RecordId),
}

impl SessionMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, SessionMode::Edit(_))
    }

    /// Label of the single submit affordance.
    pub fn submit_label(&self) -> &'static str {
        match self {
            SessionMode::Create => "Submit",
            SessionMode::Edit(_) => "Update",
        }
    }
}

/// First record whose identifier equals `target`, exactly.
///
/// No target always resolves to no match.
pub fn resolve_record<'a>(
    records: &'a [Destination],
    target: Option<&RecordId>,
) -> Option<&'a Destination> {
    let target = target?;
    records.iter().find(|r| &r.id == target)
}
