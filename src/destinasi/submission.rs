//! # Submission Coordinator
//!
//! Serializes submissions. At most one create/update call is in flight; a
//! request arriving while another is pending is turned away without touching
//! the remote collaborator.
//!
//! The in-flight flag is owned by an RAII guard, so it is cleared however the
//! submission ends, including when the pending future is dropped.
//!
//! Every attempt that gets through the guard yields exactly one
//! [`SubmissionOutcome`]: created, updated, or failed.

use crate::model::{Destination, DestinationPayload, UpdatePayload};
use crate::notice::Notice;
use crate::remote::{DestinationApi, RemoteError};
use std::cell::Cell;

pub const CREATED_MESSAGE: &str = "Successfully added new destination";
pub const UPDATED_MESSAGE: &str = "Successfully edited destination";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(DestinationPayload),
    Update(UpdatePayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Created(Destination),
    Updated(Destination),
    Failed(RemoteError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, SubmissionOutcome::Failed(_))
    }

    /// What the user is told. Remote messages are passed through verbatim.
    pub fn notice(&self) -> Notice {
        match self {
            SubmissionOutcome::Created(_) => Notice::success(CREATED_MESSAGE),
            SubmissionOutcome::Updated(_) => Notice::success(UPDATED_MESSAGE),
            SubmissionOutcome::Failed(err) => Notice::error(err.message.clone()),
        }
    }
}

/// Clears the in-flight flag when dropped.
pub struct InFlight<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    in_flight: Cell<bool>,
}

impl SubmissionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Claim the in-flight slot, or `None` if it is taken.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(InFlight {
            flag: &self.in_flight,
        })
    }

    /// Run `request` against `api`. Returns `None` if another submission is
    /// already in flight.
    pub async fn submit<A: DestinationApi>(
        &self,
        api: &A,
        request: SubmitRequest,
    ) -> Option<SubmissionOutcome> {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("submission already in flight, ignoring");
            return None;
        };

        let outcome = match request {
            SubmitRequest::Create(payload) => match api.create(payload).await {
                Ok(record) => {
                    tracing::info!(id = %record.id, "destination created");
                    SubmissionOutcome::Created(record)
                }
                Err(err) => SubmissionOutcome::Failed(err),
            },
            SubmitRequest::Update(payload) => match api.update(payload).await {
                Ok(record) => {
                    tracing::info!(id = %record.id, "destination updated");
                    SubmissionOutcome::Updated(record)
                }
                Err(err) => SubmissionOutcome::Failed(err),
            },
        };

        if let SubmissionOutcome::Failed(err) = &outcome {
            tracing::warn!(error = %err, "submission rejected");
        }
        Some(outcome)
    }
}
