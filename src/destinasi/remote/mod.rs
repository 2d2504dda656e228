//! # Remote Collaborator
//!
//! The form never talks to the network itself. It consumes three async
//! operations through the [`DestinationApi`] trait:
//!
//! - `fetch_all`: the full record collection, used at initialization
//! - `create`: persist a new record; the remote side assigns the identifier
//! - `update`: persist changes to an existing record
//!
//! A failure carries a human-readable message that the form surfaces verbatim.
//!
//! ## Threading
//!
//! The form core is single-threaded and cooperative, so the trait is
//! `?Send`: implementations may hold `Rc`/`RefCell` state.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryApi`]: in-process collaborator for tests and demos.

use crate::model::{Destination, DestinationPayload, UpdatePayload};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

/// A rejected remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[async_trait(?Send)]
pub trait DestinationApi {
    /// Every record, in the collaborator's order.
    async fn fetch_all(&self) -> RemoteResult<Vec<Destination>>;

    /// Create a record and return it with its assigned identifier.
    async fn create(&self, payload: DestinationPayload) -> RemoteResult<Destination>;

    /// Update the record named by `payload.id`.
    async fn update(&self, payload: UpdatePayload) -> RemoteResult<Destination>;
}
