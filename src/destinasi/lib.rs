//! # Destinasi Architecture
//!
//! Destinasi is a **UI-agnostic form core** for creating and editing destination
//! records. It is not a page that happens to have some logic in it; it is the
//! logic, and any page (web, terminal, native) binds to it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (not in this crate)                               │
//! │  - Renders inputs, shows inline errors and toast notices    │
//! │  - Extracts the record identifier from the route            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs)                                 │
//! │  - Owns the session: state machine, values, errors          │
//! │  - Decides create vs edit, resets after success             │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  schema/, values.rs, mode.rs │ │  submission.rs             │
//! │  - Pure validation           │ │  - In-flight guard         │
//! │  - Value store, hydration    │ │  - Outcome and notice      │
//! │  - Record resolution         │ │                            │
//! └──────────────────────────────┘ └────────────────────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Remote Layer (remote/)                                     │
//! │  - Abstract DestinationApi trait (fetch_all/create/update)   │
//! │  - InMemoryApi for tests                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to a terminal, touches the network, or shows a
//! toast. Results come back as Rust types; notices come back as [`notice::Notice`]
//! values for the UI to display.
//!
//! ## Error Taxonomy
//!
//! - Validation errors are data: per-field messages kept on the form.
//! - A failed initial fetch is logged with `tracing` and the form stays usable
//!   in create mode.
//! - A failed submission is an error notice; entered values are kept for retry.
//! - [`error::DestinasiError`] is reserved for lifecycle misuse (unknown field,
//!   use before `initialize`, use after `unmount`) and configuration loading.
//!
//! ## Testing Strategy
//!
//! 1. **Schema / values / mode**: plain unit tests, no async.
//! 2. **Submission and controller**: `#[tokio::test]` against [`remote::memory::InMemoryApi`],
//!    with `tokio_test::task::spawn` to hold calls in flight.
//! 3. **Lifecycle flows**: integration tests in `tests/`.
//!
//! ## Module Overview
//!
//! - [`controller`]: The form session facade
//! - [`schema`]: Field rules and validation
//! - [`values`]: Field value store
//! - [`mode`]: Create/edit mode resolution
//! - [`submission`]: Serialized create/update submission
//! - [`remote`]: Remote collaborator trait and in-memory implementation
//! - [`model`]: Record and payload types
//! - [`notice`]: User-visible notices
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod config;
pub mod controller;
pub mod error;
pub mod mode;
pub mod model;
pub mod notice;
pub mod remote;
pub mod schema;
pub mod submission;
pub mod values;

pub use controller::{FormController, FormState, SubmitOutcome};
pub use error::{DestinasiError, Result};
