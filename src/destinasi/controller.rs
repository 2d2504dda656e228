//! # Form Controller
//!
//! The single entry point for a form session. It ties together the value
//! store, the schema, mode resolution and the submission coordinator, and is
//! generic over the remote collaborator:
//!
//! - Production: `FormController<YourHttpApi>`
//! - Testing: `FormController<InMemoryApi>`
//!
//! ## Lifecycle
//!
//! ```text
//! INITIALIZING ──initialize──▶ READY(CREATE) ──hydrate──▶ READY(EDIT)
//!                                   │  ▲                     │  ▲
//!                                submit│                  submit│
//!                                   ▼  │                     ▼  │
//!                             SUBMITTING(CREATE)        SUBMITTING(EDIT)
//! ```
//!
//! - `initialize` makes the form usable at once with defaults and then waits
//!   for the collection. A matching record hydrates the store and switches to
//!   edit mode. A failed fetch is logged and the form stays in create mode.
//! - `submit` validates first. Invalid input never reaches the collaborator.
//! - A successful create resets the store and returns at once. If configured,
//!   the collection is then stale: [`FormController::needs_refresh`] turns true
//!   and the UI calls [`FormController::refresh`] after showing the notice.
//! - A successful edit resets the store AND returns to create mode. This
//!   mirrors the historical page and is pending product confirmation.
//! - A failed submission leaves values and mode untouched.
//!
//! ## Concurrency
//!
//! Single-threaded and cooperative. The controller is a cheap `Clone` handle
//! over shared state so the UI can keep writing fields while a fetch or a
//! submission is pending. No `RefCell` borrow is held across an `.await`.
//!
//! Hydration is applied when the fetch resolves: last response wins. A field
//! written before a matching fetch resolves is overwritten by it.
//!
//! After [`FormController::unmount`], late completions are discarded and every
//! operation returns [`DestinasiError::Unmounted`].

use crate::config::FormConfig;
use crate::error::{DestinasiError, Result};
use crate::mode::{resolve_record, SessionMode};
use crate::model::{Destination, RecordId, UpdatePayload};
use crate::notice::Notice;
use crate::remote::DestinationApi;
use crate::schema::{validate, FieldValue, Schema, ValidationErrors};
use crate::submission::{SubmissionCoordinator, SubmissionOutcome, SubmitRequest};
use crate::values::FieldValueStore;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Externally visible state of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Initializing,
    Ready(SessionMode),
    Submitting(SessionMode),
}

/// Result of a `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are also kept on the form for display.
    Invalid(ValidationErrors),
    /// Another submission was in flight; nothing happened.
    Ignored,
    /// The collaborator answered.
    Completed(SubmissionOutcome),
}

impl SubmitOutcome {
    /// The notice to show, if any. Validation errors are shown inline instead.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitOutcome::Completed(outcome) => Some(outcome.notice()),
            _ => None,
        }
    }
}

struct Session {
    initialized: bool,
    target: Option<RecordId>,
    mode: SessionMode,
    values: FieldValueStore,
    errors: ValidationErrors,
    records: Vec<Destination>,
}

struct Inner<A> {
    api: A,
    schema: Schema,
    config: FormConfig,
    coordinator: SubmissionCoordinator,
    mounted: Cell<bool>,
    stale: Cell<bool>,
    session: RefCell<Session>,
}

pub struct FormController<A: DestinationApi> {
    inner: Rc<Inner<A>>,
}

impl<A: DestinationApi> Clone for FormController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: DestinationApi> FormController<A> {
    /// A destination form using the schema derived from `config`.
    pub fn new(api: A, config: FormConfig) -> Self {
        let schema = Schema::destination(&config);
        Self::with_schema(api, schema, config)
    }

    pub fn with_schema(api: A, schema: Schema, config: FormConfig) -> Self {
        let values = FieldValueStore::new(&schema);
        Self {
            inner: Rc::new(Inner {
                api,
                schema,
                config,
                coordinator: SubmissionCoordinator::new(),
                mounted: Cell::new(true),
                stale: Cell::new(false),
                session: RefCell::new(Session {
                    initialized: false,
                    target: None,
                    mode: SessionMode::Create,
                    values,
                    errors: ValidationErrors::default(),
                    records: Vec::new(),
                }),
            }),
        }
    }

    /// Start the session for the route-supplied identifier (empty for none).
    pub async fn initialize(&self, route_id: &str) -> Result<FormState> {
        if !self.inner.mounted.get() {
            return Err(DestinasiError::Unmounted);
        }
        {
            let mut session = self.inner.session.borrow_mut();
            session.initialized = true;
            session.target = RecordId::from_route(route_id);
        }
        self.reload().await;
        Ok(self.state())
    }

    /// Re-fetch the collection, hydrating again if the route's record is in it.
    pub async fn refresh(&self) -> Result<FormState> {
        self.ensure_live()?;
        self.inner.stale.set(false);
        self.reload().await;
        Ok(self.state())
    }

    /// True after a create when the collection should be re-fetched.
    pub fn needs_refresh(&self) -> bool {
        self.inner.stale.get()
    }

    /// Fetch the collection and hydrate from the matching record, if any.
    async fn reload(&self) {
        let fetched = self.inner.api.fetch_all().await;
        if !self.inner.mounted.get() {
            tracing::debug!("fetch completed after unmount, discarding");
            return;
        }

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load destinations");
                return;
            }
        };

        let mut session = self.inner.session.borrow_mut();
        let found = resolve_record(&records, session.target.as_ref()).cloned();
        session.records = records;
        if let Some(record) = found {
            tracing::debug!(id = %record.id, "hydrating form for edit");
            session.values.hydrate(record.field_values());
            session.mode = SessionMode::Edit(record.id);
        }
    }

    /// Write a field value. Nothing is validated until submit.
    pub fn set_field(&self, name: &str, value: FieldValue) -> Result<()> {
        self.ensure_live()?;
        self.inner.session.borrow_mut().values.set(name, value)
    }

    pub async fn submit(&self) -> Result<SubmitOutcome> {
        self.ensure_live()?;
        if self.inner.coordinator.is_in_flight() {
            tracing::debug!("submit while in flight, ignoring");
            return Ok(SubmitOutcome::Ignored);
        }

        let request = {
            let mut session = self.inner.session.borrow_mut();
            let validated = match validate(&self.inner.schema, &session.values.snapshot()) {
                Ok(validated) => validated,
                Err(errors) => {
                    session.errors = errors.clone();
                    return Ok(SubmitOutcome::Invalid(errors));
                }
            };
            session.errors = ValidationErrors::default();

            let fields = validated.to_destination_payload()?;
            match &session.mode {
                SessionMode::Create => SubmitRequest::Create(fields),
                SessionMode::Edit(id) => SubmitRequest::Update(UpdatePayload {
                    id: id.clone(),
                    fields,
                }),
            }
        };

        let Some(outcome) = self.inner.coordinator.submit(&self.inner.api, request).await else {
            return Ok(SubmitOutcome::Ignored);
        };
        if !self.inner.mounted.get() {
            tracing::debug!("submission completed after unmount, discarding");
            return Ok(SubmitOutcome::Completed(outcome));
        }

        match &outcome {
            SubmissionOutcome::Created(_) => {
                self.inner.session.borrow_mut().values.reset();
                if self.inner.config.refetch_after_create {
                    self.inner.stale.set(true);
                }
            }
            SubmissionOutcome::Updated(_) => {
                let mut session = self.inner.session.borrow_mut();
                session.mode = SessionMode::Create;
                session.values.reset();
            }
            SubmissionOutcome::Failed(_) => {}
        }
        Ok(SubmitOutcome::Completed(outcome))
    }

    /// Tear the session down. Pending completions will not touch state.
    pub fn unmount(&self) {
        self.inner.mounted.set(false);
    }

    fn ensure_live(&self) -> Result<()> {
        if !self.inner.mounted.get() {
            return Err(DestinasiError::Unmounted);
        }
        if !self.inner.session.borrow().initialized {
            return Err(DestinasiError::NotInitialized);
        }
        Ok(())
    }

    pub fn state(&self) -> FormState {
        let session = self.inner.session.borrow();
        if !session.initialized {
            FormState::Initializing
        } else if self.inner.coordinator.is_in_flight() {
            FormState::Submitting(session.mode.clone())
        } else {
            FormState::Ready(session.mode.clone())
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.inner.session.borrow().mode.clone()
    }

    pub fn submit_label(&self) -> &'static str {
        self.inner.session.borrow().mode.submit_label()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.coordinator.is_in_flight()
    }

    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.inner.session.borrow().values.get(name).cloned()
    }

    pub fn values(&self) -> std::collections::BTreeMap<String, FieldValue> {
        self.inner.session.borrow().values.snapshot()
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.inner.session.borrow().values.is_dirty(name)
    }

    /// Error shown next to `name`, from the last validation run.
    pub fn error(&self, name: &str) -> Option<String> {
        self.inner
            .session
            .borrow()
            .errors
            .get(name)
            .map(str::to_string)
    }

    pub fn errors(&self) -> ValidationErrors {
        self.inner.session.borrow().errors.clone()
    }

    /// The most recently fetched collection.
    pub fn records(&self) -> Vec<Destination> {
        self.inner.session.borrow().records.clone()
    }

    /// Field names a UI can register inputs for.
    pub fn field_names(&self) -> Vec<String> {
        self.inner.schema.field_names().map(str::to_string).collect()
    }

    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }
}
