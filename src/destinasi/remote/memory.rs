use super::{DestinationApi, RemoteError, RemoteResult};
use crate::model::{Destination, DestinationPayload, RecordId, UpdatePayload};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Holds calls at an await point until released.
#[derive(Default)]
struct Gate {
    held: RefCell<Option<Rc<Semaphore>>>,
}

impl Gate {
    fn hold(&self) {
        let mut held = self.held.borrow_mut();
        if held.is_none() {
            *held = Some(Rc::new(Semaphore::new(0)));
        }
    }

    fn release(&self) {
        if let Some(sem) = self.held.borrow_mut().take() {
            sem.close();
        }
    }

    async fn pass(&self) {
        let sem = self.held.borrow().clone();
        if let Some(sem) = sem {
            // Closing the semaphore is the release signal.
            let _ = sem.acquire().await;
        }
    }
}

#[derive(Default)]
struct MemState {
    records: RefCell<Vec<Destination>>,
    created: RefCell<Vec<DestinationPayload>>,
    updated: RefCell<Vec<UpdatePayload>>,
    fetch_calls: Cell<usize>,
    fetch_error: RefCell<Option<String>>,
    submit_error: RefCell<Option<String>>,
    fetch_gate: Gate,
    submit_gate: Gate,
}

/// In-process remote collaborator.
///
/// Uses `RefCell` for interior mutability since the form core is
/// single-threaded. Cloning yields another handle to the same state, so a test
/// can keep one handle while the form owns another.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    state: Rc<MemState>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Destination>) -> Self {
        let api = Self::new();
        *api.state.records.borrow_mut() = records;
        api
    }

    /// Seed from a JSON array of records.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let records: Vec<Destination> = serde_json::from_str(json)?;
        Ok(Self::with_records(records))
    }

    pub fn records(&self) -> Vec<Destination> {
        self.state.records.borrow().clone()
    }

    pub fn insert(&self, record: Destination) {
        self.state.records.borrow_mut().push(record);
    }

    /// Make every `fetch_all` fail with `message` until cleared.
    pub fn fail_fetch(&self, message: Option<&str>) {
        *self.state.fetch_error.borrow_mut() = message.map(str::to_string);
    }

    /// Make every `create`/`update` fail with `message` until cleared.
    pub fn fail_submissions(&self, message: Option<&str>) {
        *self.state.submit_error.borrow_mut() = message.map(str::to_string);
    }

    pub fn hold_fetches(&self) {
        self.state.fetch_gate.hold();
    }

    pub fn release_fetches(&self) {
        self.state.fetch_gate.release();
    }

    pub fn hold_submissions(&self) {
        self.state.submit_gate.hold();
    }

    pub fn release_submissions(&self) {
        self.state.submit_gate.release();
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.fetch_calls.get()
    }

    /// Every create payload received, including rejected ones.
    pub fn created(&self) -> Vec<DestinationPayload> {
        self.state.created.borrow().clone()
    }

    /// Every update payload received, including rejected ones.
    pub fn updated(&self) -> Vec<UpdatePayload> {
        self.state.updated.borrow().clone()
    }

    fn submit_error(&self) -> Option<RemoteError> {
        self.state
            .submit_error
            .borrow()
            .as_deref()
            .map(RemoteError::new)
    }
}

fn to_record(id: RecordId, payload: DestinationPayload) -> Destination {
    Destination {
        id,
        destination: payload.destination,
        image: payload.image.handle,
        description: payload.description,
        price: payload.price,
        rating: payload.rating as i64,
    }
}

#[async_trait(?Send)]
impl DestinationApi for InMemoryApi {
    async fn fetch_all(&self) -> RemoteResult<Vec<Destination>> {
        self.state.fetch_calls.set(self.state.fetch_calls.get() + 1);
        self.state.fetch_gate.pass().await;

        if let Some(message) = self.state.fetch_error.borrow().as_deref() {
            return Err(RemoteError::new(message));
        }
        Ok(self.records())
    }

    async fn create(&self, payload: DestinationPayload) -> RemoteResult<Destination> {
        self.state.created.borrow_mut().push(payload.clone());
        self.state.submit_gate.pass().await;

        if let Some(err) = self.submit_error() {
            return Err(err);
        }
        let record = to_record(RecordId::new(Uuid::new_v4().to_string()), payload);
        self.insert(record.clone());
        Ok(record)
    }

    async fn update(&self, payload: UpdatePayload) -> RemoteResult<Destination> {
        self.state.updated.borrow_mut().push(payload.clone());
        self.state.submit_gate.pass().await;

        if let Some(err) = self.submit_error() {
            return Err(err);
        }
        let mut records = self.state.records.borrow_mut();
        let slot = records
            .iter_mut()
            .find(|r| r.id == payload.id)
            .ok_or_else(|| RemoteError::new(format!("Destination not found: {}", payload.id)))?;
        *slot = to_record(payload.id, payload.fields);
        Ok(slot.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::FileRef;

    pub fn destination(id: &str, name: &str) -> Destination {
        Destination {
            id: RecordId::new(id),
            destination: name.to_string(),
            image: format!("https://cdn.example/{}.png", id),
            description: format!("About {}", name),
            price: "Rp. 25.000".to_string(),
            rating: 4,
        }
    }

    pub fn payload(name: &str) -> DestinationPayload {
        DestinationPayload {
            destination: name.to_string(),
            image: FileRef::new(format!("{}.png", name), 1_024, "image/png"),
            description: format!("About {}", name),
            price: "Rp. 10.000".to_string(),
            rating: 3.0,
        }
    }

    pub struct ApiFixture {
        pub api: InMemoryApi,
    }

    impl Default for ApiFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ApiFixture {
        pub fn new() -> Self {
            Self {
                api: InMemoryApi::new(),
            }
        }

        pub fn with_destinations(self, count: usize) -> Self {
            for i in 0..count {
                let id = format!("dest-{}", i + 1);
                self.api
                    .insert(destination(&id, &format!("Destination {}", i + 1)));
            }
            self
        }

        pub fn with_destination(self, id: &str, name: &str) -> Self {
            self.api.insert(destination(id, name));
            self
        }
    }
}
