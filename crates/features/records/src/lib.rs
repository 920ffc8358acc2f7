//! Records feature slice: grade entry for course records.

mod error;
mod handlers;
mod service;

pub use error::RecordsError;
pub use handlers::router;
pub use service::RecordsService;

use sdash_database::{Database, SurrealStudentRepository};
use sdash_domain::registry::{FeatureSlice, InitializedSlice};
use sdash_event_bus::EventBus;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Records feature state.
#[derive(Debug)]
pub struct Records {
    inner: Arc<RecordsInner>,
}

#[derive(Debug)]
pub struct RecordsInner {
    pub service: RecordsService<SurrealStudentRepository>,
}

impl Deref for Records {
    type Target = RecordsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Records {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the records feature.
#[must_use]
pub fn init(db: Database, events: EventBus) -> InitializedSlice {
    let repo = SurrealStudentRepository::new(db);
    let service = RecordsService::new(repo, events);
    let inner = Arc::new(RecordsInner { service });

    tracing::info!("Records slice initialized");
    InitializedSlice::new(Records { inner })
}
