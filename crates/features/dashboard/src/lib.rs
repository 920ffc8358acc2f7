//! Dashboard feature slice: the read side of the study dashboard.

mod error;
mod handlers;
mod service;
pub mod views;

pub use error::DashboardError;
pub use handlers::router;
pub use service::DashboardService;

use sdash_database::{Database, SurrealStudentRepository};
use sdash_domain::config::ApiConfig;
use sdash_domain::events::GradeRecorded;
use sdash_domain::registry::{FeatureSlice, InitializedSlice};
use sdash_event_bus::{EventBus, EventReceiverExt};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Dashboard feature state.
#[derive(Debug)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

#[derive(Debug)]
pub struct DashboardInner {
    pub service: DashboardService<SurrealStudentRepository>,
}

impl Deref for Dashboard {
    type Target = DashboardInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Dashboard {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the dashboard feature.
///
/// Subscribes to [`GradeRecorded`] events so cached views are dropped as soon
/// as a grade lands.
///
/// # Errors
/// Returns an error if the event subscription cannot be created.
pub fn init(
    config: &ApiConfig,
    db: Database,
    events: &EventBus,
) -> Result<InitializedSlice, DashboardError> {
    let repo = SurrealStudentRepository::new(db);
    let service = DashboardService::new(repo, &config.dashboard);
    let inner = Arc::new(DashboardInner { service });

    let mut receiver = events.subscribe::<GradeRecorded>()?;
    let listener = Arc::clone(&inner);
    tokio::spawn(async move {
        while let Some(event) = receiver.recv_event().await {
            listener.service.invalidate(event.student_id).await;
        }
    });

    tracing::info!("Dashboard slice initialized");
    Ok(InitializedSlice::new(Dashboard { inner }))
}
