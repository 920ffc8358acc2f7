//! Facade crate for Study Dashboard features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.

use sdash_database::Database;
pub use sdash_domain as domain;
use sdash_domain::config::ApiConfig;
use sdash_event_bus::EventBus;
pub use sdash_kernel as kernel;
use thiserror::Error;

pub mod server {
    pub mod router {
        pub use sdash_kernel::server::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use sdash_dashboard as dashboard;
    pub use sdash_records as records;

    pub const ENABLED: &[&str] = &["dashboard", "records"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// A feature slice failed to initialize.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Dashboard(#[from] sdash_dashboard::DashboardError),
}

/// Initialize all enabled features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, InitError> {
    let mut slices = Vec::new();

    // Dashboard (read side)
    slices.push(features::dashboard::init(config, database.clone(), events)?);

    // Records (write side)
    slices.push(features::records::init(database.clone(), events.clone()));

    Ok(slices)
}
