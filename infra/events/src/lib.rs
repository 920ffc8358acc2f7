//! # Event Bus
//!
//! A type-safe, asynchronous broadcast bus connecting decoupled feature slices.
//!
//! Events are identified by their Rust type; every subscriber of a type gets
//! its own receiver with fan-out semantics. Built on `tokio::sync::broadcast`
//! with a `FxHashMap` + `parking_lot::RwLock` registry.
//!
//! # Example
//!
//! ```rust
//! use sdash_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct GradeRecorded { student_id: i64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<GradeRecorded>()?;
//!     bus.publish(GradeRecorded { student_id: 1 })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.student_id, 1);
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::EventBusError;
pub use receiver::EventReceiverExt;
