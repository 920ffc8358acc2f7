use std::borrow::Cow;
use thiserror::Error;

/// Errors that can occur during event bus operations.
#[derive(Debug, Error)]
pub enum EventBusError {
    /// Occurs when an internal dynamic cast fails.
    /// This usually indicates an invariant violation in the type registry.
    #[error("type mismatch for event {0}")]
    TypeMismatch(Cow<'static, str>),

    /// Capacity must be greater than zero for bounded channels.
    #[error("invalid channel capacity: {0}")]
    InvalidCapacity(usize),
}
