//! Type-erased registry pieces for the feature slices.
//!
//! Each feature crate exposes an `init` that yields an [`InitializedSlice`];
//! the server collects them into the shared API state, where handlers recover
//! the concrete slice by type.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Shared state of one feature, safe to hand across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Upcast used by the state map to downcast back to the concrete slice.
    fn as_any(&self) -> &dyn Any;
}

/// A feature slice after initialization, keyed by its concrete type.
#[derive(Debug)]
pub struct InitializedSlice {
    id: TypeId,
    state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }

    /// The `TypeId` of the concrete slice this entry holds.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Recovers the concrete slice when `T` matches the stored type.
    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
