//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it provides config loading, the shared API
//! state, and the system router every deployment mounts.

pub mod config;
pub mod server;

pub use sdash_domain as domain;
