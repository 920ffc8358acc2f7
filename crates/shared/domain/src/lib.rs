//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `chrono`).
//! Keep it lean: no I/O or networking, just data and the study-progress rules.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod goals;
pub mod registry;
pub mod repository;
pub mod student;

pub use error::DomainError;
pub use goals::{GoalReview, GoalStatus, StudyGoal};
pub use student::{CourseModule, CourseRecord, Degree, ExamFormat, Program, RecordStatus, Student};
