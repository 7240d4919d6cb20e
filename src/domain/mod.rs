//! Domain types for student records.

pub mod student;

pub use student::{Student, StudentDraft, StudentPayload, ValidationError, TIMESTAMP_FORMAT};
