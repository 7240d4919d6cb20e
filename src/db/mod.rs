//! Database module for SQLite operations.
//!
//! This module provides:
//! - Connection pool construction from [`crate::Config`]
//! - Idempotent creation of the `students` table
//! - Repository layer for student records

pub mod migrations;
pub mod pool;
pub mod repo;

pub use migrations::{init_schema, init_schema_or_log};
pub use pool::create_pool;
pub use repo::{Repository, StoreError};
