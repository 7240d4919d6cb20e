pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use config::{Config, DatabaseSettings};
pub use db::{create_pool, init_schema, init_schema_or_log, Repository, StoreError};
pub use domain::{Student, StudentDraft, StudentPayload};
pub use error::AppError;
