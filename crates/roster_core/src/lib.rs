//! Core domain logic for the student roster.
//! This crate owns the storage contract; the console crate only renders it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Config, ConfigError};
pub use db::{ConnectOptions, DbError, Session, SessionState};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::student::{
    parse_enrollment_date, NewStudent, StudentId, StudentName, StudentRecord,
    StudentValidationError,
};
pub use repo::student_repo::{
    MutationOutcome, RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
pub use service::student_service::{StoreError, StudentService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
