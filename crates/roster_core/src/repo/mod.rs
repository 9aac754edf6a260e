//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the `students` table.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewStudent::validate()` before persistence.
//! - Repository APIs return semantic outcomes (`NotFound`) in addition to DB
//!   transport errors.

pub mod student_repo;
