//! Domain model for student records.
//!
//! # Responsibility
//! - Define canonical data structures used by store and console layers.
//!
//! # Invariants
//! - Every student is identified by a storage-assigned `StudentId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod student;
