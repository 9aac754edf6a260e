//! Student record store service.
//!
//! # Responsibility
//! - Provide the four store operations the console calls.
//! - Tag repository failures with the operation that produced them.
//! - Emit metadata-only diagnostic events for every operation.
//!
//! # Invariants
//! - An empty table is `Ok(vec![])`; a failed read is `Err(StoreError::Query)`.
//! - A missing id is `Ok(MutationOutcome::NotFound)`, never an error.
//! - Log lines carry ids, counts and durations only, never names or emails.

use crate::model::student::{NewStudent, StudentId, StudentRecord};
use crate::repo::student_repo::{MutationOutcome, RepoError, StudentRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Store-level failure tagged by the operation that raised it.
#[derive(Debug)]
pub enum StoreError {
    Query(RepoError),
    Insert(RepoError),
    Update(RepoError),
    Delete(RepoError),
}

impl StoreError {
    /// Returns the underlying repository error.
    pub fn repo_error(&self) -> &RepoError {
        match self {
            Self::Query(err) | Self::Insert(err) | Self::Update(err) | Self::Delete(err) => err,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "Error retrieving students: {err}"),
            Self::Insert(err) => write!(f, "Error adding student: {err}"),
            Self::Update(err) => write!(f, "Error updating student email: {err}"),
            Self::Delete(err) => write!(f, "Error deleting student: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.repo_error())
    }
}

/// Use-case service over a student repository.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all students ordered by id.
    pub fn list_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let started_at = Instant::now();
        match self.repo.list_students() {
            Ok(students) => {
                info!(
                    "event=student_list module=service status=ok count={} duration_ms={}",
                    students.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(students)
            }
            Err(err) => {
                warn!(
                    "event=student_list module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    error_code(&err)
                );
                Err(StoreError::Query(err))
            }
        }
    }

    /// Inserts one student and returns the assigned id.
    pub fn insert(&mut self, student: &NewStudent) -> Result<StudentId, StoreError> {
        let started_at = Instant::now();
        match self.repo.insert_student(student) {
            Ok(student_id) => {
                info!(
                    "event=student_insert module=service status=ok student_id={} duration_ms={}",
                    student_id,
                    started_at.elapsed().as_millis()
                );
                Ok(student_id)
            }
            Err(err) => {
                warn!(
                    "event=student_insert module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    error_code(&err)
                );
                Err(StoreError::Insert(err))
            }
        }
    }

    /// Replaces the email of the student with `id`.
    pub fn update_email(
        &mut self,
        id: StudentId,
        email: &str,
    ) -> Result<MutationOutcome, StoreError> {
        let started_at = Instant::now();
        let result = self.repo.update_email(id, email);
        log_mutation("student_update_email", id, started_at, &result);
        result.map_err(StoreError::Update)
    }

    /// Deletes the student with `id`.
    pub fn delete(&mut self, id: StudentId) -> Result<MutationOutcome, StoreError> {
        let started_at = Instant::now();
        let result = self.repo.delete_student(id);
        log_mutation("student_delete", id, started_at, &result);
        result.map_err(StoreError::Delete)
    }

    /// Gets one student by id.
    pub fn get(&self, id: StudentId) -> Result<Option<StudentRecord>, StoreError> {
        self.repo.get_student(id).map_err(StoreError::Query)
    }
}

fn log_mutation(
    event: &str,
    id: StudentId,
    started_at: Instant,
    result: &Result<MutationOutcome, RepoError>,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(MutationOutcome::Applied(_)) => info!(
            "event={event} module=service status=ok student_id={id} duration_ms={duration_ms}"
        ),
        Ok(MutationOutcome::NotFound) => info!(
            "event={event} module=service status=not_found student_id={id} duration_ms={duration_ms}"
        ),
        Err(err) => warn!(
            "event={event} module=service status=error student_id={id} duration_ms={duration_ms} error={}",
            error_code(err)
        ),
    }
}

// Stable, content-free codes so log lines never echo user input.
fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::Db(_) => "db_error",
        RepoError::Constraint(_) => "constraint_violation",
        RepoError::InvalidData(_) => "invalid_data",
        RepoError::MissingRequiredTable(_) | RepoError::MissingRequiredColumn { .. } => {
            "schema_mismatch"
        }
    }
}
