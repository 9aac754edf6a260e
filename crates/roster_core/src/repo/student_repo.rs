//! Student repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/insert/update-email/delete APIs over `students` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every statement is parameterized; user text never reaches SQL text.
//! - Each write runs in its own transaction and is either committed in full
//!   or rolled back when the transaction guard drops.
//! - Update and delete look the row up first and report `NotFound` without
//!   issuing any write.

use crate::db::schema::{STUDENTS_COLUMNS, STUDENTS_TABLE};
use crate::db::DbError;
use crate::model::student::{
    validate_email, NewStudent, StudentId, StudentName, StudentRecord, StudentValidationError,
    ENROLLMENT_DATE_FORMAT,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    student_id,
    first_name,
    last_name,
    email,
    enrollment_date
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    /// Storage rejected the write, e.g. a duplicate email.
    Constraint(String),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Constraint(message) => write!(f, "constraint violated: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, message) = &value {
            if code.code == ErrorCode::ConstraintViolation {
                return Self::Constraint(message.clone().unwrap_or_else(|| code.to_string()));
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of an update or delete keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The row existed and the write was committed.
    Applied(StudentName),
    /// No row has the requested id; nothing was written.
    NotFound,
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Lists every student ordered by `student_id` ascending.
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>>;
    /// Inserts one row and returns the storage-assigned id.
    fn insert_student(&mut self, student: &NewStudent) -> RepoResult<StudentId>;
    /// Replaces the email of one student; no other column changes.
    fn update_email(&mut self, id: StudentId, email: &str) -> RepoResult<MutationOutcome>;
    fn delete_student(&mut self, id: StudentId) -> RepoResult<MutationOutcome>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    ///
    /// # Errors
    /// - Returns `MissingRequiredTable`/`MissingRequiredColumn` when the
    ///   connection does not carry the expected `students` shape.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_student_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY student_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE student_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn insert_student(&mut self, student: &NewStudent) -> RepoResult<StudentId> {
        student.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let student_id: StudentId = tx.query_row(
            "INSERT INTO students (first_name, last_name, email, enrollment_date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING student_id;",
            params![
                student.first_name.as_str(),
                student.last_name.as_str(),
                student.email.as_str(),
                student.enrollment_date,
            ],
            |row| row.get(0),
        )?;
        tx.commit()?;

        Ok(student_id)
    }

    fn update_email(&mut self, id: StudentId, email: &str) -> RepoResult<MutationOutcome> {
        let email = email.trim();
        validate_email(email)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?;
        let Some(name) = find_name(&tx, id)? else {
            return Ok(MutationOutcome::NotFound);
        };

        tx.execute(
            "UPDATE students SET email = ?1 WHERE student_id = ?2;",
            params![email, id],
        )?;
        tx.commit()?;

        Ok(MutationOutcome::Applied(name))
    }

    fn delete_student(&mut self, id: StudentId) -> RepoResult<MutationOutcome> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?;
        let Some(name) = find_name(&tx, id)? else {
            return Ok(MutationOutcome::NotFound);
        };

        tx.execute("DELETE FROM students WHERE student_id = ?1;", [id])?;
        tx.commit()?;

        Ok(MutationOutcome::Applied(name))
    }
}

fn find_name(conn: &Connection, id: StudentId) -> RepoResult<Option<StudentName>> {
    let name = conn
        .query_row(
            "SELECT first_name, last_name FROM students WHERE student_id = ?1;",
            [id],
            |row| {
                Ok(StudentName {
                    first_name: row.get(0)?,
                    last_name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(name)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<StudentRecord> {
    let student_id: StudentId = row.get("student_id")?;
    let date_text: String = row.get("enrollment_date")?;
    let enrollment_date =
        NaiveDate::parse_from_str(&date_text, ENROLLMENT_DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date `{date_text}` in students.enrollment_date for student {student_id}"
            ))
        })?;

    Ok(StudentRecord {
        student_id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        enrollment_date,
    })
}

fn ensure_student_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, STUDENTS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(STUDENTS_TABLE));
    }

    for column in STUDENTS_COLUMNS {
        if !table_has_column(conn, STUDENTS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: STUDENTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
