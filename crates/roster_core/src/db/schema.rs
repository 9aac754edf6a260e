//! `students` table bootstrap.
//!
//! The DDL is idempotent and applied on every open. There is no version
//! tracking; the table shape is fixed.

use super::DbResult;
use rusqlite::Connection;

/// Table holding all student rows.
pub const STUDENTS_TABLE: &str = "students";

/// Columns every repository read and write depends on.
pub const STUDENTS_COLUMNS: [&str; 5] = [
    "student_id",
    "first_name",
    "last_name",
    "email",
    "enrollment_date",
];

const STUDENTS_DDL: &str = include_str!("students.sql");

/// Creates the `students` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(STUDENTS_DDL)?;
    Ok(())
}
