//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical `students` row and the insert payload.
//! - Provide write-side validation shared by repository write paths.
//!
//! # Invariants
//! - `student_id` is assigned by storage and never reused for another student.
//! - `first_name` and `last_name` are non-empty after trimming.
//! - `enrollment_date` carries no time or timezone component.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned primary key of a student row.
pub type StudentId = i64;

/// Canonical text format for enrollment dates.
pub const ENROLLMENT_DATE_FORMAT: &str = "%Y-%m-%d";

static ENROLLMENT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid enrollment date regex"));

/// Validation failures for student payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// A required text field is empty after trimming.
    EmptyField(&'static str),
    /// Enrollment date text is not a `YYYY-MM-DD` calendar date.
    InvalidEnrollmentDate(String),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::InvalidEnrollmentDate(value) => {
                write!(f, "invalid enrollment date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for StudentValidationError {}

/// One row of the `students` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Serialized as `YYYY-MM-DD`.
    pub enrollment_date: NaiveDate,
}

impl StudentRecord {
    /// Returns the display name used in confirmation messages.
    pub fn name(&self) -> StudentName {
        StudentName {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Insert payload; `student_id` is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: NaiveDate,
}

impl NewStudent {
    /// Builds a payload from trimmed field values.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            enrollment_date,
        }
    }

    /// Checks business rules enforced before any SQL mutation.
    ///
    /// Email uniqueness is left to storage.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        require_non_empty("first_name", &self.first_name)?;
        require_non_empty("last_name", &self.last_name)?;
        validate_email(&self.email)
    }
}

/// First and last name pair returned by update/delete outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentName {
    pub first_name: String,
    pub last_name: String,
}

impl Display for StudentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Validates an email value before it reaches storage.
pub fn validate_email(email: &str) -> Result<(), StudentValidationError> {
    require_non_empty("email", email)
}

/// Parses strict `YYYY-MM-DD` text into a calendar date.
///
/// Rejects unpadded forms such as `2024-1-5` and impossible dates such as
/// `2024-02-30`.
pub fn parse_enrollment_date(value: &str) -> Result<NaiveDate, StudentValidationError> {
    let trimmed = value.trim();
    if !ENROLLMENT_DATE_RE.is_match(trimmed) {
        return Err(StudentValidationError::InvalidEnrollmentDate(
            trimmed.to_string(),
        ));
    }
    NaiveDate::parse_from_str(trimmed, ENROLLMENT_DATE_FORMAT)
        .map_err(|_| StudentValidationError::InvalidEnrollmentDate(trimmed.to_string()))
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), StudentValidationError> {
    if value.trim().is_empty() {
        return Err(StudentValidationError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_enrollment_date, NewStudent, StudentValidationError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_enrollment_date_accepts_canonical_dates() {
        assert_eq!(
            parse_enrollment_date(" 2024-01-15 ").unwrap(),
            date(2024, 1, 15)
        );
        assert_eq!(parse_enrollment_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn parse_enrollment_date_rejects_loose_and_impossible_values() {
        for value in ["2024-1-5", "15/01/2024", "2023-02-29", "2024-13-01", "", "soon"] {
            assert!(
                matches!(
                    parse_enrollment_date(value),
                    Err(StudentValidationError::InvalidEnrollmentDate(_))
                ),
                "`{value}` should be rejected"
            );
        }
    }

    #[test]
    fn new_student_trims_fields() {
        let student = NewStudent::new("  Ada ", "Lovelace ", " ada@x.com", date(2024, 1, 15));
        assert_eq!(student.first_name, "Ada");
        assert_eq!(student.last_name, "Lovelace");
        assert_eq!(student.email, "ada@x.com");
    }

    #[test]
    fn validate_rejects_empty_names_and_email() {
        let blank_first = NewStudent::new(" ", "Lovelace", "ada@x.com", date(2024, 1, 15));
        assert_eq!(
            blank_first.validate(),
            Err(StudentValidationError::EmptyField("first_name"))
        );

        let blank_email = NewStudent::new("Ada", "Lovelace", "", date(2024, 1, 15));
        assert_eq!(
            blank_email.validate(),
            Err(StudentValidationError::EmptyField("email"))
        );
    }
}
