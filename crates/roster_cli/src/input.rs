//! Syntactic validation of console input.
//!
//! Business rules (non-empty names, unique email) belong to the store; this
//! module only checks shape before any store call.

use chrono::NaiveDate;
use roster_core::{parse_enrollment_date, StudentId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Literal answer that confirms a delete.
pub const CONFIRM_ANSWER: &str = "yes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    InvalidDate(String),
    InvalidStudentId(String),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(_) => write!(f, "Invalid date format. Please use YYYY-MM-DD"),
            Self::InvalidStudentId(_) => write!(f, "Invalid student ID. Please enter a number."),
        }
    }
}

impl Error for InputError {}

/// Parses a student id typed by the operator.
pub fn parse_student_id(value: &str) -> Result<StudentId, InputError> {
    value
        .trim()
        .parse::<StudentId>()
        .map_err(|_| InputError::InvalidStudentId(value.trim().to_string()))
}

/// Parses an enrollment date in strict `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    parse_enrollment_date(value).map_err(|_| InputError::InvalidDate(value.trim().to_string()))
}

/// Returns `true` only for the literal confirmation answer.
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim() == CONFIRM_ANSWER
}

#[cfg(test)]
mod tests {
    use super::{is_confirmed, parse_date, parse_student_id, InputError};

    #[test]
    fn parse_student_id_accepts_integers_only() {
        assert_eq!(parse_student_id(" 42 "), Ok(42));
        assert_eq!(parse_student_id("-3"), Ok(-3));
        for value in ["", "abc", "4.2", "12a"] {
            assert!(matches!(
                parse_student_id(value),
                Err(InputError::InvalidStudentId(_))
            ));
        }
    }

    #[test]
    fn parse_date_reports_format_error() {
        let err = parse_date("01/15/2024").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Please use YYYY-MM-DD");
        assert!(parse_date("2024-01-15").is_ok());
    }

    #[test]
    fn only_literal_yes_confirms() {
        assert!(is_confirmed("yes"));
        assert!(is_confirmed("  yes\n"));
        for answer in ["y", "", "no", "YES", "yes please"] {
            assert!(!is_confirmed(answer), "`{answer}` must not confirm");
        }
    }
}
