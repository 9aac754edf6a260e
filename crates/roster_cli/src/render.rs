//! Console text layout.

use roster_core::StudentRecord;
use std::io::{self, Write};

const TABLE_WIDTH: usize = 80;
const MENU_WIDTH: usize = 50;
pub const APP_TITLE: &str = "STUDENT MANAGEMENT SYSTEM";

pub fn welcome_banner(out: &mut impl Write) -> io::Result<()> {
    let rule = "=".repeat(MENU_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "Welcome to Student Management System")?;
    writeln!(out, "{rule}")
}

pub fn menu(out: &mut impl Write) -> io::Result<()> {
    let rule = "=".repeat(MENU_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{APP_TITLE}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "1. View All Students")?;
    writeln!(out, "2. Add New Student")?;
    writeln!(out, "3. Update Student Email")?;
    writeln!(out, "4. Delete Student")?;
    writeln!(out, "5. Exit")?;
    writeln!(out, "{rule}")
}

/// Writes the student table with a trailing count, or an empty notice.
pub fn student_table(out: &mut impl Write, students: &[StudentRecord]) -> io::Result<()> {
    let rule = "=".repeat(TABLE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "ALL STUDENTS")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<5} {:<15} {:<15} {:<30} {:<15}",
        "ID", "First Name", "Last Name", "Email", "Enrollment Date"
    )?;
    writeln!(out, "{}", "-".repeat(TABLE_WIDTH))?;

    if students.is_empty() {
        writeln!(out, "No students found in the database.")?;
    } else {
        for student in students {
            writeln!(
                out,
                "{:<5} {:<15} {:<15} {:<30} {}",
                student.student_id,
                student.first_name,
                student.last_name,
                student.email,
                student.enrollment_date.format("%Y-%m-%d")
            )?;
        }
        writeln!(out, "\nTotal students: {}", students.len())?;
    }

    writeln!(out, "{rule}\n")
}
