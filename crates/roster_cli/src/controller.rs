//! Interactive menu loop.
//!
//! # Responsibility
//! - Present the five-choice menu and collect field input.
//! - Validate input syntax before any store call.
//! - Render store outcomes as status lines.
//!
//! # Invariants
//! - Store failures are reported and the loop continues.
//! - End of input at any prompt ends the loop without further store calls.
//! - A delete is only sent to the store after the literal `yes` answer.

use crate::input::{is_confirmed, parse_date, parse_student_id};
use crate::render;
use log::debug;
use roster_core::{MutationOutcome, NewStudent, StudentId, StudentRepository, StudentService};
use std::io::{self, BufRead, Write};

/// Why the menu loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    ExitChosen,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ViewAll,
    Add,
    UpdateEmail,
    Delete,
    Exit,
}

impl MenuChoice {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(Self::ViewAll),
            "2" => Some(Self::Add),
            "3" => Some(Self::UpdateEmail),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Exit(ExitReason),
}

impl Flow {
    const END_OF_INPUT: Self = Self::Exit(ExitReason::EndOfInput);
}

/// Console front end over a student store.
pub struct ConsoleController<R: StudentRepository, I: BufRead, W: Write> {
    service: StudentService<R>,
    input: I,
    output: W,
}

impl<R: StudentRepository, I: BufRead, W: Write> ConsoleController<R, I, W> {
    pub fn new(service: StudentService<R>, input: I, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    pub fn service(&self) -> &StudentService<R> {
        &self.service
    }

    /// Runs the menu until the operator exits or input ends.
    ///
    /// # Errors
    /// - Returns I/O errors from the input or output stream; store errors
    ///   never escape this loop.
    pub fn run(&mut self) -> io::Result<ExitReason> {
        loop {
            render::menu(&mut self.output)?;
            let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
                return Ok(ExitReason::EndOfInput);
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(choice) => {
                    debug!("event=menu_choice module=console choice={choice:?}");
                    self.dispatch(choice)?
                }
                None => {
                    writeln!(
                        self.output,
                        "✗ Invalid choice. Please enter a number between 1 and 5."
                    )?;
                    Flow::Continue
                }
            };

            if let Flow::Exit(reason) = flow {
                return Ok(reason);
            }
            if self.prompt("\nPress Enter to continue...")?.is_none() {
                return Ok(ExitReason::EndOfInput);
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::ViewAll => self.view_all(),
            MenuChoice::Add => self.add_student(),
            MenuChoice::UpdateEmail => self.update_email(),
            MenuChoice::Delete => self.delete_student(),
            MenuChoice::Exit => {
                writeln!(
                    self.output,
                    "\nThank you for using Student Management System!"
                )?;
                Ok(Flow::Exit(ExitReason::ExitChosen))
            }
        }
    }

    fn view_all(&mut self) -> io::Result<Flow> {
        match self.service.list_all() {
            Ok(students) => render::student_table(&mut self.output, &students)?,
            Err(err) => writeln!(self.output, "✗ {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_student(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- Add New Student ---")?;
        let Some(first_name) = self.prompt("Enter first name: ")? else {
            return Ok(Flow::END_OF_INPUT);
        };
        let Some(last_name) = self.prompt("Enter last name: ")? else {
            return Ok(Flow::END_OF_INPUT);
        };
        let Some(email) = self.prompt("Enter email: ")? else {
            return Ok(Flow::END_OF_INPUT);
        };
        let Some(date_text) = self.prompt("Enter enrollment date (YYYY-MM-DD): ")? else {
            return Ok(Flow::END_OF_INPUT);
        };

        let enrollment_date = match parse_date(&date_text) {
            Ok(date) => date,
            Err(err) => {
                writeln!(self.output, "✗ {err}")?;
                return Ok(Flow::Continue);
            }
        };

        let student = NewStudent::new(first_name, last_name, email, enrollment_date);
        match self.service.insert(&student) {
            Ok(student_id) => writeln!(
                self.output,
                "✓ Successfully added student: {} {} (ID: {student_id})",
                student.first_name, student.last_name
            )?,
            Err(err) => writeln!(self.output, "✗ {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn update_email(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- Update Student Email ---")?;
        let Some(id_text) = self.prompt("Enter student ID: ")? else {
            return Ok(Flow::END_OF_INPUT);
        };
        let student_id = match parse_student_id(&id_text) {
            Ok(id) => id,
            Err(err) => {
                writeln!(self.output, "✗ {err}")?;
                return Ok(Flow::Continue);
            }
        };
        let Some(new_email) = self.prompt("Enter new email: ")? else {
            return Ok(Flow::END_OF_INPUT);
        };

        match self.service.update_email(student_id, &new_email) {
            Ok(MutationOutcome::Applied(name)) => {
                writeln!(
                    self.output,
                    "✓ Successfully updated email for {name} (ID: {student_id})"
                )?;
                writeln!(self.output, "  New email: {new_email}")?;
            }
            Ok(MutationOutcome::NotFound) => self.report_not_found(student_id)?,
            Err(err) => writeln!(self.output, "✗ {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn delete_student(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- Delete Student ---")?;
        let Some(id_text) = self.prompt("Enter student ID to delete: ")? else {
            return Ok(Flow::END_OF_INPUT);
        };
        let student_id = match parse_student_id(&id_text) {
            Ok(id) => id,
            Err(err) => {
                writeln!(self.output, "✗ {err}")?;
                return Ok(Flow::Continue);
            }
        };
        let Some(answer) = self.prompt(&format!(
            "Are you sure you want to delete student {student_id}? (yes/no): "
        ))?
        else {
            return Ok(Flow::END_OF_INPUT);
        };

        if !is_confirmed(&answer) {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(Flow::Continue);
        }

        match self.service.delete(student_id) {
            Ok(MutationOutcome::Applied(name)) => writeln!(
                self.output,
                "✓ Successfully deleted student: {name} (ID: {student_id})"
            )?,
            Ok(MutationOutcome::NotFound) => self.report_not_found(student_id)?,
            Err(err) => writeln!(self.output, "✗ {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn report_not_found(&mut self, student_id: StudentId) -> io::Result<()> {
        writeln!(self.output, "✗ Student with ID {student_id} not found")
    }

    /// Writes `label`, then reads one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
