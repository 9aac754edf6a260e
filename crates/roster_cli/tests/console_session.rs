use roster_cli::{ConsoleController, ExitReason};
use roster_core::db::ConnectOptions;
use roster_core::{
    NewStudent, Session, SqliteStudentRepository, StudentRecord, StudentRepository, StudentService,
};
use std::io::Cursor;

struct Transcript {
    reason: ExitReason,
    output: String,
    students: Vec<StudentRecord>,
}

fn run_script(session: &mut Session, script: &str) -> Transcript {
    let repo = SqliteStudentRepository::try_new(session.connection_mut().unwrap()).unwrap();
    let mut output = Vec::new();
    let mut controller = ConsoleController::new(
        StudentService::new(repo),
        Cursor::new(script.to_string()),
        &mut output,
    );

    let reason = controller.run().unwrap();
    let students = controller.service().list_all().unwrap();
    drop(controller);

    Transcript {
        reason,
        output: String::from_utf8(output).unwrap(),
        students,
    }
}

fn seed(session: &mut Session, first: &str, last: &str, email: &str) -> i64 {
    let mut repo = SqliteStudentRepository::try_new(session.connection_mut().unwrap()).unwrap();
    repo.insert_student(&NewStudent::new(
        first,
        last,
        email,
        roster_core::parse_enrollment_date("2024-01-15").unwrap(),
    ))
    .unwrap()
}

#[test]
fn add_then_view_shows_the_new_row() {
    let mut session = Session::connect_in_memory().unwrap();

    let transcript = run_script(
        &mut session,
        "2\nAda\nLovelace\nada@x.com\n2024-01-15\n\n1\n\n5\n",
    );

    assert_eq!(transcript.reason, ExitReason::ExitChosen);
    assert_eq!(transcript.students.len(), 1);
    let id = transcript.students[0].student_id;
    assert!(transcript
        .output
        .contains(&format!("✓ Successfully added student: Ada Lovelace (ID: {id})")));
    assert!(transcript.output.contains("Total students: 1"));
    assert!(transcript
        .output
        .contains("Thank you for using Student Management System!"));
}

#[test]
fn bad_date_never_reaches_the_store() {
    let mut session = Session::connect_in_memory().unwrap();

    let transcript = run_script(
        &mut session,
        "2\nAda\nLovelace\nada@x.com\n15/01/2024\n\n5\n",
    );

    assert!(transcript
        .output
        .contains("✗ Invalid date format. Please use YYYY-MM-DD"));
    assert!(transcript.students.is_empty());
}

#[test]
fn duplicate_email_is_reported_and_loop_continues() {
    let mut session = Session::connect_in_memory().unwrap();
    seed(&mut session, "Ada", "Lovelace", "ada@x.com");

    let transcript = run_script(
        &mut session,
        "2\nAugusta\nKing\nada@x.com\n2025-02-01\n\n1\n\n5\n",
    );

    assert!(transcript.output.contains("✗ Error adding student:"));
    assert!(transcript.output.contains("Total students: 1"));
    assert_eq!(transcript.reason, ExitReason::ExitChosen);
    assert_eq!(transcript.students[0].first_name, "Ada");
}

#[test]
fn update_email_reports_new_address() {
    let mut session = Session::connect_in_memory().unwrap();
    let id = seed(&mut session, "Ada", "Lovelace", "ada@x.com");

    let transcript = run_script(&mut session, &format!("3\n{id}\ncountess@x.com\n\n5\n"));

    assert!(transcript.output.contains(&format!(
        "✓ Successfully updated email for Ada Lovelace (ID: {id})"
    )));
    assert!(transcript.output.contains("  New email: countess@x.com"));
    assert_eq!(transcript.students[0].email, "countess@x.com");
}

#[test]
fn update_with_non_numeric_id_skips_email_prompt() {
    let mut session = Session::connect_in_memory().unwrap();
    seed(&mut session, "Ada", "Lovelace", "ada@x.com");

    let transcript = run_script(&mut session, "3\nabc\n\n5\n");

    assert!(transcript
        .output
        .contains("✗ Invalid student ID. Please enter a number."));
    assert!(!transcript.output.contains("Enter new email:"));
    assert_eq!(transcript.students[0].email, "ada@x.com");
}

#[test]
fn missing_ids_are_reported_as_not_found() {
    let mut session = Session::connect_in_memory().unwrap();
    seed(&mut session, "Ada", "Lovelace", "ada@x.com");

    let transcript = run_script(&mut session, "3\n404\nghost@x.com\n\n4\n404\nyes\n\n5\n");

    assert_eq!(
        transcript
            .output
            .matches("✗ Student with ID 404 not found")
            .count(),
        2
    );
    assert_eq!(transcript.students.len(), 1);
    assert_eq!(transcript.students[0].email, "ada@x.com");
}

#[test]
fn delete_requires_literal_yes() {
    let mut session = Session::connect_in_memory().unwrap();
    let id = seed(&mut session, "Ada", "Lovelace", "ada@x.com");

    for answer in ["y", "", "no", "YES"] {
        let transcript = run_script(&mut session, &format!("4\n{id}\n{answer}\n\n5\n"));
        assert!(
            transcript.output.contains("Deletion cancelled."),
            "`{answer}` should cancel"
        );
        assert_eq!(transcript.students.len(), 1);
    }

    let transcript = run_script(&mut session, &format!("4\n{id}\nyes\n\n5\n"));
    assert!(transcript.output.contains(&format!(
        "✓ Successfully deleted student: Ada Lovelace (ID: {id})"
    )));
    assert!(transcript.students.is_empty());
}

#[test]
fn invalid_choice_is_reported_without_side_effects() {
    let mut session = Session::connect_in_memory().unwrap();
    seed(&mut session, "Ada", "Lovelace", "ada@x.com");

    let transcript = run_script(&mut session, "9\n\nhello\n\n5\n");

    assert_eq!(
        transcript
            .output
            .matches("✗ Invalid choice. Please enter a number between 1 and 5.")
            .count(),
        2
    );
    assert_eq!(transcript.students.len(), 1);
}

#[test]
fn end_of_input_terminates_mid_prompt() {
    let mut session = Session::connect_in_memory().unwrap();

    let transcript = run_script(&mut session, "2\nAda\nLovelace\n");

    assert_eq!(transcript.reason, ExitReason::EndOfInput);
    assert!(transcript.students.is_empty());
}

#[test]
fn empty_table_is_not_an_error() {
    let mut session = Session::connect_in_memory().unwrap();

    let transcript = run_script(&mut session, "1\n");

    assert_eq!(transcript.reason, ExitReason::EndOfInput);
    assert!(transcript
        .output
        .contains("No students found in the database."));
    assert!(!transcript.output.contains("✗"));
}

#[test]
fn rows_persist_across_sessions_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConnectOptions::new(dir.path().join("roster.sqlite3"));

    {
        let mut session = Session::connect(&options).unwrap();
        run_script(
            &mut session,
            "2\nGrace\nHopper\ngrace@x.com\n2023-09-01\n\n5\n",
        );
    }

    let mut session = Session::connect(&options).unwrap();
    let transcript = run_script(&mut session, "1\n\n5\n");
    assert!(transcript.output.contains("grace@x.com"));
    assert_eq!(transcript.students.len(), 1);
}
