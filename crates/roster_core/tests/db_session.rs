use roster_core::db::{open_db, ConnectOptions};
use roster_core::{
    DbError, NewStudent, Session, SessionState, SqliteStudentRepository, StudentRepository,
};
use rusqlite::Connection;

#[test]
fn connect_creates_database_and_students_table() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConnectOptions::new(dir.path().join("nested").join("roster.sqlite3"));

    let mut session = Session::connect(&options).unwrap();
    assert_eq!(session.state(), SessionState::Connected);
    assert_table_exists(session.connection_mut().unwrap(), "students");
    assert!(options.path.exists());
}

#[test]
fn reopening_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConnectOptions::new(dir.path().join("roster.sqlite3"));

    {
        let mut session = Session::connect(&options).unwrap();
        let mut repo =
            SqliteStudentRepository::try_new(session.connection_mut().unwrap()).unwrap();
        repo.insert_student(&NewStudent::new(
            "Ada",
            "Lovelace",
            "ada@x.com",
            roster_core::parse_enrollment_date("2024-01-15").unwrap(),
        ))
        .unwrap();
        session.disconnect();
    }

    let conn = open_db(&options).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn missing_file_without_create_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConnectOptions {
        path: dir.path().join("absent.sqlite3"),
        create_if_missing: false,
    };

    let err = Session::connect(&options).err().unwrap();
    assert!(matches!(err, DbError::Sqlite(_)), "unexpected: {err}");
    assert!(!options.path.exists());
}

#[test]
fn non_database_file_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not a database\n".repeat(128)).unwrap();

    let result = Session::connect(&ConnectOptions::new(path));
    assert!(result.is_err());
}

#[test]
fn disconnected_session_refuses_data_access() {
    let mut session = Session::connect_in_memory().unwrap();
    session.disconnect();

    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(matches!(
        session.connection_mut(),
        Err(DbError::Disconnected)
    ));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
