//! Interactive student roster.
//!
//! Settings come from `ROSTER_*` environment variables read once at start.

use log::{error, info};
use roster_cli::{render, ConsoleController, ExitReason};
use roster_core::{init_logging, Config, Session, SqliteStudentRepository, StudentService};
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("✗ {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let mut stdout = io::stdout();
    // Nothing useful can be done if the banner cannot be written.
    let _ = render::welcome_banner(&mut stdout);

    let mut session = match Session::connect(&config.connection) {
        Ok(session) => {
            println!("✓ Successfully connected to database");
            session
        }
        Err(err) => {
            println!("✗ Error connecting to database: {err}");
            println!("Failed to connect to database. Please check your connection parameters.");
            return ExitCode::FAILURE;
        }
    };

    let outcome = run_console(&mut session);
    if session.disconnect() {
        println!("✓ Database connection closed");
    }

    match outcome {
        Ok(reason) => {
            info!("event=app_exit module=cli status=ok reason={reason:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("✗ {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_console(session: &mut Session) -> Result<ExitReason, Box<dyn Error>> {
    let repo = SqliteStudentRepository::try_new(session.connection_mut()?)?;
    let mut controller = ConsoleController::new(
        StudentService::new(repo),
        io::stdin().lock(),
        io::stdout().lock(),
    );
    Ok(controller.run()?)
}
