//! Console front end for the student roster.
//!
//! `main` wires configuration, logging and the session; everything the
//! operator sees is produced by [`controller::ConsoleController`].

pub mod controller;
pub mod input;
pub mod render;

pub use controller::{ConsoleController, ExitReason};
