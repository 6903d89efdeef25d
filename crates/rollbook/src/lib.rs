//! `rollbook` - Manage student attendance records held by a remote service
//!
//! This library provides the API client, the page controller with its
//! observable state, and the text views for the form and the record table.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod ui;

pub use api::{ApiResponse, AttendanceApi, HttpAttendanceApi};
pub use app::{AppController, AppState, DeleteOutcome, Prompter, SubmitOutcome};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{AttendanceRecord, RecordFields, RecordId};
