//! Interactive attendance page.
//!
//! Reads one command per line, applies it to the controller, and redraws
//! the page.

use std::io::{self, Write};

use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::api::AttendanceApi;
use crate::app::{AppController, AppState, Prompter};
use crate::error::{Error, Result};
use crate::record::parse_assignment;
use crate::ui::render_page;

const HELP: &str = "\
Commands:
  list            reload the records
  edit <id>       load a record into the form
  set <key=value> set a form field
  submit          save the form (create or update)
  cancel          leave edit mode
  delete <id>     delete a record
  help            show this help
  quit            leave the shell
";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Re-fetch the list.
    List,
    /// Select a row for editing.
    Edit(String),
    /// Set a form field.
    Set(String, Value),
    /// Submit the form.
    Submit,
    /// Leave edit mode.
    Cancel,
    /// Delete a row.
    Delete(String),
    /// Print usage.
    Help,
    /// Exit.
    Quit,
}

impl ShellCommand {
    /// Parse a line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, missing ids, or bad `set`
    /// assignments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word {
            "list" | "refresh" => Self::List,
            "edit" => Self::Edit(required_id(word, rest)?),
            "delete" | "rm" => Self::Delete(required_id(word, rest)?),
            "set" => {
                let (key, value) = parse_assignment(rest)?;
                Self::Set(key, value)
            }
            "submit" | "save" => Self::Submit,
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(Error::usage(format!("unknown command '{other}'"))),
        };
        Ok(Some(command))
    }
}

fn required_id(word: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        Err(Error::usage(format!("usage: {word} <id>")))
    } else {
        Ok(rest.to_string())
    }
}

/// Lines typed on stdin, locking stdin only while a line is read.
///
/// The prompter reads confirmations from the same stdin between lines.
pub fn stdin_lines() -> impl Iterator<Item = io::Result<String>> {
    std::iter::from_fn(|| {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    })
}

/// Drive the page from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<A, P, I, W>(
    controller: &mut AppController<A, P>,
    input: I,
    mut output: W,
) -> Result<()>
where
    A: AttendanceApi,
    P: Prompter,
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut changes = controller.subscribe();

    controller.mount().await;
    write!(output, "{}", redraw(controller, &mut changes))?;
    writeln!(output, "Type 'help' for commands.")?;

    for line in input {
        let line = line?;
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                write!(output, "{HELP}")?;
                continue;
            }
            ShellCommand::List => controller.fetch_records().await,
            ShellCommand::Edit(id) => {
                let Some(action) = controller.table().edit(&id) else {
                    writeln!(output, "{}", Error::record_not_found(id))?;
                    continue;
                };
                controller.dispatch(action).await;
            }
            ShellCommand::Delete(id) => {
                let Some(action) = controller.table().delete(&id) else {
                    writeln!(output, "{}", Error::record_not_found(id))?;
                    continue;
                };
                controller.dispatch(action).await;
            }
            ShellCommand::Set(key, value) => controller.form_mut().set_field(key, value),
            ShellCommand::Submit => {
                controller.submit_form().await;
            }
            ShellCommand::Cancel => {
                if controller.state().is_editing() {
                    controller.handle_cancel();
                } else {
                    writeln!(output, "Nothing to cancel.")?;
                    continue;
                }
            }
        }

        write!(output, "\n{}", redraw(controller, &mut changes))?;
    }

    output.flush()?;
    Ok(())
}

/// Render the page from the newest published snapshot.
///
/// Commands that only touch the form publish nothing, so the current state
/// is drawn instead.
fn redraw<A, P>(
    controller: &AppController<A, P>,
    changes: &mut UnboundedReceiver<AppState>,
) -> String
where
    A: AttendanceApi,
    P: Prompter,
{
    let mut latest = None;
    while let Ok(snapshot) = changes.try_recv() {
        debug!(
            loading = snapshot.loading,
            records = snapshot.records.len(),
            editing = snapshot.is_editing(),
            "Page state"
        );
        latest = Some(snapshot);
    }
    match latest {
        Some(snapshot) => render_page(&snapshot, controller.form()),
        None => controller.render(),
    }
}
