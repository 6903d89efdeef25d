//! User confirmation and notification.
//!
//! The page needs two blocking interactions: a yes/no confirmation before a
//! delete, and an alert when a write fails. [`Prompter`] is the platform
//! capability that provides them.

use std::io::{self, Write};

use tracing::{debug, warn};

/// Blocking confirm/alert capability.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, message: &str) -> bool;

    /// Tell the user something went wrong.
    fn alert(&self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

/// Check if user confirmation input indicates acceptance.
/// Accepts "y" or "yes" (case-insensitive).
#[must_use]
pub fn is_confirmation_accepted(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    normalized == "y" || normalized == "yes"
}

/// Prompts on the controlling terminal.
///
/// Questions go to stdout and are answered on stdin; alerts go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if let Err(err) = io::stdout().flush() {
            warn!(error = %err, "Could not flush prompt");
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                false
            }
            Ok(_) => is_confirmation_accepted(&input),
            Err(err) => {
                warn!(error = %err, "Could not read confirmation");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Answers yes to every confirmation, for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        debug!(prompt = message, "Confirmation skipped");
        true
    }

    fn alert(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
