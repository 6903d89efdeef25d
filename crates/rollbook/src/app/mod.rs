//! Page controller.
//!
//! [`AppController`] owns the record list and the editing selection (in a
//! [`Store`]), the form's field state, the API client, and the prompter. It
//! never patches the list locally: every successful write is followed by a
//! full re-fetch.

pub mod prompt;
pub mod store;

pub use prompt::{AutoConfirm, Prompter, TerminalPrompter};
pub use store::{AppState, Store};

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::AttendanceApi;
use crate::record::{AttendanceRecord, RecordId};
use crate::ui::{render_page, AttendanceForm, AttendanceTable, TableAction};

/// Banner text when the list cannot be fetched.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch attendance records";

/// Alert text when a delete fails.
pub const DELETE_ERROR_MESSAGE: &str = "Failed to delete record";

/// Alert text when a form submission fails.
pub const SAVE_ERROR_MESSAGE: &str = "Failed to save record";

/// Question asked before every delete.
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this record?";

/// Result of [`AppController::handle_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    /// The record was deleted and the list refreshed.
    Deleted,
    /// The service refused or could not be reached; the user was alerted.
    Failed,
}

/// Result of [`AppController::submit_form`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The record was saved and the list refreshed.
    Saved(AttendanceRecord),
    /// The save failed; the user was alerted and the form kept its values.
    Failed,
}

/// Clears `loading` when dropped, however the fetch ends.
struct LoadingGuard<'a> {
    store: &'a mut Store,
}

impl<'a> LoadingGuard<'a> {
    fn begin(store: &'a mut Store) -> Self {
        store.update(|s| s.loading = true);
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.update(|s| s.loading = false);
    }
}

/// Orchestrates the attendance page.
#[derive(Debug)]
pub struct AppController<A, P> {
    api: A,
    prompter: P,
    store: Store,
    form: AttendanceForm,
    mounted: bool,
}

impl<A, P> AppController<A, P>
where
    A: AttendanceApi,
    P: Prompter,
{
    /// Create a controller. Nothing is fetched until [`mount`](Self::mount).
    #[must_use]
    pub fn new(api: A, prompter: P, form: AttendanceForm) -> Self {
        Self {
            api,
            prompter,
            store: Store::new(),
            form,
            mounted: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<AppState> {
        self.store.subscribe()
    }

    /// The form.
    #[must_use]
    pub fn form(&self) -> &AttendanceForm {
        &self.form
    }

    /// The form, for filling in fields.
    pub fn form_mut(&mut self) -> &mut AttendanceForm {
        &mut self.form
    }

    /// Table over the current records.
    #[must_use]
    pub fn table(&self) -> AttendanceTable<'_> {
        AttendanceTable::new(&self.store.state().records)
    }

    /// Render the full page from the current state.
    #[must_use]
    pub fn render(&self) -> String {
        render_page(self.store.state(), &self.form)
    }

    /// First-render hook: fetch the list exactly once.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.fetch_records().await;
    }

    /// Replace the record list with a fresh fetch.
    ///
    /// On failure the previous records stay and the banner is set.
    pub async fn fetch_records(&mut self) {
        let guard = LoadingGuard::begin(&mut self.store);
        match self.api.get_all().await {
            Ok(response) => {
                info!(count = response.data.len(), "Attendance records loaded");
                guard.store.update(|s| {
                    s.records = response.data;
                    s.error = None;
                });
            }
            Err(err) => {
                error!(error = %err, "Error fetching records");
                guard
                    .store
                    .update(|s| s.error = Some(FETCH_ERROR_MESSAGE.to_string()));
            }
        }
    }

    /// Callback for a successful form submission.
    pub async fn handle_form_submit(&mut self) {
        self.store.update(|s| s.editing = None);
        self.fetch_records().await;
    }

    /// Submit the form against the current editing selection.
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let editing = self.store.state().editing.clone();
        match self.form.submit(&self.api, editing.as_ref()).await {
            Ok(saved) => {
                self.handle_form_submit().await;
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                error!(error = %err, "Error saving record");
                self.prompter.alert(SAVE_ERROR_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    /// Load a record into the form for editing.
    pub fn handle_edit(&mut self, record: AttendanceRecord) {
        self.form.load(Some(&record));
        self.store.update(|s| s.editing = Some(record));
    }

    /// Delete a record after the user confirms.
    pub async fn handle_delete(&mut self, id: &RecordId) -> DeleteOutcome {
        if !self.prompter.confirm(CONFIRM_DELETE_MESSAGE) {
            info!(%id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        match self.api.delete(id).await {
            Ok(_) => {
                info!(%id, "Attendance record deleted");
                self.fetch_records().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!(%id, error = %err, "Error deleting record");
                self.prompter.alert(DELETE_ERROR_MESSAGE);
                DeleteOutcome::Failed
            }
        }
    }

    /// Leave edit mode without saving.
    pub fn handle_cancel(&mut self) {
        self.form.reset();
        self.store.update(|s| s.editing = None);
    }

    /// Route a table row action.
    ///
    /// Returns the delete outcome for [`TableAction::Delete`], `None` for edits.
    pub async fn dispatch(&mut self, action: TableAction) -> Option<DeleteOutcome> {
        match action {
            TableAction::Edit(record) => {
                self.handle_edit(record);
                None
            }
            TableAction::Delete(id) => Some(self.handle_delete(&id).await),
        }
    }
}
