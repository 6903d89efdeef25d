//! Observable application state.
//!
//! The [`Store`] is the single owner of [`AppState`]. Every mutation goes
//! through [`Store::update`], which pushes a full snapshot to each
//! subscriber.

use tokio::sync::mpsc;
use tracing::trace;

use crate::record::AttendanceRecord;

/// Everything the page renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Snapshot of the last successful fetch.
    pub records: Vec<AttendanceRecord>,
    /// Record currently loaded into the form, if any.
    pub editing: Option<AttendanceRecord>,
    /// Whether a list fetch is in flight.
    pub loading: bool,
    /// Banner message from the last failed fetch.
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        // Nothing has been fetched yet, so the page starts out loading
        Self {
            records: Vec::new(),
            editing: None,
            loading: true,
            error: None,
        }
    }
}

impl AppState {
    /// Whether the form is in edit mode.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// State container with a subscribe/notify contract.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    subscribers: Vec<mpsc::UnboundedSender<AppState>>,
}

impl Store {
    /// Create a store holding the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Receive a snapshot after every subsequent mutation.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<AppState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Number of live subscribers as of the last notify.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Mutate the state and notify subscribers.
    pub fn update(&mut self, mutate: impl FnOnce(&mut AppState)) {
        mutate(&mut self.state);
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = self.state.clone();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        trace!(
            loading = snapshot.loading,
            records = snapshot.records.len(),
            editing = snapshot.is_editing(),
            subscribers = self.subscribers.len(),
            "state changed"
        );
    }
}
