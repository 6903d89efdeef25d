//! Attendance form.
//!
//! The form keeps its own field values. Whether it creates or updates is
//! decided entirely by the editing record the parent passes in.

use std::fmt::Write as _;

use serde_json::Value;
use tracing::{debug, info};

use crate::api::AttendanceApi;
use crate::error::Result;
use crate::record::{display_value, AttendanceRecord, RecordFields};

/// What a submit will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submit creates a new record.
    Create,
    /// Submit updates the record being edited.
    Edit,
}

impl FormMode {
    /// Derive the mode from the parent's editing selection.
    #[must_use]
    pub fn from_editing(editing: Option<&AttendanceRecord>) -> Self {
        if editing.is_some() {
            Self::Edit
        } else {
            Self::Create
        }
    }

    /// Heading shown above the fields.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Create => "Add Attendance Record",
            Self::Edit => "Edit Attendance Record",
        }
    }

    /// Label of the submit action.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Add Record",
            Self::Edit => "Update Record",
        }
    }

    /// Cancel is only offered while editing.
    #[must_use]
    pub fn can_cancel(self) -> bool {
        self == Self::Edit
    }
}

/// Local field state for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceForm {
    blank_fields: Vec<String>,
    values: RecordFields,
}

impl AttendanceForm {
    /// Create an empty form over the given field names.
    #[must_use]
    pub fn new(blank_fields: Vec<String>) -> Self {
        let mut form = Self {
            blank_fields,
            values: RecordFields::new(),
        };
        form.reset();
        form
    }

    /// Current field values.
    #[must_use]
    pub fn values(&self) -> &RecordFields {
        &self.values
    }

    /// Set one field.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Seed the fields from a record, or blank them when there is none.
    pub fn load(&mut self, editing: Option<&AttendanceRecord>) {
        match editing {
            Some(record) => {
                debug!(id = %record.id, "Form seeded from record");
                self.values = record.fields.clone();
            }
            None => self.reset(),
        }
    }

    /// Blank out every field.
    pub fn reset(&mut self) {
        self.values = self
            .blank_fields
            .iter()
            .map(|name| (name.clone(), Value::String(String::new())))
            .collect();
    }

    /// Send the fields to the service.
    ///
    /// Creates when `editing` is `None`, otherwise updates the record with
    /// `editing`'s id. Fields are reset only after the call succeeds.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; the fields are kept so the user can
    /// retry.
    pub async fn submit<A>(
        &mut self,
        api: &A,
        editing: Option<&AttendanceRecord>,
    ) -> Result<AttendanceRecord>
    where
        A: AttendanceApi + ?Sized,
    {
        let saved = match editing {
            Some(record) => api.update(&record.id, &self.values).await?.data,
            None => api.create(&self.values).await?.data,
        };
        info!(
            id = %saved.id,
            mode = ?FormMode::from_editing(editing),
            "Attendance record saved"
        );
        self.reset();
        Ok(saved)
    }

    /// Render the form region.
    #[must_use]
    pub fn render(&self, editing: Option<&AttendanceRecord>) -> String {
        let mode = FormMode::from_editing(editing);
        let mut out = String::new();

        let _ = write!(out, "{}", mode.heading());
        if let Some(record) = editing {
            let _ = write!(out, " (id {})", record.id);
        }
        out.push('\n');

        let width = self
            .values
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);
        for (name, value) in &self.values {
            let _ = writeln!(out, "  {name:<width$} : {}", display_value(value));
        }

        let _ = write!(out, "  [submit] {}", mode.submit_label());
        if mode.can_cancel() {
            out.push_str("   [cancel] Cancel");
        }
        out.push('\n');
        out
    }
}
