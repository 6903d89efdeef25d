//! Attendance table.

use std::fmt::Write as _;

use crate::record::{display_value, AttendanceRecord, RecordId};

/// Line rendered when there is nothing to list.
pub const EMPTY_TABLE_MESSAGE: &str = "No attendance records found.";

/// A row action handed back to the parent.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    /// Load this record into the form.
    Edit(AttendanceRecord),
    /// Delete the record with this id.
    Delete(RecordId),
}

/// Stateless view over a record list.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceTable<'a> {
    records: &'a [AttendanceRecord],
}

impl<'a> AttendanceTable<'a> {
    /// Wrap a record list.
    #[must_use]
    pub fn new(records: &'a [AttendanceRecord]) -> Self {
        Self { records }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the row whose id displays as `raw`.
    #[must_use]
    pub fn row(&self, raw: &str) -> Option<&'a AttendanceRecord> {
        self.records.iter().find(|r| r.id.matches(raw))
    }

    /// Edit action for the row with id `raw`.
    #[must_use]
    pub fn edit(&self, raw: &str) -> Option<TableAction> {
        self.row(raw).map(|r| TableAction::Edit(r.clone()))
    }

    /// Delete action for the row with id `raw`.
    #[must_use]
    pub fn delete(&self, raw: &str) -> Option<TableAction> {
        self.row(raw).map(|r| TableAction::Delete(r.id.clone()))
    }

    /// `id` followed by every field name, in first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec!["id".to_string()];
        for record in self.records {
            for key in record.fields.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    fn cells(&self, columns: &[String]) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        if i == 0 {
                            record.id.to_string()
                        } else {
                            record.field(column).map(display_value).unwrap_or_default()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Render an aligned text table.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!("{EMPTY_TABLE_MESSAGE}\n");
        }

        let columns = self.columns();
        let rows = self.cells(&columns);

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        write_row(&mut out, &columns, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(&mut out, &rule, &widths);
        for row in &rows {
            write_row(&mut out, row, &widths);
        }
        let _ = writeln!(
            out,
            "{} record{}",
            rows.len(),
            if rows.len() == 1 { "" } else { "s" }
        );
        out
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
