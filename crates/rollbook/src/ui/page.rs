//! Whole-page rendering.

use crate::app::AppState;

use super::form::AttendanceForm;
use super::table::AttendanceTable;

/// Page title.
pub const TITLE: &str = "Attendance Management System";

/// Line under the title.
pub const SUBTITLE: &str = "Manage student attendance records easily";

/// Shown in place of the table while a fetch is running.
pub const LOADING_MESSAGE: &str = "Loading attendance records...";

/// Page footer.
pub const FOOTER: &str = "(c) 2026 Attendance Management System. All rights reserved.";

/// Render header, error banner, form, table or loading indicator, and footer.
///
/// The banner is shown whenever `state.error` is set, loading or not. The
/// table is replaced by the loading indicator while `state.loading` is true.
#[must_use]
pub fn render_page(state: &AppState, form: &AttendanceForm) -> String {
    let rule = "=".repeat(TITLE.len());
    let mut out = format!("{TITLE}\n{SUBTITLE}\n{rule}\n\n");

    if let Some(error) = &state.error {
        out.push_str(&format!("! {error}\n\n"));
    }

    out.push_str(&form.render(state.editing.as_ref()));
    out.push('\n');

    if state.loading {
        out.push_str(LOADING_MESSAGE);
        out.push('\n');
    } else {
        out.push_str(&AttendanceTable::new(&state.records).render());
    }

    out.push('\n');
    out.push_str(FOOTER);
    out.push('\n');
    out
}
