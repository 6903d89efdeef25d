//! Text rendering of the attendance page.
//!
//! - [`form`]: the create/edit form and its submit logic
//! - [`table`]: the record list and its row actions
//! - [`page`]: the full page composed from a state snapshot

pub mod form;
pub mod page;
pub mod table;

pub use form::{AttendanceForm, FormMode};
pub use page::render_page;
pub use table::{AttendanceTable, TableAction};
