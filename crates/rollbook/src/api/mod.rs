//! Client for the remote attendance service.
//!
//! [`AttendanceApi`] is the seam between the controller and the network.
//! [`HttpAttendanceApi`] is the production implementation; tests drive the
//! controller with their own.

mod http;

pub use http::HttpAttendanceApi;

use crate::error::Result;
use crate::record::{AttendanceRecord, RecordFields, RecordId};

/// Response envelope for a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code the service answered with.
    pub status: u16,
    /// Decoded response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload with a status code.
    #[must_use]
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }
}

/// Operations the attendance service exposes.
///
/// Every call is a single attempt: no retries, no caching, and a failure
/// surfaces to the caller immediately.
#[async_trait::async_trait]
pub trait AttendanceApi: Send + Sync {
    /// Fetch every record, in the order the service returns them.
    async fn get_all(&self) -> Result<ApiResponse<Vec<AttendanceRecord>>>;

    /// Fetch a single record.
    async fn get(&self, id: &RecordId) -> Result<ApiResponse<AttendanceRecord>>;

    /// Create a record; the service assigns its id.
    async fn create(&self, fields: &RecordFields) -> Result<ApiResponse<AttendanceRecord>>;

    /// Replace the fields of an existing record.
    async fn update(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> Result<ApiResponse<AttendanceRecord>>;

    /// Delete a record. Success carries no payload.
    async fn delete(&self, id: &RecordId) -> Result<ApiResponse<()>>;
}
