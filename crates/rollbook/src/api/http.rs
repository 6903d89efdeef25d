//! reqwest-backed implementation of [`AttendanceApi`].

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::{ApiResponse, AttendanceApi};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{AttendanceRecord, RecordFields, RecordId};

/// HTTP client for a REST attendance resource.
///
/// Routes:
/// - `GET    {collection}`      list
/// - `GET    {collection}/{id}` fetch one
/// - `POST   {collection}`      create
/// - `PUT    {collection}/{id}` update
/// - `DELETE {collection}/{id}` delete
#[derive(Debug, Clone)]
pub struct HttpAttendanceApi {
    client: Client,
    collection: Url,
}

impl HttpAttendanceApi {
    /// Build a client for the service named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_client(Client::new(), config.collection_url()?)
    }

    /// Build a client around an existing `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if `collection` cannot carry path segments.
    pub fn with_client(client: Client, collection: Url) -> Result<Self> {
        if collection.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: collection.to_string(),
                message: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self { client, collection })
    }

    /// URL of the attendance collection.
    #[must_use]
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// URL of one record, with the id encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection URL cannot carry path segments.
    pub fn record_url(&self, id: &RecordId) -> Result<Url> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|()| Error::internal("collection URL cannot be a base"))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    fn check_status(method: &'static str, response: Response) -> Result<Response> {
        let status = response.status();
        trace!(method, url = %response.url(), status = status.as_u16(), "response received");
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Status {
                method,
                url: response.url().to_string(),
                status: status.as_u16(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(
        method: &'static str,
        response: Response,
    ) -> Result<ApiResponse<T>> {
        let response = Self::check_status(method, response)?;
        let status = response.status().as_u16();
        let data = response.json::<T>().await?;
        Ok(ApiResponse::new(status, data))
    }
}

#[async_trait::async_trait]
impl AttendanceApi for HttpAttendanceApi {
    async fn get_all(&self) -> Result<ApiResponse<Vec<AttendanceRecord>>> {
        debug!(url = %self.collection, "Fetching attendance records");
        let response = self.client.get(self.collection.clone()).send().await?;
        let decoded: ApiResponse<Vec<AttendanceRecord>> = Self::decode("GET", response).await?;
        debug!(count = decoded.data.len(), "Fetched attendance records");
        Ok(decoded)
    }

    async fn get(&self, id: &RecordId) -> Result<ApiResponse<AttendanceRecord>> {
        let url = self.record_url(id)?;
        debug!(%url, "Fetching attendance record");
        let response = self.client.get(url).send().await?;
        Self::decode("GET", response).await
    }

    async fn create(&self, fields: &RecordFields) -> Result<ApiResponse<AttendanceRecord>> {
        debug!(url = %self.collection, fields = fields.len(), "Creating attendance record");
        let response = self
            .client
            .post(self.collection.clone())
            .json(fields)
            .send()
            .await?;
        Self::decode("POST", response).await
    }

    async fn update(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> Result<ApiResponse<AttendanceRecord>> {
        let url = self.record_url(id)?;
        debug!(%url, fields = fields.len(), "Updating attendance record");
        let response = self.client.put(url).json(fields).send().await?;
        Self::decode("PUT", response).await
    }

    async fn delete(&self, id: &RecordId) -> Result<ApiResponse<()>> {
        let url = self.record_url(id)?;
        debug!(%url, "Deleting attendance record");
        let response = self.client.delete(url).send().await?;
        let response = Self::check_status("DELETE", response)?;
        Ok(ApiResponse::new(response.status().as_u16(), ()))
    }
}
