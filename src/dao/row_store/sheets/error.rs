//! Error types shared by the sheets storage implementation.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`SheetsDaoError`] failures.
pub type SheetsResult<T> = Result<T, SheetsDaoError>;

/// Failures that can occur while talking to the sheets API.
#[derive(Debug, Error)]
pub enum SheetsDaoError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build sheets client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request to a values endpoint could not be sent.
    #[error("failed to send sheets request for `{range}`")]
    RequestSend {
        range: String,
        #[source]
        source: reqwest::Error,
    },
    /// The sheets API returned an unexpected status code.
    #[error("unexpected sheets response status {status} for `{range}`")]
    RequestStatus { range: String, status: StatusCode },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode sheets response for `{range}`")]
    DecodeResponse {
        range: String,
        #[source]
        source: reqwest::Error,
    },
    /// An append acknowledgement did not carry a usable row locator.
    #[error("could not extract a row index from updated range `{range}`")]
    MalformedRange { range: String },
}

impl From<SheetsDaoError> for StorageError {
    fn from(err: SheetsDaoError) -> Self {
        StorageError::unavailable("sheets request failed".to_string(), err)
    }
}
