use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, state::credentials::ActivationError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// External store write failed after retries.
    #[error("{message}")]
    Upstream {
        /// Stable message surfaced to the client.
        message: &'static str,
        /// Underlying storage failure.
        #[source]
        source: StorageError,
    },
    /// Request references a game/session that does not exist or does not match.
    #[error("{0}")]
    InvalidState(String),
    /// Event was already processed.
    #[error("duplicate event")]
    Duplicate,
    /// Activation key was rejected.
    #[error(transparent)]
    Activation(#[from] ActivationError),
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request: client/state error.
    #[error("{0}")]
    BadRequest(String),
    /// Missing or invalid credential.
    #[error("{0}")]
    Unauthorized(String),
    /// Duplicate side-effecting event.
    #[error("{0}")]
    Conflict(String),
    /// Request body failed schema validation.
    #[error("{0}")]
    Validation(String),
    /// External store write failed.
    #[error("{0}")]
    BadGateway(String),
    /// Feature not enabled on this deployment.
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Upstream { message, .. } => AppError::BadGateway(message.to_string()),
            ServiceError::InvalidState(message) => AppError::BadRequest(message),
            ServiceError::Duplicate => AppError::Conflict("duplicate event".into()),
            ServiceError::Activation(reason) => AppError::BadRequest(reason.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::Validation(format!("validation failed: {err}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}

/// JSON body extractor that reports deserialization failures with the
/// `{"error": …}` envelope and a 422 status.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}
