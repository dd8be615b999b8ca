use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::activation::{ActivationRequest, ActivationResponse},
    error::{AppError, AppJson},
    services::activation_service,
    state::SharedState,
};

/// Route handling the one-time installation activation.
pub fn router() -> Router<SharedState> {
    Router::new().route("/activate", post(activate))
}

/// Exchange a one-time validation key for a reusable bearer token.
#[utoipa::path(
    post,
    path = "/activate",
    tag = "activation",
    request_body = ActivationRequest,
    responses(
        (status = 200, description = "Activation accepted", body = ActivationResponse),
        (status = 400, description = "Key rejected"),
        (status = 502, description = "Activation row write failed")
    )
)]
pub async fn activate(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<ActivationRequest>,
) -> Result<Json<ActivationResponse>, AppError> {
    payload.validate()?;
    let response = activation_service::activate(&state, payload).await?;
    Ok(Json(response))
}
