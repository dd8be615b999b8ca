use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    auth::AdminScope,
    dto::admin::{
        PlayerCreateRequest, PlayerCreateResponse, TeamCreateRequest, TeamCreateResponse,
    },
    error::{AppError, AppJson},
    services::admin_service,
    state::SharedState,
};

/// Provisioning routes gated on the admin bearer.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/admin/teams", post(create_team))
        .route("/admin/players", post(create_player))
}

/// Provision a new team.
#[utoipa::path(
    post,
    path = "/admin/teams",
    tag = "admin",
    request_body = TeamCreateRequest,
    responses(
        (status = 200, description = "Team created", body = TeamCreateResponse),
        (status = 502, description = "Team row write failed"),
        (status = 503, description = "Admin bearer not configured")
    ),
    security(("bearer" = []))
)]
pub async fn create_team(
    State(state): State<SharedState>,
    _scope: AdminScope,
    AppJson(payload): AppJson<TeamCreateRequest>,
) -> Result<Json<TeamCreateResponse>, AppError> {
    payload.validate()?;
    let response = admin_service::create_team(&state, payload).await?;
    Ok(Json(response))
}

/// Provision a new player.
#[utoipa::path(
    post,
    path = "/admin/players",
    tag = "admin",
    request_body = PlayerCreateRequest,
    responses(
        (status = 200, description = "Player created", body = PlayerCreateResponse),
        (status = 502, description = "Player row write failed"),
        (status = 503, description = "Admin bearer not configured")
    ),
    security(("bearer" = []))
)]
pub async fn create_player(
    State(state): State<SharedState>,
    _scope: AdminScope,
    AppJson(payload): AppJson<PlayerCreateRequest>,
) -> Result<Json<PlayerCreateResponse>, AppError> {
    payload.validate()?;
    let response = admin_service::create_player(&state, payload).await?;
    Ok(Json(response))
}
