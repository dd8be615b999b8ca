use axum::{Json, Router, extract::State, routing::post};

use crate::{
    auth::TeamId,
    dto::session::{GameSessionResponse, HeartbeatRequest},
    error::AppJson,
    services::session_service,
    state::SharedState,
};

/// Routes used by running clients to report liveness.
pub fn router() -> Router<SharedState> {
    Router::new().route("/client/heartbeat", post(heartbeat))
}

/// Report client liveness and learn about the team's ongoing game, if any.
#[utoipa::path(
    post,
    path = "/client/heartbeat",
    tag = "client",
    request_body = HeartbeatRequest,
    responses(
        (status = 200, description = "Current session status", body = GameSessionResponse)
    ),
    security(("bearer" = []))
)]
pub async fn heartbeat(
    State(state): State<SharedState>,
    TeamId(team_id): TeamId,
    AppJson(payload): AppJson<HeartbeatRequest>,
) -> Json<GameSessionResponse> {
    Json(session_service::heartbeat(&state, &team_id, payload).await)
}
