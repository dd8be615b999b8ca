use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    auth::TeamId,
    dto::{
        events::{DraftCompleteRequest, GameFinishedRequest, GameStartRequest, StreamReadyRequest},
        session::{Ack, ChampSelectStartRequest, GameIdResponse, GameSessionResponse},
    },
    error::{AppError, AppJson},
    services::{session_service, stream_service},
    state::SharedState,
};

/// Routes receiving game lifecycle events.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/events/champ_select_start", post(champ_select_start))
        .route("/events/draft_complete", post(draft_complete))
        .route("/events/game_start", post(game_start))
        .route("/events/game_finished", post(game_finished))
        .route("/events/stream_ready", post(stream_ready))
}

/// Open a game session when champion select begins.
#[utoipa::path(
    post,
    path = "/events/champ_select_start",
    tag = "events",
    request_body = ChampSelectStartRequest,
    responses(
        (status = 200, description = "Session opened or already active", body = GameSessionResponse),
        (status = 502, description = "Game row write failed")
    ),
    security(("bearer" = []))
)]
pub async fn champ_select_start(
    State(state): State<SharedState>,
    TeamId(team_id): TeamId,
    AppJson(payload): AppJson<ChampSelectStartRequest>,
) -> Result<Json<GameSessionResponse>, AppError> {
    payload.validate()?;
    let response = session_service::champ_select_start(&state, &team_id, payload).await?;
    Ok(Json(response))
}

/// Merge a draft snapshot into the active game row.
#[utoipa::path(
    post,
    path = "/events/draft_complete",
    tag = "events",
    request_body = DraftCompleteRequest,
    responses(
        (status = 200, description = "Draft recorded", body = GameIdResponse),
        (status = 400, description = "No matching active game"),
        (status = 502, description = "Game row write failed")
    ),
    security(("bearer" = []))
)]
pub async fn draft_complete(
    State(state): State<SharedState>,
    TeamId(team_id): TeamId,
    AppJson(payload): AppJson<DraftCompleteRequest>,
) -> Result<Json<GameIdResponse>, AppError> {
    let response = session_service::draft_complete(&state, &team_id, payload).await?;
    Ok(Json(response))
}

/// Record the in-game start with final position assignments.
#[utoipa::path(
    post,
    path = "/events/game_start",
    tag = "events",
    request_body = GameStartRequest,
    responses(
        (status = 200, description = "Start recorded", body = Ack),
        (status = 400, description = "No matching active game"),
        (status = 409, description = "Duplicate event"),
        (status = 502, description = "Game row write failed")
    ),
    security(("bearer" = []))
)]
pub async fn game_start(
    State(state): State<SharedState>,
    TeamId(team_id): TeamId,
    AppJson(payload): AppJson<GameStartRequest>,
) -> Result<Json<Ack>, AppError> {
    let response = session_service::game_start(&state, &team_id, payload).await?;
    Ok(Json(response))
}

/// Record the final outcome and close the session.
#[utoipa::path(
    post,
    path = "/events/game_finished",
    tag = "events",
    request_body = GameFinishedRequest,
    responses(
        (status = 200, description = "Outcome recorded", body = Ack),
        (status = 400, description = "No matching active game"),
        (status = 409, description = "Duplicate event"),
        (status = 502, description = "Game row write failed")
    ),
    security(("bearer" = []))
)]
pub async fn game_finished(
    State(state): State<SharedState>,
    TeamId(team_id): TeamId,
    AppJson(payload): AppJson<GameFinishedRequest>,
) -> Result<Json<Ack>, AppError> {
    let response = session_service::game_finished(&state, &team_id, payload).await?;
    Ok(Json(response))
}

/// Attach a published POV stream VOD to a game.
#[utoipa::path(
    post,
    path = "/events/stream_ready",
    tag = "events",
    request_body = StreamReadyRequest,
    responses(
        (status = 200, description = "Stream recorded", body = Ack),
        (status = 409, description = "Duplicate event"),
        (status = 502, description = "Stream row write failed")
    ),
    security(("bearer" = []))
)]
pub async fn stream_ready(
    State(state): State<SharedState>,
    TeamId(team_id): TeamId,
    AppJson(payload): AppJson<StreamReadyRequest>,
) -> Result<Json<Ack>, AppError> {
    let response = stream_service::stream_ready(&state, &team_id, payload).await?;
    Ok(Json(response))
}
