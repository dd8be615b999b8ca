//! POV stream attachment events.

use tracing::{info, warn};

use crate::{
    dao::now_rfc3339,
    dto::{events::StreamReadyRequest, session::Ack},
    error::ServiceError,
    state::{
        SharedState,
        dedupe::{self, EventKind},
    },
};

/// Record a published VOD for a game, at most once per team/game/role.
pub async fn stream_ready(
    state: &SharedState,
    team_id: &str,
    request: StreamReadyRequest,
) -> Result<Ack, ServiceError> {
    let key = dedupe::stream_event_key(
        team_id,
        EventKind::StreamReady,
        &request.game_id,
        request.role.as_str(),
    );

    // No session is involved here, so the dedupe lock itself spans check,
    // persist, and mark: an identical retry arriving mid-flight cannot slip
    // between the check and the insert.
    let mut dedupe = state.dedupe().lock().await;
    if dedupe.contains(&key) {
        return Err(ServiceError::Duplicate);
    }

    info!(team = %team_id, game = %request.game_id, role = %request.role.as_str(), "stream_ready");
    let payload = serde_json::json!({
        "game_id": request.game_id,
        "role": request.role.as_str(),
        "vod_url": request.vod_url,
        "platform": request.platform.as_str(),
        "player_id": request.player_id,
    });
    state
        .row_store()
        .append_stream_event(team_id.to_string(), "stream_ready".to_string(), payload)
        .await
        .map_err(|source| ServiceError::Upstream {
            message: "failed to write stream row to sheets",
            source,
        })?;

    dedupe.mark(key.clone());
    drop(dedupe);

    if let Err(err) = state.row_store().append_dedupe_row(key, now_rfc3339()).await {
        warn!(error = %err, "failed to persist dedupe key");
    }
    Ok(Ack::ok())
}
