//! Session lifecycle: draft start and progress, game start/finish, heartbeat.
//!
//! Handlers hold the session-table lock across the whole
//! check-merge-persist-update sequence so the locator read-then-write stays
//! atomic with respect to other writers on the same team.

use indexmap::IndexMap;
use rand::Rng;
use time::{OffsetDateTime, macros::format_description};
use tracing::{info, warn};

use crate::{
    dao::{now_rfc3339, row_store::RowStore, storage::StorageError},
    dto::{
        events::{DraftCompleteRequest, GameFinishedRequest, GameStartRequest},
        session::{
            Ack, ChampSelectStartRequest, GameIdResponse, GameSessionResponse, HeartbeatRequest,
        },
    },
    error::ServiceError,
    state::{
        SharedState, columns,
        dedupe::{self, EventKind},
        session::TeamSession,
    },
};

const NO_ACTIVE_GAME: &str = "no active game for team";

/// Read-only probe for the team's active session. Never fails.
pub async fn heartbeat(
    state: &SharedState,
    team_id: &str,
    request: HeartbeatRequest,
) -> GameSessionResponse {
    info!(team = %team_id, player = %request.player_id, role = %request.role, "heartbeat");
    let sessions = state.sessions().lock().await;
    match sessions.get(team_id) {
        Some(session) => GameSessionResponse::active(session.game_id.clone(), session.game_number),
        None => GameSessionResponse::no_game(),
    }
}

/// Open a session for the team and persist the initial game row.
///
/// Idempotent under client reconnects: an existing session is returned
/// unchanged without consuming a game number.
pub async fn champ_select_start(
    state: &SharedState,
    team_id: &str,
    request: ChampSelectStartRequest,
) -> Result<GameSessionResponse, ServiceError> {
    let mut sessions = state.sessions().lock().await;
    if let Some(session) = sessions.get(team_id) {
        return Ok(GameSessionResponse::already_active(
            session.game_id.clone(),
            session.game_number,
        ));
    }

    let game_id = generate_game_id();
    let game_number = sessions.next_game_number(team_id, &request.date);

    let mut row_data = IndexMap::new();
    row_data.insert("game_id".to_string(), game_id.clone());
    row_data.insert("date".to_string(), request.date.clone());
    row_data.insert("opposite_team".to_string(), request.opposite_team);
    row_data.insert("game_number".to_string(), game_number.to_string());
    row_data.insert("patch".to_string(), request.patch);
    row_data.insert("tr".to_string(), request.tr);
    row_data.insert("side".to_string(), request.side);

    let row_index = state
        .row_store()
        .append_game_row(columns::build_row(&row_data))
        .await
        .map_err(append_game_failure)?;

    sessions.insert(
        team_id.to_string(),
        TeamSession {
            game_id: game_id.clone(),
            draft_count: 0,
            row_index,
            row_data,
            game_number,
            date: request.date,
        },
    );
    info!(team = %team_id, game = %game_id, "champ_select_start");
    Ok(GameSessionResponse::active(game_id, game_number))
}

/// Merge a draft snapshot into the session row when it is strictly richer
/// than what was recorded before.
///
/// Stale or out-of-order submissions are acknowledged without a store write.
pub async fn draft_complete(
    state: &SharedState,
    team_id: &str,
    request: DraftCompleteRequest,
) -> Result<GameIdResponse, ServiceError> {
    let store = state.row_store();
    let mut sessions = state.sessions().lock().await;
    let Some(session) = sessions.get_mut(team_id) else {
        return Err(ServiceError::InvalidState(NO_ACTIVE_GAME.into()));
    };
    if session.game_id != request.game_id {
        return Err(ServiceError::InvalidState(NO_ACTIVE_GAME.into()));
    }

    let draft_count = draft_richness(&request.draft);
    if draft_count <= session.draft_count {
        return Ok(GameIdResponse {
            game_id: session.game_id.clone(),
        });
    }

    info!(team = %team_id, game = %session.game_id, draft_count, "draft_complete update");
    columns::merge_fields(&mut session.row_data, &request.draft);
    persist_session(store.as_ref(), session).await?;
    session.draft_count = draft_count;
    Ok(GameIdResponse {
        game_id: session.game_id.clone(),
    })
}

/// Record the in-game start: merge position fields and re-persist, at most
/// once per game.
pub async fn game_start(
    state: &SharedState,
    team_id: &str,
    request: GameStartRequest,
) -> Result<Ack, ServiceError> {
    let store = state.row_store();
    let mut sessions = state.sessions().lock().await;
    let Some(session) = sessions.get_mut(team_id) else {
        return Err(ServiceError::InvalidState(NO_ACTIVE_GAME.into()));
    };
    if session.game_id != request.game_id {
        return Err(ServiceError::InvalidState(NO_ACTIVE_GAME.into()));
    }

    // Identical retries serialize on the session-table lock, so the check
    // here and the mark after the persist cannot interleave.
    let key = dedupe::event_key(team_id, EventKind::GameStart, &request.game_id);
    if state.dedupe().lock().await.contains(&key) {
        return Err(ServiceError::Duplicate);
    }

    info!(team = %team_id, game = %request.game_id, "game_start");
    let positions: IndexMap<String, String> = request
        .positions
        .into_iter()
        .filter(|(column, _)| columns::is_position_column(column))
        .collect();
    columns::merge_fields(&mut session.row_data, &positions);
    persist_session(store.as_ref(), session).await?;

    mark_processed(state, key).await;
    Ok(Ack::ok())
}

/// Record the final outcome, re-persist the row, and close the session.
pub async fn game_finished(
    state: &SharedState,
    team_id: &str,
    request: GameFinishedRequest,
) -> Result<Ack, ServiceError> {
    let store = state.row_store();
    let mut sessions = state.sessions().lock().await;
    let Some(session) = sessions.get_mut(team_id) else {
        return Err(ServiceError::InvalidState(NO_ACTIVE_GAME.into()));
    };
    if session.game_id != request.game_id {
        return Err(ServiceError::InvalidState(NO_ACTIVE_GAME.into()));
    }

    let key = dedupe::event_key(team_id, EventKind::GameFinished, &request.game_id);
    if state.dedupe().lock().await.contains(&key) {
        return Err(ServiceError::Duplicate);
    }

    info!(team = %team_id, game = %request.game_id, "game_finished");
    let mut outcome = IndexMap::new();
    outcome.insert("win".to_string(), request.win);
    columns::merge_fields(&mut session.row_data, &outcome);

    let row = columns::build_row(&session.row_data);
    match session.row_index {
        Some(row_index) => store
            .update_game_row(row_index, row)
            .await
            .map_err(update_game_failure)?,
        None => {
            // The session is removed below, so the append's locator has
            // nowhere to live and is dropped.
            store
                .append_game_row(row)
                .await
                .map_err(append_game_failure)?;
        }
    }

    sessions.remove(team_id);
    mark_processed(state, key).await;
    Ok(Ack::ok())
}

/// Write the session row through: in-place when a locator is known, append
/// (capturing the locator) otherwise.
async fn persist_session(
    store: &dyn RowStore,
    session: &mut TeamSession,
) -> Result<(), ServiceError> {
    let row = columns::build_row(&session.row_data);
    match session.row_index {
        Some(row_index) => store
            .update_game_row(row_index, row)
            .await
            .map_err(update_game_failure),
        None => {
            session.row_index = store
                .append_game_row(row)
                .await
                .map_err(append_game_failure)?;
            Ok(())
        }
    }
}

/// Record the key in the dedupe set and mirror it to the dedupe range.
///
/// The mirror write is best effort; the in-memory mark is what enforces the
/// idempotency barrier for this process.
async fn mark_processed(state: &SharedState, key: String) {
    state.dedupe().lock().await.mark(key.clone());
    if let Err(err) = state.row_store().append_dedupe_row(key, now_rfc3339()).await {
        warn!(error = %err, "failed to persist dedupe key");
    }
}

fn append_game_failure(source: StorageError) -> ServiceError {
    ServiceError::Upstream {
        message: "failed to write game row to sheets",
        source,
    }
}

fn update_game_failure(source: StorageError) -> ServiceError {
    ServiceError::Upstream {
        message: "failed to update game row in sheets",
        source,
    }
}

/// Count of non-empty fields in a submitted draft payload.
fn draft_richness(draft: &IndexMap<String, String>) -> usize {
    draft.values().filter(|value| !value.is_empty()).count()
}

/// Collision-resistant game identifier: UTC minute stamp plus random suffix.
fn generate_game_id() -> String {
    let stamp = OffsetDateTime::now_utc()
        .format(&format_description!("[year][month][day]_[hour][minute]"))
        .unwrap_or_else(|_| "00000000_0000".to_string());
    let suffix: u16 = rand::rng().random();
    format!("g_{stamp}_{suffix:04x}")
}
