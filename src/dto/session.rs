use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Periodic client probe carrying its identity and version.
#[derive(Debug, Deserialize, ToSchema)]
pub struct HeartbeatRequest {
    /// Reporting player.
    pub player_id: String,
    /// Position the reporting client observes.
    pub role: String,
    /// Client version.
    pub version: String,
}

/// Draft-phase opener reported when champion select begins.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ChampSelectStartRequest {
    /// Match date the game is reported under.
    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: String,
    /// Opponent team name.
    pub opposite_team: String,
    /// Game patch version.
    pub patch: String,
    /// Tournament realm marker.
    pub tr: String,
    /// Side played (BLUE/RED).
    pub side: String,
}

/// Session status returned by heartbeat and champ-select endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameSessionResponse {
    /// Always "ok"; errors use the error envelope instead.
    pub status: String,
    /// Informational note, e.g. "no ongoing game" or "game already active".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Identifier of the active game, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    /// Day-scoped sequence number of the active game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_number: Option<u32>,
}

impl GameSessionResponse {
    /// Session response for a live game.
    pub fn active(game_id: String, game_number: u32) -> Self {
        Self {
            status: "ok".to_string(),
            message: None,
            game_id: Some(game_id),
            game_number: Some(game_number),
        }
    }

    /// Repeat champ-select call: the existing game is returned unchanged.
    pub fn already_active(game_id: String, game_number: u32) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some("game already active".to_string()),
            game_id: Some(game_id),
            game_number: Some(game_number),
        }
    }

    /// Heartbeat response when the team has no active session.
    pub fn no_game() -> Self {
        Self {
            status: "ok".to_string(),
            message: Some("no ongoing game".to_string()),
            game_id: None,
            game_number: None,
        }
    }
}

/// Acknowledgement carrying the game the event applied to.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameIdResponse {
    /// Identifier of the team's active game.
    pub game_id: String,
}

/// Bare acknowledgement for side-effecting events.
#[derive(Debug, Serialize, ToSchema)]
pub struct Ack {
    /// Always "ok".
    pub status: String,
}

impl Ack {
    /// Positive acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
