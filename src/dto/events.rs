use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Draft snapshot submitted when champion select completes (or progresses).
#[derive(Debug, Deserialize, ToSchema)]
pub struct DraftCompleteRequest {
    /// Game the draft belongs to; must match the active session.
    pub game_id: String,
    /// Ban/pick fields keyed by sheet column (BB1, BP1, …).
    pub draft: IndexMap<String, String>,
}

/// In-game start report carrying the final position assignments.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GameStartRequest {
    /// Game being started; must match the active session.
    pub game_id: String,
    /// Player-position fields keyed by sheet column (BT, BJ, …).
    pub positions: IndexMap<String, String>,
}

/// Final outcome report closing the team's session.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GameFinishedRequest {
    /// Game being closed; must match the active session.
    pub game_id: String,
    /// Outcome marker (W/L).
    pub win: String,
}

/// Player seat a POV stream is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamRole {
    /// Top lane.
    Top,
    /// Jungle.
    Jungle,
    /// Mid lane.
    Mid,
    /// Bot lane carry.
    Adc,
    /// Support.
    Support,
    /// Team-wide observer stream.
    Global,
}

impl StreamRole {
    /// Wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            StreamRole::Top => "TOP",
            StreamRole::Jungle => "JUNGLE",
            StreamRole::Mid => "MID",
            StreamRole::Adc => "ADC",
            StreamRole::Support => "SUPPORT",
            StreamRole::Global => "GLOBAL",
        }
    }
}

/// Hosting platform of a published VOD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StreamPlatform {
    /// Recording retrieved from the team server.
    Server,
    /// Public YouTube upload.
    Youtube,
}

impl StreamPlatform {
    /// Wire name of the platform.
    pub fn as_str(self) -> &'static str {
        match self {
            StreamPlatform::Server => "server",
            StreamPlatform::Youtube => "youtube",
        }
    }
}

/// Notification that a POV stream VOD is ready for a finished game.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StreamReadyRequest {
    /// Game the VOD covers.
    pub game_id: String,
    /// Seat the stream was recorded from.
    pub role: StreamRole,
    /// Location of the published VOD.
    pub vod_url: String,
    /// Hosting platform.
    pub platform: StreamPlatform,
    /// Player the stream belongs to, when role-scoped.
    #[serde(default)]
    pub player_id: Option<String>,
}
