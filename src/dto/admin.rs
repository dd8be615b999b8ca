use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Team provisioning payload for the admin namespace.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct TeamCreateRequest {
    /// Short team code, e.g. `KC`.
    #[validate(length(min = 1, message = "team_tricode must not be empty"))]
    pub team_tricode: String,
    /// Full display name.
    pub team_name: String,
    /// League the team competes in.
    pub league: String,
}

/// Identifier assigned to a provisioned team.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamCreateResponse {
    /// Generated team identifier.
    pub team_id: String,
}

/// Player provisioning payload for the admin namespace.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PlayerCreateRequest {
    /// Tricode of the team the player belongs to.
    #[validate(length(min = 1, message = "team_tricode must not be empty"))]
    pub team_tricode: String,
    /// Position the player occupies.
    pub role: String,
    /// Player display name.
    pub player_name: String,
}

/// Identifier assigned to a provisioned player.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerCreateResponse {
    /// Generated player identifier.
    pub player_id: String,
}
