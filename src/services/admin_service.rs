//! Admin provisioning of teams and players.

use tracing::info;
use uuid::Uuid;

use crate::{
    dto::admin::{
        PlayerCreateRequest, PlayerCreateResponse, TeamCreateRequest, TeamCreateResponse,
    },
    error::ServiceError,
    state::SharedState,
};

/// Provision a team and append its row to the teams range.
pub async fn create_team(
    state: &SharedState,
    request: TeamCreateRequest,
) -> Result<TeamCreateResponse, ServiceError> {
    let team_id = generate_entity_id("t");
    state
        .row_store()
        .append_team_row(
            team_id.clone(),
            request.team_tricode,
            request.team_name,
            request.league,
        )
        .await
        .map_err(|source| ServiceError::Upstream {
            message: "failed to write team row to sheets",
            source,
        })?;
    info!(team = %team_id, "team created");
    Ok(TeamCreateResponse { team_id })
}

/// Provision a player and append its row to the players range.
pub async fn create_player(
    state: &SharedState,
    request: PlayerCreateRequest,
) -> Result<PlayerCreateResponse, ServiceError> {
    let player_id = generate_entity_id("p");
    state
        .row_store()
        .append_player_row(
            player_id.clone(),
            request.team_tricode,
            request.role,
            request.player_name,
        )
        .await
        .map_err(|source| ServiceError::Upstream {
            message: "failed to write player row to sheets",
            source,
        })?;
    info!(player = %player_id, "player created");
    Ok(PlayerCreateResponse { player_id })
}

fn generate_entity_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_prefixed_short_hex() {
        let id = generate_entity_id("t");
        assert_eq!(id.len(), 10);
        assert!(id.starts_with("t_"));
        assert!(id[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
