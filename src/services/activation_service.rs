//! One-time key exchange producing (or re-issuing) team bearers.

use time::OffsetDateTime;
use tracing::info;

use crate::{
    dao::{models::ActivationRecord, now_rfc3339},
    dto::activation::{ActivationRequest, ActivationResponse},
    error::ServiceError,
    state::SharedState,
};

/// Exchange a validation key for a bearer token.
///
/// The key is consumed and the bearer minted (or reused) under one lock
/// acquisition, then the activation audit row is appended.
pub async fn activate(
    state: &SharedState,
    request: ActivationRequest,
) -> Result<ActivationResponse, ServiceError> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let (bearer, team_id) = {
        let mut credentials = state.credentials().lock().await;
        let team_id = credentials.validate_activation(&request.validation_key, now)?;
        let bearer = credentials.issue_or_reuse_token(&team_id);
        (bearer, team_id)
    };
    info!(team = %team_id, machine = %request.machine_fingerprint, "activation ok");

    let record = ActivationRecord {
        api_key: bearer.clone(),
        team_id: team_id.clone(),
        label: "activation".to_string(),
        active: true,
        created_at: now_rfc3339(),
        revoked_at: String::new(),
        validation_key: request.validation_key,
    };
    state
        .row_store()
        .append_activation_row(record)
        .await
        .map_err(|source| ServiceError::Upstream {
            message: "failed to write activation to sheets",
            source,
        })?;

    Ok(ActivationResponse { bearer, team_id })
}
