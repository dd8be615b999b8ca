use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One-time key exchange submitted by a freshly installed client.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ActivationRequest {
    /// Activation code provisioned out of band.
    #[validate(length(min = 1, message = "validation_key must not be empty"))]
    pub validation_key: String,
    /// Stable fingerprint of the installing machine, for audit logs.
    pub machine_fingerprint: String,
    /// Client version performing the activation.
    pub app_version: String,
}

/// Bearer token issued (or re-issued) for the activated team.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivationResponse {
    /// Token to present on every subsequent call.
    pub bearer: String,
    /// Team the token is scoped to.
    pub team_id: String,
}
