use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the service status; degraded when no row store is configured.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    if state.row_store().enabled() {
        HealthResponse::ok()
    } else {
        HealthResponse::degraded()
    }
}
