//! Opportunistic startup rehydration from the persisted sheet ranges.

use tracing::{info, warn};

use crate::state::SharedState;

/// Reload credential and dedupe state written by previous processes.
///
/// Every load failure is logged and skipped; rehydration never blocks
/// startup.
pub async fn rehydrate(state: &SharedState) {
    let store = state.row_store();
    if !store.enabled() {
        return;
    }

    match store.load_activation_state().await {
        Ok(snapshot) => {
            let mut credentials = state.credentials().lock().await;
            credentials.merge_api_keys(snapshot.api_keys);
            credentials.merge_used_keys(snapshot.used_keys);
        }
        Err(err) => warn!(error = %err, "failed to load activation state"),
    }

    match store.load_validation_keys().await {
        Ok(snapshot) => {
            let mut credentials = state.credentials().lock().await;
            credentials.merge_validation_keys(snapshot.validation_keys);
            credentials.merge_expiries(snapshot.validation_key_expires);
            credentials.merge_revoked_keys(snapshot.revoked_keys);
        }
        Err(err) => warn!(error = %err, "failed to load validation keys"),
    }

    match store.load_dedupe_keys().await {
        Ok(keys) => {
            let count = keys.len();
            let mut dedupe = state.dedupe().lock().await;
            for key in keys {
                dedupe.mark(key);
            }
            info!(count, "rehydrated dedupe keys");
        }
        Err(err) => warn!(error = %err, "failed to load dedupe keys"),
    }
}
