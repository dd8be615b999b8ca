//! Validation-key and bearer-token tables.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthKeys;

/// Reason an activation key was rejected, in check priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// The key was already consumed by a previous activation.
    #[error("validation key already used")]
    AlreadyUsed,
    /// The key is in the revoked set.
    #[error("validation key revoked")]
    Revoked,
    /// The key is not (or no longer) in the active mapping.
    #[error("invalid or expired validation key")]
    Unknown,
    /// The key carries an expiry timestamp that has passed.
    #[error("validation key expired")]
    Expired,
}

/// One-time activation codes, issued bearers, and their revocation state.
///
/// All mutation goes through the activation flow; the table is shared
/// process-wide behind a single lock (see [`crate::state::AppState`]).
#[derive(Debug, Default)]
pub struct CredentialStore {
    validation_keys: HashMap<String, String>,
    api_keys: HashMap<String, String>,
    validation_key_expires: HashMap<String, i64>,
    revoked_keys: HashSet<String>,
    used_keys: HashSet<String>,
    admin_bearer: Option<String>,
}

impl CredentialStore {
    /// Build the store from the environment-derived key tables.
    pub fn new(keys: AuthKeys) -> Self {
        Self {
            validation_keys: keys.validation_keys,
            api_keys: keys.api_keys,
            validation_key_expires: keys.validation_key_expires,
            revoked_keys: keys.revoked_keys,
            used_keys: HashSet::new(),
            admin_bearer: keys.admin_bearer,
        }
    }

    /// Consume `key`, returning the owning team id.
    ///
    /// Checks run in priority order: used, revoked, unknown, expired. On
    /// success the key moves into the used set and leaves the active
    /// mapping, so a second call with the same key reports `AlreadyUsed`.
    pub fn validate_activation(&mut self, key: &str, now: i64) -> Result<String, ActivationError> {
        if self.used_keys.contains(key) {
            return Err(ActivationError::AlreadyUsed);
        }
        if self.revoked_keys.contains(key) {
            return Err(ActivationError::Revoked);
        }
        let Some(team_id) = self.validation_keys.get(key).cloned() else {
            return Err(ActivationError::Unknown);
        };
        if let Some(&expires_at) = self.validation_key_expires.get(key) {
            if now >= expires_at {
                return Err(ActivationError::Expired);
            }
        }
        self.used_keys.insert(key.to_string());
        self.validation_keys.remove(key);
        Ok(team_id)
    }

    /// Return the team's existing bearer, or mint and record a new one.
    ///
    /// At most one live bearer per team; re-activation is idempotent.
    pub fn issue_or_reuse_token(&mut self, team_id: &str) -> String {
        let existing = self
            .api_keys
            .iter()
            .find(|(_, mapped_team)| mapped_team.as_str() == team_id)
            .map(|(bearer, _)| bearer.clone());
        if let Some(bearer) = existing {
            return bearer;
        }

        let bearer = format!("{}_{}", team_id.to_lowercase(), Uuid::new_v4().simple());
        self.api_keys.insert(bearer.clone(), team_id.to_string());
        bearer
    }

    /// Look up the team that owns `bearer`.
    pub fn resolve_team(&self, bearer: &str) -> Option<&str> {
        self.api_keys.get(bearer).map(String::as_str)
    }

    /// True when an admin bearer is configured at all.
    pub fn admin_configured(&self) -> bool {
        self.admin_bearer.is_some()
    }

    /// Compare `bearer` against the configured admin token.
    ///
    /// Always false when no admin bearer is configured.
    pub fn is_admin_bearer(&self, bearer: &str) -> bool {
        self.admin_bearer.as_deref() == Some(bearer)
    }

    /// Merge rehydrated bearer→team mappings into the token table.
    pub fn merge_api_keys(&mut self, entries: HashMap<String, String>) {
        self.api_keys.extend(entries);
    }

    /// Merge rehydrated consumed validation keys into the used set.
    pub fn merge_used_keys(&mut self, keys: HashSet<String>) {
        self.used_keys.extend(keys);
    }

    /// Merge rehydrated key→team mappings into the active mapping.
    pub fn merge_validation_keys(&mut self, entries: HashMap<String, String>) {
        self.validation_keys.extend(entries);
    }

    /// Merge rehydrated key expiries.
    pub fn merge_expiries(&mut self, entries: HashMap<String, i64>) {
        self.validation_key_expires.extend(entries);
    }

    /// Merge rehydrated revoked keys.
    pub fn merge_revoked_keys(&mut self, keys: HashSet<String>) {
        self.revoked_keys.extend(keys);
    }
}
