//! Plain data carried between the core and the row store.

use std::collections::{HashMap, HashSet};

/// One activation audit row appended after a successful key exchange.
#[derive(Debug, Clone)]
pub struct ActivationRecord {
    /// Bearer token issued (or reused) for the team.
    pub api_key: String,
    /// Team the bearer belongs to.
    pub team_id: String,
    /// Row label, `"activation"` for rows written by this service.
    pub label: String,
    /// Whether the bearer is live.
    pub active: bool,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 revocation timestamp, empty while active.
    pub revoked_at: String,
    /// The validation key that was consumed.
    pub validation_key: String,
}

impl ActivationRecord {
    /// Flatten the record into its sheet row.
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.api_key,
            self.team_id,
            self.label,
            self.active.to_string(),
            self.created_at,
            self.revoked_at,
            self.validation_key,
        ]
    }
}

/// Credential state recovered from the activations range at startup.
#[derive(Debug, Default)]
pub struct ActivationSnapshot {
    /// Live bearer→team mappings.
    pub api_keys: HashMap<String, String>,
    /// Validation keys already consumed by an activation.
    pub used_keys: HashSet<String>,
    /// Bearers carrying a revocation marker.
    pub revoked_bearers: HashSet<String>,
}

impl ActivationSnapshot {
    /// Parse raw activation rows.
    ///
    /// Row layout: api_key, team_id, label, active, created_at, revoked_at,
    /// validation_key. Short rows are tolerated; `active` defaults to true.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut snapshot = Self::default();
        for row in rows {
            if row.len() < 2 {
                continue;
            }
            let api_key = row[0].clone();
            let team_id = row[1].clone();
            let label = row.get(2).map(String::as_str).unwrap_or("");
            let active = row
                .get(3)
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(true);
            let revoked_at = row.get(5).map(String::as_str).unwrap_or("");
            let validation_key = row.get(6).map(String::as_str).unwrap_or("");

            if active && !api_key.is_empty() && !team_id.is_empty() {
                snapshot.api_keys.insert(api_key.clone(), team_id);
            }
            if !validation_key.is_empty() {
                snapshot.used_keys.insert(validation_key.to_string());
            }
            if label == "revoked" || !revoked_at.is_empty() {
                snapshot.revoked_bearers.insert(api_key);
            }
        }
        snapshot
    }
}

/// Validation-key state recovered from the validation_keys range at startup.
#[derive(Debug, Default)]
pub struct ValidationKeySnapshot {
    /// Active key→team mappings.
    pub validation_keys: HashMap<String, String>,
    /// Absolute expiry (epoch seconds) per key.
    pub validation_key_expires: HashMap<String, i64>,
    /// Keys carrying a revocation marker.
    pub revoked_keys: HashSet<String>,
}

impl ValidationKeySnapshot {
    /// Parse raw validation-key rows.
    ///
    /// Row layout: key, team_id, expires, revoked. Invalid expiry values are
    /// logged and skipped.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut snapshot = Self::default();
        for row in rows {
            if row.len() < 2 {
                continue;
            }
            let key = row[0].clone();
            let team_id = row[1].clone();
            if key.is_empty() || team_id.is_empty() {
                continue;
            }
            if let Some(expires) = row.get(2).filter(|value| !value.is_empty()) {
                match expires.parse::<i64>() {
                    Ok(epoch) => {
                        snapshot.validation_key_expires.insert(key.clone(), epoch);
                    }
                    Err(_) => tracing::warn!(key = %key, "invalid expires value"),
                }
            }
            if row.get(3).is_some_and(|value| value.eq_ignore_ascii_case("true")) {
                snapshot.revoked_keys.insert(key.clone());
            }
            snapshot.validation_keys.insert(key, team_id);
        }
        snapshot
    }
}
