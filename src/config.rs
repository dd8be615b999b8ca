//! Environment-based configuration for the credential tables.

use std::{
    collections::{HashMap, HashSet},
    env,
};

use tracing::{error, warn};

/// Environment variable holding the validation-key→team JSON object.
const VALIDATION_KEYS_ENV: &str = "IONIA_VALIDATION_KEYS";
/// Environment variable holding the bearer→team JSON object.
const API_KEYS_ENV: &str = "IONIA_API_KEYS";
/// Environment variable holding the validation-key→expiry (epoch seconds) JSON object.
const VALIDATION_KEYS_EXPIRES_ENV: &str = "IONIA_VALIDATION_KEYS_EXPIRES";
/// Environment variable holding the revoked validation keys JSON array.
const VALIDATION_KEYS_REVOKED_ENV: &str = "IONIA_VALIDATION_KEYS_REVOKED";
/// Environment variable holding the admin bearer token.
const ADMIN_BEARER_ENV: &str = "IONIA_ADMIN_BEARER";

/// Credential tables seeded from the environment.
///
/// Every entry is optional; malformed values are logged and treated as
/// empty, never as a startup failure.
#[derive(Debug, Clone, Default)]
pub struct AuthKeys {
    /// One-time activation codes mapped to their owning team.
    pub validation_keys: HashMap<String, String>,
    /// Pre-issued bearer tokens mapped to their owning team.
    pub api_keys: HashMap<String, String>,
    /// Absolute expiry (epoch seconds) per validation key.
    pub validation_key_expires: HashMap<String, i64>,
    /// Validation keys that must never activate again.
    pub revoked_keys: HashSet<String>,
    /// Token granting access to the `/admin` namespace, when configured.
    pub admin_bearer: Option<String>,
}

impl AuthKeys {
    /// Read all credential tables from the environment.
    pub fn from_env() -> Self {
        Self {
            validation_keys: load_string_mapping(VALIDATION_KEYS_ENV),
            api_keys: load_string_mapping(API_KEYS_ENV),
            validation_key_expires: load_int_mapping(VALIDATION_KEYS_EXPIRES_ENV),
            revoked_keys: load_string_set(VALIDATION_KEYS_REVOKED_ENV),
            admin_bearer: env::var(ADMIN_BEARER_ENV)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        }
    }
}

/// Immutable runtime configuration assembled at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Credential tables for the authorization gate and activation flow.
    pub auth: AuthKeys,
}

impl AppConfig {
    /// Load the application configuration from the environment.
    pub fn load() -> Self {
        Self {
            auth: AuthKeys::from_env(),
        }
    }
}

fn load_string_mapping(name: &str) -> HashMap<String, String> {
    parse_string_mapping(name, &env::var(name).unwrap_or_default())
}

fn load_int_mapping(name: &str) -> HashMap<String, i64> {
    parse_int_mapping(name, &env::var(name).unwrap_or_default())
}

fn load_string_set(name: &str) -> HashSet<String> {
    parse_string_set(name, &env::var(name).unwrap_or_default())
}

fn parse_object(name: &str, raw: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(object)) => Some(object),
        Ok(_) => {
            error!(var = name, "expected a JSON object");
            None
        }
        Err(err) => {
            error!(var = name, error = %err, "not valid JSON");
            None
        }
    }
}

fn parse_string_mapping(name: &str, raw: &str) -> HashMap<String, String> {
    let Some(object) = parse_object(name, raw) else {
        return HashMap::new();
    };
    object
        .into_iter()
        .filter_map(|(key, value)| match value.as_str() {
            Some(text) => Some((key, text.to_string())),
            None => {
                warn!(var = name, key = %key, "non-string entry; skipping");
                None
            }
        })
        .collect()
}

fn parse_int_mapping(name: &str, raw: &str) -> HashMap<String, i64> {
    let Some(object) = parse_object(name, raw) else {
        return HashMap::new();
    };
    object
        .into_iter()
        .filter_map(|(key, value)| match value.as_i64() {
            Some(number) => Some((key, number)),
            None => {
                warn!(var = name, key = %key, "non-integer entry; skipping");
                None
            }
        })
        .collect()
}

fn parse_string_set(name: &str, raw: &str) -> HashSet<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return HashSet::new();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Ok(_) => {
            error!(var = name, "expected a JSON array of strings");
            HashSet::new()
        }
        Err(err) => {
            error!(var = name, error = %err, "not valid JSON");
            HashSet::new()
        }
    }
}
