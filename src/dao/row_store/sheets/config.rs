use std::env;

/// Default API host for the sheets service.
const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Runtime configuration describing the target spreadsheet and its ranges.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// API host, overridable for testing.
    pub base_url: String,
    /// Spreadsheet identifier.
    pub sheet_id: String,
    /// Bearer token presented to the sheets API.
    pub api_token: String,
    /// A1 range of the games table.
    pub games_range: String,
    /// A1 range of the stream events table.
    pub streams_range: String,
    /// A1 range of the activation audit table.
    pub activations_range: String,
    /// A1 range of the persisted dedupe keys.
    pub dedupe_range: String,
    /// A1 range of the provisioned validation keys.
    pub validation_keys_range: String,
    /// A1 range of the provisioned teams.
    pub teams_range: String,
    /// A1 range of the provisioned players.
    pub players_range: String,
}

impl SheetsConfig {
    /// Build a configuration from the environment.
    ///
    /// Returns `None` when the sheet id or API token is missing, in which
    /// case the writer stays disabled.
    pub fn from_env() -> Option<Self> {
        let sheet_id = trimmed_var("IONIA_GOOGLE_SHEET_ID")?;
        let api_token = trimmed_var("IONIA_GOOGLE_API_TOKEN")?;

        Some(Self {
            base_url: trimmed_var("IONIA_SHEETS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sheet_id,
            api_token,
            games_range: range_var("IONIA_SHEETS_GAMES_RANGE", "games!A:Z"),
            streams_range: range_var("IONIA_SHEETS_STREAMS_RANGE", "streams!A:Z"),
            activations_range: range_var("IONIA_SHEETS_ACTIVATIONS_RANGE", "activations!A:Z"),
            dedupe_range: range_var("IONIA_SHEETS_DEDUPE_RANGE", "dedupe!A:Z"),
            validation_keys_range: range_var(
                "IONIA_SHEETS_VALIDATION_KEYS_RANGE",
                "validation_keys!A:Z",
            ),
            teams_range: range_var("IONIA_SHEETS_TEAMS_RANGE", "teams!A:Z"),
            players_range: range_var("IONIA_SHEETS_PLAYERS_RANGE", "players!A:Z"),
        })
    }
}

fn trimmed_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn range_var(name: &str, default: &str) -> String {
    trimmed_var(name).unwrap_or_else(|| default.to_string())
}
