use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::Client;
use tokio::time::sleep;
use tracing::warn;

use crate::dao::{
    models::{ActivationRecord, ActivationSnapshot, ValidationKeySnapshot},
    now_rfc3339,
    row_store::RowStore,
    storage::{RowIndex, StorageResult},
};

use super::{
    config::SheetsConfig,
    error::{SheetsDaoError, SheetsResult},
    models::{AppendResponse, ValuesResponse, column_letter, extract_row_index, extract_sheet_name},
};

/// Attempts per write before the failure surfaces to the caller.
const WRITE_ATTEMPTS: u32 = 3;
/// First retry delay; doubles on each subsequent attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// Row store backed by the sheets values REST API.
#[derive(Clone)]
pub struct SheetsRowStore {
    client: Client,
    config: Arc<SheetsConfig>,
}

impl SheetsRowStore {
    /// Build the HTTP client for the configured spreadsheet.
    pub fn new(config: SheetsConfig) -> SheetsResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| SheetsDaoError::ClientBuilder { source })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.sheet_id,
            range
        )
    }

    async fn append(&self, range: &str, row: &[String]) -> SheetsResult<Option<RowIndex>> {
        let mut attempt = 0;
        loop {
            match self.append_once(range, row).await {
                Ok(index) => return Ok(Some(index)),
                Err(err) => {
                    attempt += 1;
                    if attempt >= WRITE_ATTEMPTS {
                        return Err(err);
                    }
                    warn!(range, attempt, error = %err, "sheets append failed; retrying");
                    sleep(RETRY_BASE_DELAY * 2u32.pow(attempt - 1)).await;
                }
            }
        }
    }

    async fn append_once(&self, range: &str, row: &[String]) -> SheetsResult<RowIndex> {
        let url = format!("{}:append", self.values_url(range));
        let response = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.config.api_token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await
            .map_err(|source| SheetsDaoError::RequestSend {
                range: range.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SheetsDaoError::RequestStatus {
                range: range.to_string(),
                status: response.status(),
            });
        }

        let payload =
            response
                .json::<AppendResponse>()
                .await
                .map_err(|source| SheetsDaoError::DecodeResponse {
                    range: range.to_string(),
                    source,
                })?;

        let updated_range = payload
            .updates
            .and_then(|updates| updates.updated_range)
            .unwrap_or_default();
        extract_row_index(&updated_range).ok_or(SheetsDaoError::MalformedRange {
            range: updated_range,
        })
    }

    async fn update(&self, range: &str, row_index: RowIndex, row: &[String]) -> SheetsResult<()> {
        let Some(sheet_name) = extract_sheet_name(range) else {
            return Err(SheetsDaoError::MalformedRange {
                range: range.to_string(),
            });
        };
        let end_column = column_letter(row.len());
        let target = format!("{sheet_name}!A{row_index}:{end_column}{row_index}");

        let mut attempt = 0;
        loop {
            match self.update_once(&target, row).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    attempt += 1;
                    if attempt >= WRITE_ATTEMPTS {
                        return Err(err);
                    }
                    warn!(target, attempt, error = %err, "sheets update failed; retrying");
                    sleep(RETRY_BASE_DELAY * 2u32.pow(attempt - 1)).await;
                }
            }
        }
    }

    async fn update_once(&self, target: &str, row: &[String]) -> SheetsResult<()> {
        let url = self.values_url(target);
        let response = self
            .client
            .put(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.config.api_token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await
            .map_err(|source| SheetsDaoError::RequestSend {
                range: target.to_string(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SheetsDaoError::RequestStatus {
                range: target.to_string(),
                status: response.status(),
            })
        }
    }

    async fn get_rows(&self, range: &str) -> SheetsResult<Vec<Vec<String>>> {
        let url = self.values_url(range);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|source| SheetsDaoError::RequestSend {
                range: range.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SheetsDaoError::RequestStatus {
                range: range.to_string(),
                status: response.status(),
            });
        }

        let payload =
            response
                .json::<ValuesResponse>()
                .await
                .map_err(|source| SheetsDaoError::DecodeResponse {
                    range: range.to_string(),
                    source,
                })?;
        Ok(payload.values)
    }
}

impl RowStore for SheetsRowStore {
    fn append_game_row(&self, row: Vec<String>) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.games_range.clone();
            store.append(&range, &row).await.map_err(Into::into)
        })
    }

    fn update_game_row(
        &self,
        row_index: RowIndex,
        row: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.games_range.clone();
            store.update(&range, row_index, &row).await.map_err(Into::into)
        })
    }

    fn append_activation_row(
        &self,
        record: ActivationRecord,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.activations_range.clone();
            store.append(&range, &record.into_row()).await.map_err(Into::into)
        })
    }

    fn append_stream_event(
        &self,
        team_id: String,
        event_type: String,
        payload: serde_json::Value,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.streams_range.clone();
            let row = vec![
                now_rfc3339(),
                team_id,
                event_type,
                serde_json::to_string(&payload).unwrap_or_default(),
            ];
            store.append(&range, &row).await.map_err(Into::into)
        })
    }

    fn append_dedupe_row(
        &self,
        key: String,
        created_at: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.dedupe_range.clone();
            store.append(&range, &[key, created_at]).await.map_err(Into::into)
        })
    }

    fn append_team_row(
        &self,
        team_id: String,
        team_tricode: String,
        team_name: String,
        league: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.teams_range.clone();
            store
                .append(&range, &[team_id, team_tricode, team_name, league])
                .await
                .map_err(Into::into)
        })
    }

    fn append_player_row(
        &self,
        player_id: String,
        team_id: String,
        role: String,
        player_name: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.players_range.clone();
            store
                .append(&range, &[player_id, team_id, role, player_name])
                .await
                .map_err(Into::into)
        })
    }

    fn load_activation_state(&self) -> BoxFuture<'static, StorageResult<ActivationSnapshot>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.activations_range.clone();
            let rows = store.get_rows(&range).await?;
            Ok(ActivationSnapshot::from_rows(rows))
        })
    }

    fn load_validation_keys(&self) -> BoxFuture<'static, StorageResult<ValidationKeySnapshot>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.validation_keys_range.clone();
            let rows = store.get_rows(&range).await?;
            Ok(ValidationKeySnapshot::from_rows(rows))
        })
    }

    fn load_dedupe_keys(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        Box::pin(async move {
            let range = store.config.dedupe_range.clone();
            let rows = store.get_rows(&range).await?;
            Ok(rows
                .into_iter()
                .filter_map(|row| row.into_iter().next())
                .collect())
        })
    }
}
