//! Abstraction over the tabular store that receives ingestion rows.

mod disabled;
#[cfg(feature = "sheets-store")]
pub mod sheets;

pub use disabled::DisabledRowStore;

use futures::future::BoxFuture;

use crate::dao::{
    models::{ActivationRecord, ActivationSnapshot, ValidationKeySnapshot},
    storage::{RowIndex, StorageResult},
};

/// External row store: one append/update surface per sheet range, plus the
/// bulk loads used to rehydrate in-memory state at startup.
///
/// Append calls return the locator of the written row when the backend can
/// report one; the disabled implementation returns `None` so callers keep
/// working without a live store.
pub trait RowStore: Send + Sync {
    /// False when no backing store is configured; writes are then no-ops.
    fn enabled(&self) -> bool {
        true
    }

    /// Append a full-width row to the games range.
    fn append_game_row(&self, row: Vec<String>) -> BoxFuture<'static, StorageResult<Option<RowIndex>>>;

    /// Overwrite the game row at `row_index`.
    fn update_game_row(
        &self,
        row_index: RowIndex,
        row: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<()>>;

    /// Append an activation audit row.
    fn append_activation_row(
        &self,
        record: ActivationRecord,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>>;

    /// Append a stream event row (timestamp, team, kind, JSON payload).
    fn append_stream_event(
        &self,
        team_id: String,
        event_type: String,
        payload: serde_json::Value,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>>;

    /// Append a processed-event key so dedupe state survives restarts.
    fn append_dedupe_row(
        &self,
        key: String,
        created_at: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>>;

    /// Append a provisioned team row.
    fn append_team_row(
        &self,
        team_id: String,
        team_tricode: String,
        team_name: String,
        league: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>>;

    /// Append a provisioned player row.
    fn append_player_row(
        &self,
        player_id: String,
        team_id: String,
        role: String,
        player_name: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>>;

    /// Load persisted activation history.
    fn load_activation_state(&self) -> BoxFuture<'static, StorageResult<ActivationSnapshot>>;

    /// Load provisioned validation keys.
    fn load_validation_keys(&self) -> BoxFuture<'static, StorageResult<ValidationKeySnapshot>>;

    /// Load persisted dedupe keys.
    fn load_dedupe_keys(&self) -> BoxFuture<'static, StorageResult<Vec<String>>>;
}
