//! No-op store used when no sheet is configured.

use futures::future::BoxFuture;

use crate::dao::{
    models::{ActivationRecord, ActivationSnapshot, ValidationKeySnapshot},
    row_store::RowStore,
    storage::{RowIndex, StorageResult},
};

/// Success-shaped no-op store: session and dedupe logic exercise fully
/// without a live external dependency.
#[derive(Debug, Default)]
pub struct DisabledRowStore;

impl RowStore for DisabledRowStore {
    fn enabled(&self) -> bool {
        false
    }

    fn append_game_row(&self, _row: Vec<String>) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(None) })
    }

    fn update_game_row(
        &self,
        _row_index: RowIndex,
        _row: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn append_activation_row(
        &self,
        _record: ActivationRecord,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(None) })
    }

    fn append_stream_event(
        &self,
        _team_id: String,
        _event_type: String,
        _payload: serde_json::Value,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(None) })
    }

    fn append_dedupe_row(
        &self,
        _key: String,
        _created_at: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(None) })
    }

    fn append_team_row(
        &self,
        _team_id: String,
        _team_tricode: String,
        _team_name: String,
        _league: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(None) })
    }

    fn append_player_row(
        &self,
        _player_id: String,
        _team_id: String,
        _role: String,
        _player_name: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(None) })
    }

    fn load_activation_state(&self) -> BoxFuture<'static, StorageResult<ActivationSnapshot>> {
        Box::pin(async { Ok(ActivationSnapshot::default()) })
    }

    fn load_validation_keys(&self) -> BoxFuture<'static, StorageResult<ValidationKeySnapshot>> {
        Box::pin(async { Ok(ValidationKeySnapshot::default()) })
    }

    fn load_dedupe_keys(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}
