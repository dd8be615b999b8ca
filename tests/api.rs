//! End-to-end tests driving the real router with store doubles.

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum_test::TestServer;
use futures::future::BoxFuture;
use serde_json::{Value, json};

use ionia_ingest::{
    config::{AppConfig, AuthKeys},
    dao::{
        models::{ActivationRecord, ActivationSnapshot, ValidationKeySnapshot},
        row_store::{DisabledRowStore, RowStore},
        storage::{RowIndex, StorageError, StorageResult},
    },
    routes,
    state::AppState,
};

const TEST_KEY: &str = "IONIA-TEST-KEY";
const ADMIN_BEARER: &str = "admin-secret";

/// Store double that records game-row writes and returns fixed locators.
#[derive(Clone, Default)]
struct RecordingStore {
    appended: Arc<Mutex<Vec<Vec<String>>>>,
    updated: Arc<Mutex<Vec<(RowIndex, Vec<String>)>>>,
    fail_updates: bool,
}

impl RecordingStore {
    fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }

    fn appended_rows(&self) -> Vec<Vec<String>> {
        self.appended.lock().unwrap().clone()
    }

    fn updated_rows(&self) -> Vec<(RowIndex, Vec<String>)> {
        self.updated.lock().unwrap().clone()
    }
}

fn write_refused() -> StorageError {
    StorageError::unavailable(
        "sheets request failed".to_string(),
        std::io::Error::other("update refused"),
    )
}

impl RowStore for RecordingStore {
    fn append_game_row(&self, row: Vec<String>) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        let store = self.clone();
        Box::pin(async move {
            store.appended.lock().unwrap().push(row);
            Ok(Some(5))
        })
    }

    fn update_game_row(
        &self,
        row_index: RowIndex,
        row: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if store.fail_updates {
                return Err(write_refused());
            }
            store.updated.lock().unwrap().push((row_index, row));
            Ok(())
        })
    }

    fn append_activation_row(
        &self,
        _record: ActivationRecord,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(Some(1)) })
    }

    fn append_stream_event(
        &self,
        _team_id: String,
        _event_type: String,
        _payload: Value,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(Some(1)) })
    }

    fn append_dedupe_row(
        &self,
        _key: String,
        _created_at: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(Some(1)) })
    }

    fn append_team_row(
        &self,
        _team_id: String,
        _team_tricode: String,
        _team_name: String,
        _league: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(Some(1)) })
    }

    fn append_player_row(
        &self,
        _player_id: String,
        _team_id: String,
        _role: String,
        _player_name: String,
    ) -> BoxFuture<'static, StorageResult<Option<RowIndex>>> {
        Box::pin(async { Ok(Some(1)) })
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

fn test_config() -> AppConfig {
    let mut auth = AuthKeys::default();
    auth.validation_keys
        .insert(TEST_KEY.to_string(), "KC".to_string());
    AppConfig { auth }
}

fn server_with(config: AppConfig, store: Arc<dyn RowStore>) -> TestServer {
    let state = AppState::new(config, store);
    TestServer::new(routes::router(state)).expect("test server")
}

fn server() -> TestServer {
    server_with(test_config(), Arc::new(DisabledRowStore))
}

async fn activate(server: &TestServer) -> String {
    let response = server
        .post("/activate")
        .json(&json!({
            "validation_key": TEST_KEY,
            "machine_fingerprint": "win-test",
            "app_version": "1.0.0",
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["bearer"]
        .as_str()
        .expect("bearer in response")
        .to_string()
}

fn champ_select_body() -> Value {
    json!({
        "date": "2026-01-07",
        "opposite_team": "T1",
        "patch": "14.1",
        "tr": "TR1",
        "side": "BLUE",
    })
}

async fn start_game(server: &TestServer, bearer: &str) -> String {
    let response = server
        .post("/events/champ_select_start")
        .authorization_bearer(bearer)
        .json(&champ_select_body())
        .await;
    response.assert_status_ok();
    response.json::<Value>()["game_id"]
        .as_str()
        .expect("game_id in response")
        .to_string()
}

#[tokio::test]
async fn activate_rejects_unknown_key() {
    let server = server();
    let response = server
        .post("/activate")
        .json(&json!({
            "validation_key": "INVALID",
            "machine_fingerprint": "win-test",
            "app_version": "1.0.0",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "invalid or expired validation key"})
    );
}

#[tokio::test]
async fn activate_consumes_the_key() {
    let server = server();
    activate(&server).await;

    let response = server
        .post("/activate")
        .json(&json!({
            "validation_key": TEST_KEY,
            "machine_fingerprint": "win-test",
            "app_version": "1.0.0",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "validation key already used"})
    );
}

#[tokio::test]
async fn activate_reuses_the_team_bearer() {
    let mut config = test_config();
    config
        .auth
        .validation_keys
        .insert("SECOND-KEY".to_string(), "KC".to_string());
    let server = server_with(config, Arc::new(DisabledRowStore));

    let first = activate(&server).await;
    let response = server
        .post("/activate")
        .json(&json!({
            "validation_key": "SECOND-KEY",
            "machine_fingerprint": "win-other",
            "app_version": "1.0.0",
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["bearer"], Value::String(first));
}

#[tokio::test]
async fn activate_rejects_expired_key() {
    let mut config = test_config();
    config
        .auth
        .validation_key_expires
        .insert(TEST_KEY.to_string(), 100);
    let server = server_with(config, Arc::new(DisabledRowStore));

    let response = server
        .post("/activate")
        .json(&json!({
            "validation_key": TEST_KEY,
            "machine_fingerprint": "win-test",
            "app_version": "1.0.0",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "validation key expired"})
    );
}

#[tokio::test]
async fn activate_rejects_revoked_key() {
    let mut config = test_config();
    config.auth.revoked_keys.insert(TEST_KEY.to_string());
    let server = server_with(config, Arc::new(DisabledRowStore));

    let response = server
        .post("/activate")
        .json(&json!({
            "validation_key": TEST_KEY,
            "machine_fingerprint": "win-test",
            "app_version": "1.0.0",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "validation key revoked"})
    );
}

#[tokio::test]
async fn missing_bearer_is_rejected_before_business_logic() {
    let server = server();
    let response = server
        .post("/client/heartbeat")
        .json(&json!({"player_id": "p1", "role": "MID", "version": "1.0.0"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "missing bearer token"})
    );
}

#[tokio::test]
async fn invalid_bearer_is_rejected() {
    let server = server();
    let response = server
        .post("/client/heartbeat")
        .authorization_bearer("not-valid")
        .json(&json!({"player_id": "p1", "role": "MID", "version": "1.0.0"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "invalid bearer token"})
    );
}

#[tokio::test]
async fn champ_select_start_creates_game_and_heartbeat_returns_it() {
    let server = server();
    let bearer = activate(&server).await;

    let response = server
        .post("/events/champ_select_start")
        .authorization_bearer(&bearer)
        .json(&champ_select_body())
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["game_id"].as_str().is_some_and(|id| id.starts_with("g_")));
    assert_eq!(body["game_number"], json!(1));

    let heartbeat = server
        .post("/client/heartbeat")
        .authorization_bearer(&bearer)
        .json(&json!({"player_id": "p1", "role": "MID", "version": "1.0.0"}))
        .await;
    heartbeat.assert_status_ok();
    assert_eq!(heartbeat.json::<Value>()["game_id"], body["game_id"]);
}

#[tokio::test]
async fn repeated_champ_select_returns_the_existing_game() {
    let server = server();
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;

    let response = server
        .post("/events/champ_select_start")
        .authorization_bearer(&bearer)
        .json(&champ_select_body())
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["game_id"], Value::String(game_id.clone()));
    assert_eq!(body["message"], json!("game already active"));

    // The repeat did not consume a game number: the next game is #2.
    let finished = server
        .post("/events/game_finished")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "win": "W"}))
        .await;
    finished.assert_status_ok();

    let next = server
        .post("/events/champ_select_start")
        .authorization_bearer(&bearer)
        .json(&champ_select_body())
        .await;
    next.assert_status_ok();
    assert_eq!(next.json::<Value>()["game_number"], json!(2));
}

#[tokio::test]
async fn heartbeat_reports_no_ongoing_game() {
    let server = server();
    let bearer = activate(&server).await;

    let response = server
        .post("/client/heartbeat")
        .authorization_bearer(&bearer)
        .json(&json!({"player_id": "p1", "role": "MID", "version": "1.0.0"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], json!("no ongoing game"));
}

#[tokio::test]
async fn game_numbers_restart_per_date() {
    let server = server();
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;
    server
        .post("/events/game_finished")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "win": "L"}))
        .await
        .assert_status_ok();

    let other_date = server
        .post("/events/champ_select_start")
        .authorization_bearer(&bearer)
        .json(&json!({
            "date": "2026-01-08",
            "opposite_team": "T1",
            "patch": "14.1",
            "tr": "TR1",
            "side": "RED",
        }))
        .await;
    other_date.assert_status_ok();
    assert_eq!(other_date.json::<Value>()["game_number"], json!(1));
}

#[tokio::test]
async fn richer_draft_updates_row_and_stale_draft_does_not() {
    let store = RecordingStore::default();
    let server = server_with(test_config(), Arc::new(store.clone()));
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;
    assert_eq!(store.appended_rows().len(), 1);

    for draft in [
        json!({"BP1": "Maokai"}),
        json!({"BP1": "Maokai"}),
        json!({"BP1": "Maokai", "BP2": "Azir"}),
    ] {
        let response = server
            .post("/events/draft_complete")
            .authorization_bearer(&bearer)
            .json(&json!({"game_id": &game_id, "draft": draft}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["game_id"], json!(game_id.clone()));
    }

    // The repeated one-pick draft issued no write; only two updates landed.
    assert_eq!(store.updated_rows().len(), 2);
    assert_eq!(store.appended_rows().len(), 1);
}

#[tokio::test]
async fn draft_fields_outside_the_schema_are_dropped() {
    let store = RecordingStore::default();
    let server = server_with(test_config(), Arc::new(store.clone()));
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;

    server
        .post("/events/draft_complete")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "draft": {"BP1": "Maokai", "HACK": "Y"}}))
        .await
        .assert_status_ok();

    let updates = store.updated_rows();
    assert_eq!(updates.len(), 1);
    let (row_index, row) = &updates[0];
    assert_eq!(*row_index, 5);
    // BP1 sits at column 12 of the fixed schema.
    assert_eq!(row[11], "Maokai");
    assert!(!row.contains(&"Y".to_string()));
}

#[tokio::test]
async fn draft_complete_without_active_game_is_a_client_error() {
    let server = server();
    let bearer = activate(&server).await;

    let response = server
        .post("/events/draft_complete")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": "g_test", "draft": {"BP1": "Maokai"}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "no active game for team"})
    );
}

#[tokio::test]
async fn duplicate_game_start_is_rejected_without_extra_writes() {
    let store = RecordingStore::default();
    let server = server_with(test_config(), Arc::new(store.clone()));
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;

    let first = server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "positions": {"BM": "Azir"}}))
        .await;
    first.assert_status_ok();
    assert_eq!(store.updated_rows().len(), 1);

    let second = server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "positions": {"BM": "Azir"}}))
        .await;
    second.assert_status(StatusCode::CONFLICT);
    assert_eq!(second.json::<Value>(), json!({"error": "duplicate event"}));
    assert_eq!(store.updated_rows().len(), 1);
}

#[tokio::test]
async fn game_start_merges_only_position_columns() {
    let store = RecordingStore::default();
    let server = server_with(test_config(), Arc::new(store.clone()));
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;

    server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "positions": {"BM": "Azir", "BP1": "Smuggled"}}))
        .await
        .assert_status_ok();

    let (_, row) = store.updated_rows().remove(0);
    // BM sits at column 31 of the fixed schema; BP1 must stay empty.
    assert_eq!(row[30], "Azir");
    assert_eq!(row[11], "");
}

#[tokio::test]
async fn game_finished_clears_the_session() {
    let server = server();
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;

    let response = server
        .post("/events/game_finished")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "win": "W"}))
        .await;
    response.assert_status_ok();

    let heartbeat = server
        .post("/client/heartbeat")
        .authorization_bearer(&bearer)
        .json(&json!({"player_id": "p1", "role": "MID", "version": "1.0.0"}))
        .await;
    heartbeat.assert_status_ok();
    assert_eq!(heartbeat.json::<Value>()["message"], json!("no ongoing game"));

    // With the session gone, a repeat finish is a state error, not a dupe.
    let repeat = server
        .post("/events/game_finished")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "win": "W"}))
        .await;
    repeat.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stream_ready_dedupes_per_role() {
    let server = server();
    let bearer = activate(&server).await;

    let body = json!({
        "game_id": "g_test",
        "role": "MID",
        "vod_url": "https://vod.example/mid",
        "platform": "youtube",
    });
    server
        .post("/events/stream_ready")
        .authorization_bearer(&bearer)
        .json(&body)
        .await
        .assert_status_ok();

    let duplicate = server
        .post("/events/stream_ready")
        .authorization_bearer(&bearer)
        .json(&body)
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>(), json!({"error": "duplicate event"}));

    let other_role = server
        .post("/events/stream_ready")
        .authorization_bearer(&bearer)
        .json(&json!({
            "game_id": "g_test",
            "role": "TOP",
            "vod_url": "https://vod.example/top",
            "platform": "server",
            "player_id": "p1",
        }))
        .await;
    other_role.assert_status_ok();
}

#[tokio::test]
async fn missing_game_id_is_a_validation_error() {
    let server = server();
    let bearer = activate(&server).await;

    let response = server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"positions": {"BM": "Azir"}}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn failed_store_update_surfaces_as_bad_gateway() {
    let store = RecordingStore::failing_updates();
    let server = server_with(test_config(), Arc::new(store.clone()));
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;

    let response = server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "positions": {"BM": "Azir"}}))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "failed to update game row in sheets"})
    );

    // The dedupe key was not committed: the retry fails on the store again
    // instead of reporting a duplicate.
    let retry = server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "positions": {"BM": "Azir"}}))
        .await;
    retry.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn admin_routes_require_configuration() {
    let server = server();
    let response = server
        .post("/admin/teams")
        .authorization_bearer("whatever")
        .json(&json!({"team_tricode": "KC", "team_name": "Karmine Corp", "league": "LEC"}))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "admin bearer not configured"})
    );
}

#[tokio::test]
async fn admin_routes_check_the_admin_bearer() {
    let mut config = test_config();
    config.auth.admin_bearer = Some(ADMIN_BEARER.to_string());
    let server = server_with(config, Arc::new(DisabledRowStore));

    let rejected = server
        .post("/admin/teams")
        .authorization_bearer("wrong")
        .json(&json!({"team_tricode": "KC", "team_name": "Karmine Corp", "league": "LEC"}))
        .await;
    rejected.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        rejected.json::<Value>(),
        json!({"error": "invalid admin bearer"})
    );

    let created = server
        .post("/admin/teams")
        .authorization_bearer(ADMIN_BEARER)
        .json(&json!({"team_tricode": "KC", "team_name": "Karmine Corp", "league": "LEC"}))
        .await;
    created.assert_status_ok();
    assert!(created.json::<Value>()["team_id"]
        .as_str()
        .is_some_and(|id| id.starts_with("t_")));

    let player = server
        .post("/admin/players")
        .authorization_bearer(ADMIN_BEARER)
        .json(&json!({"team_tricode": "KC", "role": "MID", "player_name": "Saken"}))
        .await;
    player.assert_status_ok();
    assert!(player.json::<Value>()["player_id"]
        .as_str()
        .is_some_and(|id| id.starts_with("p_")));
}

#[tokio::test]
async fn healthcheck_reflects_store_availability() {
    let degraded = server();
    let response = degraded.get("/healthcheck").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"status": "degraded"}));

    let healthy = server_with(test_config(), Arc::new(RecordingStore::default()));
    let response = healthy.get("/healthcheck").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"status": "ok"}));
}

#[tokio::test]
async fn full_game_lifecycle_round_trip() {
    let store = RecordingStore::default();
    let server = server_with(test_config(), Arc::new(store.clone()));
    let bearer = activate(&server).await;
    let game_id = start_game(&server, &bearer).await;
    assert_eq!(store.appended_rows().len(), 1);

    server
        .post("/events/draft_complete")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "draft": {"BP1": "Maokai"}}))
        .await
        .assert_status_ok();
    server
        .post("/events/game_start")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "positions": {"BM": "Azir"}}))
        .await
        .assert_status_ok();
    server
        .post("/events/game_finished")
        .authorization_bearer(&bearer)
        .json(&json!({"game_id": &game_id, "win": "W"}))
        .await
        .assert_status_ok();

    // One append at champ select, then one in-place update per event.
    assert_eq!(store.appended_rows().len(), 1);
    let updates = store.updated_rows();
    assert_eq!(updates.len(), 3);
    let (_, final_row) = updates.last().expect("final update").clone();
    assert_eq!(final_row[0], game_id);
    assert_eq!(final_row[7], "W");
}
