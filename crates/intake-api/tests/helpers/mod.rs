//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p intake-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use intake_api::setup::routes;
use intake_api::state::AppState;
use intake_core::{Config, IntakeConfig};
use intake_storage::{LocalStorage, Storage};
use std::collections::HashMap;
use std::sync::Arc;

use storage::TestStorage;

pub const UPLOAD_PATH: &str = "/api/upload";

/// Test application: server plus the storage directory it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub storage: TestStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Build a `Config` from explicit values, ignoring the process environment.
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = IntakeConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test config");
    Config(Box::new(config))
}

fn server_for(config: &Config, storage: Arc<dyn Storage>) -> TestServer {
    let state = Arc::new(AppState::new(storage));
    let router = routes::setup_routes(config, state).expect("Failed to setup routes");
    TestServer::new(router).expect("Failed to create test server")
}

/// Setup test app backed by local storage in a temp directory.
pub async fn setup_test_app() -> TestApp {
    let test_storage = TestStorage::new();
    let base_path = test_storage.base_path_str();
    let config = test_config(&[
        ("STORAGE_BACKEND", "local"),
        ("LOCAL_STORAGE_PATH", base_path.as_str()),
        ("LOCAL_STORAGE_BASE_URL", test_storage.base_url.as_str()),
        ("MAX_UPLOAD_SIZE_MB", "1"),
    ]);

    let storage = LocalStorage::new(&test_storage.base_path, test_storage.base_url.clone())
        .await
        .expect("Failed to create local storage");

    TestApp {
        server: server_for(&config, Arc::new(storage)),
        storage: test_storage,
    }
}

/// Setup test app whose storage rejects every object.
pub fn setup_failing_app() -> TestServer {
    let config = test_config(&[]);
    server_for(&config, Arc::new(storage::FailingStorage))
}
