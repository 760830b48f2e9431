//! Common test utilities.

use carddesk_client::{ApiClient, Config, Session, SessionStore};
use serde_json::json;

/// A client with an empty in-memory session store, pointed at a mock server.
pub fn anonymous_client(base_url: &str) -> (ApiClient, SessionStore) {
    init_tracing();
    let store = SessionStore::in_memory();
    let client =
        ApiClient::new(Config::new(base_url), store.clone()).expect("client should build");
    (client, store)
}

/// Route client tracing into test output when `RUST_LOG` asks for it.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client whose store already holds a session for `token`.
pub fn logged_in_client(base_url: &str, token: &str) -> (ApiClient, SessionStore) {
    let (client, store) = anonymous_client(base_url);
    store
        .set(Session::new(token).with_user(json!({"id": 1, "name": "Ada Lovelace"})))
        .expect("session should store");
    (client, store)
}
