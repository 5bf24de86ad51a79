//! Shared test helpers

#![allow(dead_code)]

#[cfg(feature = "server")]
pub mod server {
    use std::sync::Arc;

    use axum_test::TestServer;
    use jsonshare::backend::relay::RelayHub;
    use jsonshare::backend::routes::create_router;
    use jsonshare::backend::server::AppState;
    use jsonshare::backend::store::MemoryStore;

    /// Spin up a test server over an empty in-memory store
    pub fn test_server() -> TestServer {
        let state = AppState::new(Arc::new(MemoryStore::new()), RelayHub::new());
        TestServer::new(create_router(state)).unwrap()
    }

    /// Same as [`test_server`] but over real HTTP, for WebSocket tests
    pub fn test_server_http() -> TestServer {
        let state = AppState::new(Arc::new(MemoryStore::new()), RelayHub::new());
        TestServer::builder()
            .http_transport()
            .build(create_router(state))
            .unwrap()
    }

    /// Create a share link through the API and return its slug
    pub async fn create_link(server: &TestServer, body: serde_json::Value) -> String {
        let response = server.post("/api/share").json(&body).await;
        assert_eq!(response.status_code().as_u16(), 201, "{}", response.text());
        response.json::<serde_json::Value>()["slug"]
            .as_str()
            .unwrap()
            .to_string()
    }
}
