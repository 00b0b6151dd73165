//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use serde_json::{json, Value};
use staffdesk_server::{create_app, AppState, Config};

pub(crate) fn test_config(seed: bool) -> Config {
    Config {
        port: 0,
        seed_demo_data: seed,
        ..Config::default()
    }
}

pub(crate) fn test_server_for_config(config: Config) -> (TestServer, AppState) {
    let state = AppState::new(config);
    let app = create_app(state.clone(), false);
    let server = TestServer::new(app).expect("server");
    (server, state)
}

pub(crate) fn setup_test_server() -> TestServer {
    test_server_for_config(test_config(false)).0
}

pub(crate) fn setup_seeded_server() -> TestServer {
    test_server_for_config(test_config(true)).0
}

pub(crate) fn draft_body(name: &str, salary: f64) -> Value {
    json!({
        "name": name,
        "email": "dana@test.com",
        "position": "Analyst",
        "salary": salary,
        "startDate": "2024-02-29",
        "employmentType": "Part-time"
    })
}
