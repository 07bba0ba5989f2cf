#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tinylink::application::services::LinkService;
use tinylink::infrastructure::persistence::InMemoryLinkRepository;
use tinylink::routes;
use tinylink::state::AppState;
use tinylink::utils::code_generator::CodeGenerator;

pub const BASE_URL: &str = "https://sho.rt";

pub fn create_test_state(base_url: Option<&str>) -> AppState {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let service = LinkService::with_generator(repository, CodeGenerator::from_seed(42));

    AppState::new(Arc::new(service), base_url.map(str::to_string))
}

pub fn make_server() -> TestServer {
    make_server_with_base(Some(BASE_URL))
}

pub fn make_server_with_base(base_url: Option<&str>) -> TestServer {
    let app = routes::router(create_test_state(base_url), None);
    TestServer::new(app).unwrap()
}

pub async fn create_link(server: &TestServer, url: &str, custom_code: Option<&str>) -> Value {
    let body = match custom_code {
        Some(code) => json!({ "original_url": url, "custom_code": code }),
        None => json!({ "original_url": url }),
    };

    let response = server.post("/api/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
