#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use dnc_uploader::{
    adapters::SmartleadClient, config::Config, domain::DncService, server::Server, telemetry,
};
use serde_json::{Value, json};

pub const API_KEY: &str = "test-api-key";
pub const REDIRECT_URL: &str = "https://leadbird.io";

/// What the fake platform saw.
#[derive(Debug, Default)]
pub struct Recorded {
    pub client_calls: usize,
    pub submissions: Vec<Value>,
    pub api_keys: Vec<Option<String>>,
}

/// In-process stand-in for the marketing platform API.
#[derive(Clone)]
pub struct FakePlatform {
    pub clients_body: Value,
    pub clients_status: StatusCode,
    pub submit_status: StatusCode,
    pub delay: Duration,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            clients_body: json!([
                {"id": 101, "email": "owner@example.com", "name": "Olivia"},
                {"id": 102, "email": "nameless@example.com", "name": null},
            ]),
            clients_status: StatusCode::OK,
            submit_status: StatusCode::OK,
            delay: Duration::ZERO,
            recorded: Arc::default(),
        }
    }
}

impl FakePlatform {
    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }

    fn record_key(&self, query: &HashMap<String, String>) {
        self.recorded().api_keys.push(query.get("api_key").cloned());
    }
}

async fn list_clients(
    State(fake): State<FakePlatform>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    fake.record_key(&query);
    fake.recorded().client_calls += 1;
    tokio::time::sleep(fake.delay).await;
    (fake.clients_status, Json(fake.clients_body.clone())).into_response()
}

async fn add_block_list(
    State(fake): State<FakePlatform>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    fake.record_key(&query);
    fake.recorded().submissions.push(body);
    tokio::time::sleep(fake.delay).await;
    (fake.submit_status, Json(json!({"ok": true}))).into_response()
}

/// Starts the fake platform and returns its base URL.
pub async fn spawn_platform(fake: FakePlatform) -> String {
    let router = Router::new()
        .route("/api/v1/client/", get(list_clients))
        .route("/api/v1/leads/add-domain-block-list", post(add_block_list))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// Starts the application against `platform_url` and returns its base URL.
pub async fn spawn_server(platform_url: &str, overrides: &[(&str, &str)]) -> String {
    telemetry::init_tracing();

    let mut vars: HashMap<String, String> = [
        ("server.host", "127.0.0.1"),
        ("server.port", "0"),
        ("platform.base_url", platform_url),
        ("platform.api_key", API_KEY),
        ("platform.redirect_url", REDIRECT_URL),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    let config = Config::load_with_sources(Some(vars)).unwrap();

    let platform = SmartleadClient::new(&config.platform).unwrap();
    let service = DncService::new(platform, config.platform.redirect_url.clone());
    let server = Server::new(service, &config.server).await.unwrap();

    let port = server.port();
    tokio::spawn(server.run());

    format!("http://{}:{}", config.server.host, port)
}

/// Starts both the fake platform and the application.
pub async fn spawn_app(fake: FakePlatform) -> String {
    let platform_url = spawn_platform(fake).await;
    spawn_server(&platform_url, &[]).await
}
