mod common;

use reqwest::Client;
use serde_json::Value;

#[tokio::test]
async fn test_health_check_works() {
    let addr = common::spawn_app(common::FakePlatform::default()).await;

    let response = Client::new()
        .get(format!("{addr}/health"))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "dnc-uploader");
}

#[tokio::test]
async fn test_index_serves_upload_form() {
    let addr = common::spawn_app(common::FakePlatform::default()).await;

    let response = Client::new().get(format!("{addr}/")).send().await.unwrap();

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    let body = response.text().await.unwrap();
    assert!(body.contains("name=\"platform_email\""));
    assert!(body.contains("/submit-blocklist"));
}
