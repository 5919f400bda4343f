mod test_utils;

use reqwest::StatusCode;
use serde_json::Value;
use test_utils::{FrontServer, MockBackend};

#[actix_rt::test]
async fn home_reports_service_banner() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let body: Value = front.http.get(front.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "Ok");
    assert_eq!(body["backend"], backend.address.as_str());
}

#[actix_rt::test]
async fn health_includes_backend_probe() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let body: Value = front.http.get(front.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "OK");
    assert_eq!(body["backend_maintenance"], false);
}

#[actix_rt::test]
async fn wheel_json_lays_out_backend_skills() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let body: Value = front.http.get(front.url("/skills/wheel")).send().await.unwrap().json().await.unwrap();

    let segments = body["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 9);
    // three categories of three skills: 40 degrees per skill
    assert_eq!(segments[0]["startAngle"], 0.0);
    assert_eq!(segments[0]["endAngle"], 40.0);
    assert_eq!(segments[3]["startAngle"], 120.0);
    assert_eq!(segments[3]["endAngle"], 160.0);
    assert_eq!(segments[3]["category"], "Backend");
    assert_eq!(segments[8]["endAngle"], 360.0);
    assert_eq!(body["average"], 80);
    assert_eq!(body["label"], "80%");
}

#[actix_rt::test]
async fn front_pages_accept_a_trailing_slash() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let response = front.http.get(front.url("/health/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = front.http.get(front.url("/skills/wheel/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn wheel_svg_highlights_requested_skill() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let response = front
        .http
        .get(front.url("/skills/wheel.svg?active=rust"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/svg+xml");

    let svg = response.text().await.unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">80%</text>"));
    assert_eq!(svg.matches(r#"fill-opacity="1""#).count(), 1);
    assert_eq!(svg.matches(r#"fill-opacity="0.3""#).count(), 8);
    assert!(svg.contains(r#"data-skill="Rust""#));
}

#[actix_rt::test]
async fn proxies_api_calls_both_ways() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let response = front.http.get(front.url("/api/blogs/hello?preview=1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-backend"], "mock");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["slug"], "hello");

    let missing = front.http.get(front.url("/api/blogs/missing")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["detail"], "Blog post not found");
}

#[actix_rt::test]
async fn proxy_forwards_bodies_larger_than_the_default_limit() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let payload = vec![7u8; 300 * 1024];
    let response = front
        .http
        .post(front.url("/api/echo/upload"))
        .header("content-type", "application/octet-stream")
        .body(payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["received"], 300 * 1024);
}

#[actix_rt::test]
async fn proxy_keeps_trailing_slashes() {
    let backend = MockBackend::spawn().await;
    let front = FrontServer::spawn(&backend).await;

    let body: Value = front
        .http
        .get(front.url("/api/echo/blogs/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["path"], "/api/echo/blogs/");
}
