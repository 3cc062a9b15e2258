//! Panel routes driven through the router with a scripted Equation API.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use equasolve_client::Outcome;
use equasolve_config::FormDefaults;
use equasolve_panel::SolverPanel;
use equasolve_test_utils::{fixtures, StubApi};
use equasolve_web::{router::build_router, state::AppState};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

fn app(api: Arc<StubApi>) -> Router {
    let base = Url::parse("http://localhost:9090").unwrap();
    let panel = SolverPanel::new(base, &FormDefaults::default()).unwrap();
    build_router(AppState::new(panel, api))
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn page(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_initial_page() {
    let app = app(Arc::new(StubApi::always(Outcome::Success(fixtures::solution()))));
    let html = page(&app).await;

    assert!(html.contains(r#"value="sin(x)""#));
    assert!(html.contains(r#"<option value="1" selected>Root separation</option>"#));
    assert!(html.contains("Interval start"));
    assert!(html.contains(r#"name="step""#));
    assert!(!html.contains(r#"name="tolerance""#));
    assert!(!html.contains("API request:"));
}

#[tokio::test]
async fn test_solve_renders_solution_and_redirects() {
    let api = Arc::new(StubApi::always(Outcome::Success(fixtures::solution())));
    let app = app(api.clone());

    let response = app
        .clone()
        .oneshot(post_form("/solve", "equation=cos%28x%29-x&method=2&start=0&end=1&tolerance=0.001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path(), "/api/equation/task2");
    assert_eq!(calls[0].query(), Some("equation=cos%28x%29-x&a=0&b=1&tolerance=0.001"));

    let html = page(&app).await;
    assert!(html.contains("0.739085"));
    assert!(html.contains("3 ms"));
    assert!(html.contains("Solve equation"));
}

#[tokio::test]
async fn test_failure_shows_error_banner() {
    let api = Arc::new(StubApi::always(Outcome::Failure("Invalid <equation>".into())));
    let app = app(api);

    app.clone().oneshot(post_form("/solve", "method=1")).await.unwrap();
    let html = page(&app).await;
    assert!(html.contains(r#"<div class="alert alert-error">Invalid &lt;equation&gt;</div>"#));
}

#[tokio::test]
async fn test_generate_api_url_preview() {
    let api = Arc::new(StubApi::always(Outcome::Success(fixtures::separation())));
    let app = app(api.clone());

    let response = app
        .clone()
        .oneshot(post_form("/api-url", "equation=x%5E2-4&method=3&start=1.5&tolerance=0.01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(api.calls().is_empty());

    let html = page(&app).await;
    assert!(html.contains("API request:"));
    assert!(html.contains("http://localhost:9090/api/equation/task3?equation=x%5E2-4&amp;initialGuess=1.5&amp;tolerance=0.01"));
    assert!(html.contains("Initial guess"));
    assert!(html.contains(r#"class="btn btn-copy" data-url="http://localhost:9090/api/equation/task3?"#));
}

#[tokio::test]
async fn test_invalid_numeric_text_keeps_previous_value() {
    let api = Arc::new(StubApi::always(Outcome::Success(fixtures::separation())));
    let app = app(api.clone());

    app.clone().oneshot(post_form("/form", "start=abc&end=5")).await.unwrap();
    let html = page(&app).await;
    assert!(html.contains(r#"name="start" value="-10""#));
    assert!(html.contains(r#"name="end" value="5""#));
}

#[tokio::test]
async fn test_preset_replaces_equation() {
    let app = app(Arc::new(StubApi::always(Outcome::Success(fixtures::separation()))));

    let response = app.clone().oneshot(post_form("/preset/1", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = page(&app).await;
    let preset = equasolve_common::presets::preset_by_id(1).unwrap();
    assert!(html.contains(&format!(r#"id="equation" name="equation" value="{}""#, preset.equation)));
}

#[tokio::test]
async fn test_preset_keeps_pending_form_edits() {
    let app = app(Arc::new(StubApi::always(Outcome::Success(fixtures::separation()))));

    let response = app
        .clone()
        .oneshot(post_form("/preset/2", "equation=x&method=2&start=-3&end=4&tolerance=0.01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = page(&app).await;
    assert!(html.contains(r#"id="equation" name="equation" value="x-10sin(x)=0""#));
    assert!(html.contains(r#"<option value="2" selected>Bisection method</option>"#));
    assert!(html.contains(r#"name="start" value="-3""#));
    assert!(html.contains(r#"name="end" value="4""#));
    assert!(html.contains(r#"name="tolerance" value="0.01""#));
}

#[tokio::test]
async fn test_numeric_prefix_is_committed() {
    let app = app(Arc::new(StubApi::always(Outcome::Success(fixtures::separation()))));

    app.clone().oneshot(post_form("/form", "start=12abc&step=1e")).await.unwrap();
    let html = page(&app).await;
    assert!(html.contains(r#"name="start" value="12""#));
    assert!(html.contains(r#"name="step" value="1""#));
}

#[tokio::test]
async fn test_unknown_preset_and_method_are_rejected() {
    let app = app(Arc::new(StubApi::always(Outcome::Success(fixtures::separation()))));

    let response = app.clone().oneshot(post_form("/preset/99", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(post_form("/form", "method=9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_separation_plot_and_comparison() {
    let api = Arc::new(StubApi::scripted(
        vec![Outcome::Success(fixtures::separation())],
        Outcome::Success(fixtures::comparison()),
    ));
    let app = app(api);

    app.clone().oneshot(post_form("/solve", "method=1")).await.unwrap();
    let html = page(&app).await;
    assert!(html.contains("<svg"));
    assert!(html.contains("Interval 1"));

    app.clone().oneshot(post_form("/solve", "method=5")).await.unwrap();
    let html = page(&app).await;
    assert!(!html.contains("<svg"));
    assert!(html.contains("Method comparison"));
    assert!(html.contains(equasolve_panel::view::METHOD_FAILED));
}

#[tokio::test]
async fn test_stylesheet() {
    let app = app(Arc::new(StubApi::always(Outcome::Failure(String::new()))));
    let response = app
        .oneshot(Request::builder().uri("/static/panel.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
}
