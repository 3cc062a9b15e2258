use axum::{http::header, response::IntoResponse};

pub const PANEL_CSS: &str = include_str!("../../templates/panel.css");

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], PANEL_CSS)
}
