use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use equasolve_panel::PanelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<PanelError> for WebError {
    fn from(err: PanelError) -> Self {
        WebError::BadRequest(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejected panel request");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
