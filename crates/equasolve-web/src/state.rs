//! Shared application state for the web server.

use equasolve_client::EquationApi;
use equasolve_panel::SolverPanel;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state injected into every Axum handler.
///
/// The panel lock is never held across a request to the Equation API.
pub struct AppState {
    pub panel: Mutex<SolverPanel>,
    pub api: Arc<dyn EquationApi>,
}

impl AppState {
    pub fn new(panel: SolverPanel, api: Arc<dyn EquationApi>) -> Self {
        Self { panel: Mutex::new(panel), api }
    }
}

pub type SharedState = Arc<AppState>;
