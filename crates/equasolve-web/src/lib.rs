//! equasolve-web — Web front-end for the solver panel.
//! Server-rendered HTML over one shared panel session:
//!   - Equation form with preset picker and method selector
//!   - Solve / generate-API-request actions
//!   - Function plot, root card, and method comparison views

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

/// Bind `addr` and serve the panel until the process is stopped.
pub async fn serve(state: state::AppState, addr: &str) -> anyhow::Result<()> {
    let router = router::build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Solver panel listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
