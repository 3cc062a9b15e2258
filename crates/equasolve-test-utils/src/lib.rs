//! Shared testing utilities for Equasolve.
//!
//! - [`StubApi`]: scripted in-memory `EquationApi`
//! - [`spawn_stub_server`]: serve an axum router on an ephemeral local port
//! - [`fixtures`]: representative Equation API payloads

use async_trait::async_trait;
use equasolve_client::{EquationApi, Outcome};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

pub use pretty_assertions;

/// In-memory Equation API returning scripted outcomes in order, then `fallback`.
pub struct StubApi {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    calls: Mutex<Vec<Url>>,
}

impl StubApi {
    /// Answers every request with `outcome`.
    pub fn always(outcome: Outcome) -> Self {
        Self::scripted(Vec::new(), outcome)
    }

    pub fn scripted(outcomes: Vec<Outcome>, fallback: Outcome) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// URLs received so far, oldest first.
    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EquationApi for StubApi {
    async fn execute(&self, url: &Url) -> Outcome {
        self.calls.lock().unwrap().push(url.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port.
/// Returns the base URL and the server task.
pub async fn spawn_stub_server(router: axum::Router) -> (Url, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr: SocketAddr = listener.local_addr().expect("stub server address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    let base = Url::parse(&format!("http://{}", addr)).expect("stub server URL");
    (base, handle)
}

/// A local URL nothing is listening on.
pub async fn unreachable_base() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    Url::parse(&format!("http://{}", addr)).expect("probe URL")
}

pub mod fixtures {
    use serde_json::{json, Value};

    /// task1 response: f(x) = 1 - x sampled at three points, one bracketing interval.
    pub fn separation() -> Value {
        json!({
            "xpoints": [0.0, 1.0, 2.0],
            "ypoints": [1.0, 0.0, -1.0],
            "intervals": [[0.5, 1.5]]
        })
    }

    pub fn separation_without_intervals() -> Value {
        json!({ "xpoints": [0, 1, 2], "ypoints": [1, 0, -1] })
    }

    pub fn solution() -> Value {
        json!({
            "root": 0.7390851332,
            "iterations": 14,
            "accuracy": 0.0001,
            "executionTime": 3,
            "method": "Bisection"
        })
    }

    /// task5 response where simple iteration diverged.
    pub fn comparison() -> Value {
        json!([
            { "method": "Bisection", "root": 0.739085, "iterations": 14, "accuracy": 0.0001, "executionTime": 2 },
            { "method": "Simple iteration", "iterations": 1000, "executionTime": 5 },
            { "method": "Combined", "root": 0.739085, "iterations": 4, "accuracy": 0.00001, "executionTime": 1 }
        ])
    }
}
