//! equasolve-client — Equation API client.
//! - Request URL construction per method
//! - GET execution with error-message extraction
//! - Outcome type consumed by the panel

pub mod client;
pub mod request;

pub use client::{fetch_outcome, EquationApi, HttpEquationApi, Outcome, FALLBACK_ERROR_MESSAGE};
pub use request::{build_request_url, SolveParams};
