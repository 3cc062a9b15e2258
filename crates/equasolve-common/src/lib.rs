//! equasolve-common — Shared types, errors, and catalogs used across all Equasolve crates.

pub mod error;
pub mod methods;
pub mod presets;
pub mod sandbox;

// Re-export commonly used types
pub use error::{Result, SolverError};
pub use methods::{EndpointKey, MethodDescriptor, ResponseKind, METHODS};
pub use presets::{PresetEquation, PRESET_EQUATIONS};
