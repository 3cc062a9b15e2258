use equasolve_common::SolverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Solver(#[from] SolverError),
}
