//! equasolve-panel — The solver panel model.
//! Front-end independent: form fields, numeric text buffering, the
//! Idle → Loading → Resolved state machine, payload classification,
//! display views, and clipboard hand-off.

pub mod clipboard;
pub mod error;
pub mod form;
pub mod number_input;
pub mod payload;
pub mod state;
pub mod view;

pub use error::{PanelError, Result};
pub use form::{FormState, NumericField};
pub use number_input::NumericBuffer;
pub use payload::Payload;
pub use state::{Completion, Phase, RequestId, SolveTicket, SolverPanel};
pub use view::ResultView;
