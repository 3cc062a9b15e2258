//! The solver panel state machine.
//!
//! ```text
//!   Idle ──solve──▶ Loading ──complete──▶ Resolved
//!                     ▲  │                    │
//!                     └──┴──────solve─────────┘
//! ```
//!
//! A solve always clears the previous results, error and API URL preview
//! before the request is issued. Each solve gets a fresh [`RequestId`]; only
//! the completion carrying the latest id is applied, so a slow earlier response
//! can never overwrite a newer one.

use chrono::{DateTime, Utc};
use equasolve_client::{fetch_outcome, request::build_request_url, EquationApi, Outcome, SolveParams};
use equasolve_common::presets;
use equasolve_common::{methods, ResponseKind};
use equasolve_config::FormDefaults;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::clipboard::{copy_to_clipboard, Clipboard};
use crate::error::Result;
use crate::form::{FormState, NumericField};
use crate::number_input::NumericBuffer;
use crate::payload::{classify, Payload};
use crate::view::{render, ResultView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading { request: RequestId },
    Resolved,
}

/// What a completed solve left behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub request: RequestId,
    /// Kind of the method the request was issued with.
    pub kind: ResponseKind,
    pub outcome: Outcome,
    /// Present for successful outcomes.
    pub payload: Option<Payload>,
    pub resolved_at: DateTime<Utc>,
}

/// Handed out by [`SolverPanel::begin_solve`]; carries everything needed to
/// execute the request without holding the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveTicket {
    pub request: RequestId,
    pub kind: ResponseKind,
    pub base_url: Url,
    pub params: SolveParams,
}

impl SolveTicket {
    pub async fn execute(&self, api: &dyn EquationApi) -> Outcome {
        fetch_outcome(api, &self.base_url, &self.params).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer solve was issued (or this one already completed); discarded.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct NumericInputs {
    start: NumericBuffer,
    end: NumericBuffer,
    step: NumericBuffer,
    tolerance: NumericBuffer,
}

impl NumericInputs {
    fn from_form(form: &FormState) -> Self {
        Self {
            start: NumericBuffer::new(form.start),
            end: NumericBuffer::new(form.end),
            step: NumericBuffer::new(form.step),
            tolerance: NumericBuffer::new(form.tolerance),
        }
    }

    fn get(&self, field: NumericField) -> &NumericBuffer {
        match field {
            NumericField::Start => &self.start,
            NumericField::End => &self.end,
            NumericField::Step => &self.step,
            NumericField::Tolerance => &self.tolerance,
        }
    }

    fn get_mut(&mut self, field: NumericField) -> &mut NumericBuffer {
        match field {
            NumericField::Start => &mut self.start,
            NumericField::End => &mut self.end,
            NumericField::Step => &mut self.step,
            NumericField::Tolerance => &mut self.tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverPanel {
    base_url: Url,
    form: FormState,
    inputs: NumericInputs,
    phase: Phase,
    resolution: Option<Resolution>,
    api_url: Option<String>,
    last_request: u64,
}

impl SolverPanel {
    pub fn new(base_url: Url, defaults: &FormDefaults) -> Result<Self> {
        let form = FormState::from_defaults(defaults)?;
        Ok(Self::with_form(base_url, form))
    }

    pub fn with_form(base_url: Url, form: FormState) -> Self {
        let inputs = NumericInputs::from_form(&form);
        Self {
            base_url,
            form,
            inputs,
            phase: Phase::Idle,
            resolution: None,
            api_url: None,
            last_request: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Displayed text of a numeric input.
    pub fn input_text(&self, field: NumericField) -> &str {
        self.inputs.get(field).text()
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn results(&self) -> Option<&serde_json::Value> {
        match self.resolution.as_ref().map(|r| &r.outcome) {
            Some(Outcome::Success(payload)) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self.resolution.as_ref().map(|r| &r.outcome) {
            Some(Outcome::Failure(message)) => Some(message),
            _ => None,
        }
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// View of the current results, dispatched on the kind of the method
    /// that produced them.
    pub fn view(&self) -> Option<ResultView> {
        self.resolution
            .as_ref()
            .and_then(|r| r.payload.as_ref())
            .map(render)
    }

    // ── Form input ───────────────────────────────────────────────────────────

    pub fn set_equation(&mut self, equation: impl Into<String>) {
        self.form.equation = equation.into();
    }

    pub fn apply_preset(&mut self, id: u32) -> Result<()> {
        let preset = presets::preset_by_id(id)?;
        self.form.equation = preset.equation.to_string();
        Ok(())
    }

    pub fn select_method(&mut self, id: u32) -> Result<()> {
        self.form.method = *methods::method_by_id(id)?;
        Ok(())
    }

    /// A keystroke in a numeric input.
    pub fn edit_field(&mut self, field: NumericField, raw: impl Into<String>) {
        if let Some(value) = self.inputs.get_mut(field).edit(raw) {
            self.form.set_value(field, value);
        }
    }

    /// A numeric input lost focus.
    pub fn blur_field(&mut self, field: NumericField) {
        if let Some(value) = self.inputs.get_mut(field).blur() {
            self.form.set_value(field, value);
        }
    }

    /// Whole-value entry (form submit, command line): edit then blur.
    pub fn enter_field(&mut self, field: NumericField, raw: impl Into<String>) {
        self.edit_field(field, raw);
        self.blur_field(field);
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    /// Build the request URL for the current form and keep it as a preview.
    pub fn generate_api_url(&mut self) -> Result<&str> {
        let url = build_request_url(&self.base_url, &self.form.to_params())?;
        Ok(self.api_url.insert(url.to_string()).as_str())
    }

    /// Copy the URL preview. Returns whether anything was copied.
    pub fn copy_api_url(&self, clipboard: &mut dyn Clipboard) -> bool {
        match self.api_url {
            Some(ref url) => copy_to_clipboard(clipboard, url),
            None => false,
        }
    }

    /// Enter Loading. Clears results, error and URL preview first.
    /// A solve issued while another is in flight supersedes it.
    pub fn begin_solve(&mut self) -> SolveTicket {
        self.resolution = None;
        self.api_url = None;

        if let Phase::Loading { request } = self.phase {
            debug!(superseded = request.get(), "Solve issued while another is in flight");
        }

        self.last_request += 1;
        let request = RequestId(self.last_request);
        self.phase = Phase::Loading { request };

        let ticket = SolveTicket {
            request,
            kind: self.form.method.response_kind(),
            base_url: self.base_url.clone(),
            params: self.form.to_params(),
        };
        info!(
            request = request.get(),
            endpoint = %ticket.params.endpoint,
            equation = %ticket.params.equation,
            "Solve started"
        );
        ticket
    }

    /// Apply the outcome of `ticket` if it is still the latest solve.
    pub fn complete(&mut self, ticket: &SolveTicket, outcome: Outcome) -> Completion {
        if self.phase != (Phase::Loading { request: ticket.request }) {
            debug!(
                request = ticket.request.get(),
                latest = self.last_request,
                "Discarding stale solve outcome"
            );
            return Completion::Stale;
        }

        let payload = match outcome {
            Outcome::Success(ref body) => {
                let payload = classify(ticket.kind, body);
                if let Payload::Unexpected { ref reason, .. } = payload {
                    warn!(request = ticket.request.get(), kind = %ticket.kind, %reason, "Unexpected response shape");
                }
                Some(payload)
            }
            Outcome::Failure(ref message) => {
                warn!(request = ticket.request.get(), %message, "Solve failed");
                None
            }
        };

        self.resolution = Some(Resolution {
            request: ticket.request,
            kind: ticket.kind,
            outcome,
            payload,
            resolved_at: Utc::now(),
        });
        self.phase = Phase::Resolved;
        Completion::Applied
    }

    /// begin, execute, complete in one go, for callers that own the panel
    /// across the await.
    pub async fn solve(&mut self, api: &dyn EquationApi) -> Completion {
        let ticket = self.begin_solve();
        let outcome = ticket.execute(api).await;
        self.complete(&ticket, outcome)
    }
}
