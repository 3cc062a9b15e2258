//! Solver form state.

use equasolve_client::SolveParams;
use equasolve_common::methods::{self, MethodDescriptor};
use equasolve_common::EndpointKey;
use equasolve_config::FormDefaults;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Start,
    End,
    Step,
    Tolerance,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::Start,
        NumericField::End,
        NumericField::Step,
        NumericField::Tolerance,
    ];

    /// Form field name.
    pub fn name(self) -> &'static str {
        match self {
            NumericField::Start => "start",
            NumericField::End => "end",
            NumericField::Step => "step",
            NumericField::Tolerance => "tolerance",
        }
    }

    pub fn label(self, endpoint: EndpointKey) -> &'static str {
        match self {
            NumericField::Start if endpoint == EndpointKey::Task3 => "Initial guess",
            NumericField::Start => "Interval start",
            NumericField::End => "Interval end",
            NumericField::Step => "Step",
            NumericField::Tolerance => "Tolerance",
        }
    }

    /// Whether the endpoint reads this field at all.
    pub fn is_relevant(self, endpoint: EndpointKey) -> bool {
        match self {
            NumericField::Start => true,
            NumericField::End => endpoint != EndpointKey::Task3,
            NumericField::Step => endpoint == EndpointKey::Task1,
            NumericField::Tolerance => endpoint != EndpointKey::Task1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub equation: String,
    pub method: MethodDescriptor,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub tolerance: f64,
}

impl Default for FormState {
    fn default() -> Self {
        let defaults = FormDefaults::default();
        Self {
            equation: defaults.equation,
            method: *methods::default_method(),
            start: defaults.start,
            end: defaults.end,
            step: defaults.step,
            tolerance: defaults.tolerance,
        }
    }
}

impl FormState {
    pub fn from_defaults(defaults: &FormDefaults) -> Result<Self> {
        Ok(Self {
            equation: defaults.equation.clone(),
            method: *methods::method_by_id(defaults.method_id)?,
            start: defaults.start,
            end: defaults.end,
            step: defaults.step,
            tolerance: defaults.tolerance,
        })
    }

    pub fn endpoint(&self) -> EndpointKey {
        self.method.endpoint
    }

    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Start => self.start,
            NumericField::End => self.end,
            NumericField::Step => self.step,
            NumericField::Tolerance => self.tolerance,
        }
    }

    pub(crate) fn set_value(&mut self, field: NumericField, value: f64) {
        match field {
            NumericField::Start => self.start = value,
            NumericField::End => self.end = value,
            NumericField::Step => self.step = value,
            NumericField::Tolerance => self.tolerance = value,
        }
    }

    /// Fields the selected method reads, in display order.
    pub fn visible_fields(&self) -> Vec<NumericField> {
        NumericField::ALL
            .into_iter()
            .filter(|f| f.is_relevant(self.endpoint()))
            .collect()
    }

    pub fn to_params(&self) -> SolveParams {
        SolveParams {
            equation: self.equation.clone(),
            endpoint: self.endpoint(),
            start: self.start,
            end: self.end,
            step: self.step,
            tolerance: self.tolerance,
        }
    }
}
