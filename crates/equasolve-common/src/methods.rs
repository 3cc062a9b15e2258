//! Solving methods offered by the Equation API and the payload shape each one returns.
//!
//! Each method targets exactly one endpoint under `/api/equation/{endpoint}`.
//! The endpoint alone decides how a successful response is classified:
//!
//! | endpoint | method                    | response    |
//! |----------|---------------------------|-------------|
//! | task1    | root separation           | SEPARATION  |
//! | task2    | bisection                 | SOLUTION    |
//! | task3    | simple iteration          | SOLUTION    |
//! | task4    | combined (chord/tangent)  | SOLUTION    |
//! | task5    | comparison of all methods | COMPARISON  |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SolverError};

/// Endpoint identifier under `/api/equation/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKey {
    Task1,
    Task2,
    Task3,
    Task4,
    Task5,
}

impl EndpointKey {
    pub const ALL: [EndpointKey; 5] = [
        EndpointKey::Task1,
        EndpointKey::Task2,
        EndpointKey::Task3,
        EndpointKey::Task4,
        EndpointKey::Task5,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EndpointKey::Task1 => "task1",
            EndpointKey::Task2 => "task2",
            EndpointKey::Task3 => "task3",
            EndpointKey::Task4 => "task4",
            EndpointKey::Task5 => "task5",
        }
    }

    /// Expected payload shape of a successful response from this endpoint.
    pub fn response_kind(self) -> ResponseKind {
        match self {
            EndpointKey::Task1 => ResponseKind::Separation,
            EndpointKey::Task2 | EndpointKey::Task3 | EndpointKey::Task4 => ResponseKind::Solution,
            EndpointKey::Task5 => ResponseKind::Comparison,
        }
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointKey {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        EndpointKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SolverError::UnknownEndpoint(s.to_string()))
    }
}

/// Classification of the payload an endpoint returns on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseKind {
    Separation,
    Solution,
    Comparison,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseKind::Separation => "SEPARATION",
            ResponseKind::Solution => "SOLUTION",
            ResponseKind::Comparison => "COMPARISON",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub endpoint: EndpointKey,
}

impl MethodDescriptor {
    pub fn response_kind(&self) -> ResponseKind {
        self.endpoint.response_kind()
    }
}

pub static METHODS: [MethodDescriptor; 5] = [
    MethodDescriptor { id: 1, name: "Root separation",           endpoint: EndpointKey::Task1 },
    MethodDescriptor { id: 2, name: "Bisection method",          endpoint: EndpointKey::Task2 },
    MethodDescriptor { id: 3, name: "Simple iteration method",   endpoint: EndpointKey::Task3 },
    MethodDescriptor { id: 4, name: "Combined method",           endpoint: EndpointKey::Task4 },
    MethodDescriptor { id: 5, name: "Comparison of all methods", endpoint: EndpointKey::Task5 },
];

/// The method selected when a panel is created without configuration.
pub fn default_method() -> &'static MethodDescriptor {
    &METHODS[0]
}

pub fn method_by_id(id: u32) -> Result<&'static MethodDescriptor> {
    METHODS
        .iter()
        .find(|m| m.id == id)
        .ok_or(SolverError::UnknownMethod(id))
}

pub fn method_by_endpoint(endpoint: EndpointKey) -> &'static MethodDescriptor {
    // METHODS holds exactly one descriptor per endpoint, in endpoint order.
    &METHODS[EndpointKey::ALL
        .iter()
        .position(|k| *k == endpoint)
        .unwrap_or_default()]
}
