//! Request URL construction.
//!
//! Every request carries `equation`; the remaining query parameters depend on
//! the endpoint:
//!
//!   task1              → start, end, step
//!   task2, task4, task5 → a (=start), b (=end), tolerance
//!   task3              → initialGuess (=start), tolerance
//!
//! Nothing is validated here. Malformed equations or inverted intervals are
//! forwarded as-is and rejected (or not) by the API.

use equasolve_common::{EndpointKey, Result, SolverError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Everything needed to address one solve on the Equation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveParams {
    pub equation: String,
    pub endpoint: EndpointKey,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub tolerance: f64,
}

impl SolveParams {
    /// Ordered query parameters for this request.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("equation", self.equation.clone())];
        match self.endpoint {
            EndpointKey::Task1 => {
                pairs.push(("start", number(self.start)));
                pairs.push(("end", number(self.end)));
                pairs.push(("step", number(self.step)));
            }
            EndpointKey::Task2 | EndpointKey::Task4 | EndpointKey::Task5 => {
                pairs.push(("a", number(self.start)));
                pairs.push(("b", number(self.end)));
                pairs.push(("tolerance", number(self.tolerance)));
            }
            EndpointKey::Task3 => {
                pairs.push(("initialGuess", number(self.start)));
                pairs.push(("tolerance", number(self.tolerance)));
            }
        }
        pairs
    }
}

/// Shortest decimal that round-trips: `-10`, `0.1`, `0.0001`.
/// Never exponent notation: 1e-7 goes out as `0.0000001`, not `1e-7`.
fn number(value: f64) -> String {
    format!("{}", value)
}

/// Build `{base}/api/equation/{endpoint}?equation=...&...`.
///
/// Pure: the same `base` and `params` always yield the same bytes.
pub fn build_request_url(base: &Url, params: &SolveParams) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| SolverError::NotABase(base.to_string()))?
        .pop_if_empty()
        .extend(["api", "equation", params.endpoint.as_str()]);

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.query_pairs() {
            query.append_pair(key, &value);
        }
    }
    Ok(url)
}
