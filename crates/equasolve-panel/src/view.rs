//! Display structures built from classified payloads.
//!
//! Views hold preformatted text only; front-ends decide on markup.

use equasolve_common::ResponseKind;
use serde::Serialize;
use serde_json::Value;

use crate::payload::{ComparisonEntry, Payload, PlotPoint, SolutionData};

pub const METHOD_FAILED: &str = "Method failed to find a solution";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultView {
    Separation(SeparationView),
    Solution(SolutionCard),
    Comparison(ComparisonView),
    Unexpected(SchemaNotice),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeparationView {
    pub series: Vec<PlotPoint>,
    /// Empty means the intervals section is omitted.
    pub intervals: Vec<IntervalCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalCard {
    pub label: String,
    pub bounds: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionCard {
    pub root: String,
    pub iterations: String,
    pub accuracy: String,
    pub execution_time: String,
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub entries: Vec<ComparisonCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCard {
    pub method: String,
    /// `None` renders [`METHOD_FAILED`].
    pub result: Option<SolutionCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNotice {
    pub expected: ResponseKind,
    pub reason: String,
}

impl SchemaNotice {
    pub fn message(&self) -> String {
        format!(
            "The API returned an unexpected {} response: {}",
            self.expected, self.reason
        )
    }
}

pub fn render(payload: &Payload) -> ResultView {
    match payload {
        Payload::Separation(data) => ResultView::Separation(SeparationView {
            series: data.points.clone(),
            intervals: data
                .intervals
                .iter()
                .enumerate()
                .map(|(i, (a, b))| IntervalCard {
                    label: format!("Interval {}", i + 1),
                    bounds: format!("[{:.4}, {:.4}]", a, b),
                })
                .collect(),
        }),
        Payload::Solution(data) => ResultView::Solution(solution_card(data)),
        Payload::Comparison { entries } => ResultView::Comparison(ComparisonView {
            entries: entries
                .iter()
                .map(|entry| match entry {
                    ComparisonEntry::Converged(data) => ComparisonCard {
                        method: data.method.clone().unwrap_or_default(),
                        result: Some(solution_card(data)),
                    },
                    ComparisonEntry::Failed { method } => ComparisonCard {
                        method: method.clone().unwrap_or_default(),
                        result: None,
                    },
                })
                .collect(),
        }),
        Payload::Unexpected { expected, reason } => ResultView::Unexpected(SchemaNotice {
            expected: *expected,
            reason: reason.clone(),
        }),
    }
}

fn solution_card(data: &SolutionData) -> SolutionCard {
    SolutionCard {
        root: format!("{:.6}", data.root),
        iterations: scalar(&data.iterations),
        accuracy: scalar(&data.accuracy),
        execution_time: format!("{} ms", scalar(&data.execution_time)),
        method: data.method.clone(),
    }
}

/// Raw text of a scalar field; missing fields print as nothing.
fn scalar(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::classify;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_separation_without_intervals_renders_series_only() {
        let payload = json!({ "xpoints": [0, 1, 2], "ypoints": [1, 0, -1] });
        let ResultView::Separation(view) = render(&classify(ResponseKind::Separation, &payload)) else {
            panic!("expected separation view");
        };
        assert_eq!(view.series.len(), 3);
        assert_eq!(view.series[1], PlotPoint { x: 1.0, y: Some(0.0) });
        assert!(view.intervals.is_empty());
    }

    #[test]
    fn test_interval_cards() {
        let payload = json!({ "xpoints": [0], "ypoints": [0], "intervals": [[-2.5, -2.4], [1, 1.1]] });
        let ResultView::Separation(view) = render(&classify(ResponseKind::Separation, &payload)) else {
            panic!("expected separation view");
        };
        assert_eq!(
            view.intervals,
            vec![
                IntervalCard { label: "Interval 1".into(), bounds: "[-2.5000, -2.4000]".into() },
                IntervalCard { label: "Interval 2".into(), bounds: "[1.0000, 1.1000]".into() },
            ]
        );
    }

    #[test]
    fn test_solution_card_formatting() {
        let payload = json!({
            "root": 0.7390851332, "iterations": 14, "accuracy": 0.0001,
            "executionTime": 3, "method": "Bisection"
        });
        let view = render(&classify(ResponseKind::Solution, &payload));
        assert_eq!(
            view,
            ResultView::Solution(SolutionCard {
                root: "0.739085".into(),
                iterations: "14".into(),
                accuracy: "0.0001".into(),
                execution_time: "3 ms".into(),
                method: Some("Bisection".into()),
            })
        );
    }

    #[test]
    fn test_missing_scalars_print_empty() {
        let payload = json!({ "root": 1 });
        let ResultView::Solution(card) = render(&classify(ResponseKind::Solution, &payload)) else {
            panic!("expected solution view");
        };
        assert_eq!(card.iterations, "");
        assert_eq!(card.execution_time, " ms");
        assert_eq!(card.method, None);
    }

    #[test]
    fn test_comparison_failure_indicator() {
        let payload = json!([
            { "method": "Bisection", "root": 0.739085, "iterations": 14, "accuracy": 0.0001, "executionTime": 2 },
            { "method": "Simple iteration", "iterations": 1000 }
        ]);
        let ResultView::Comparison(view) = render(&classify(ResponseKind::Comparison, &payload)) else {
            panic!("expected comparison view");
        };
        assert_eq!(view.entries[0].method, "Bisection");
        assert_eq!(view.entries[0].result.as_ref().unwrap().root, "0.739085");
        assert_eq!(view.entries[1].method, "Simple iteration");
        assert_eq!(view.entries[1].result, None);
    }

    #[test]
    fn test_unexpected_notice() {
        let view = render(&classify(ResponseKind::Comparison, &json!({})));
        let ResultView::Unexpected(notice) = view else { panic!("expected notice") };
        assert!(notice.message().contains("COMPARISON"));
    }
}
