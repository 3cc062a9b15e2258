//! Typed classification of successful Equation API payloads.
//!
//! The response kind comes from the method that issued the request, not from
//! the payload. A payload that does not fit its kind becomes
//! [`Payload::Unexpected`] instead of rendering as an empty panel.

use equasolve_common::ResponseKind;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Separation(SeparationData),
    Solution(SolutionData),
    Comparison { entries: Vec<ComparisonEntry> },
    Unexpected { expected: ResponseKind, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    /// `None` when `ypoints` is shorter than `xpoints` or holds a non-number.
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeparationData {
    pub points: Vec<PlotPoint>,
    /// Root-bracketing intervals; malformed entries are dropped.
    pub intervals: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionData {
    pub root: f64,
    pub iterations: Option<Value>,
    pub accuracy: Option<Value>,
    pub execution_time: Option<Value>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonEntry {
    Converged(SolutionData),
    /// The method did not converge (no `root` in its entry).
    Failed { method: Option<String> },
}

pub fn classify(kind: ResponseKind, payload: &Value) -> Payload {
    let classified = match kind {
        ResponseKind::Separation => separation(payload).map(Payload::Separation),
        ResponseKind::Solution => solution(payload).map(Payload::Solution),
        ResponseKind::Comparison => comparison(payload).map(|entries| Payload::Comparison { entries }),
    };
    classified.unwrap_or_else(|reason| Payload::Unexpected { expected: kind, reason })
}

/// Number, or a string holding one (the API is not consistent about this).
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn present(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

fn separation(payload: &Value) -> Result<SeparationData, String> {
    let xs = payload["xpoints"]
        .as_array()
        .ok_or_else(|| "`xpoints` is missing or not a sequence".to_string())?;
    let ys = payload["ypoints"].as_array();

    let points = xs
        .iter()
        .enumerate()
        .filter_map(|(i, x)| {
            let y = ys.and_then(|ys| ys.get(i)).and_then(as_number);
            as_number(x).map(|x| PlotPoint { x, y })
        })
        .collect();

    let intervals = payload["intervals"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|pair| {
                    let pair = pair.as_array()?;
                    Some((as_number(pair.first()?)?, as_number(pair.get(1)?)?))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(SeparationData { points, intervals })
}

fn solution_fields(entry: &Value) -> Option<SolutionData> {
    let root = as_number(entry.get("root")?)?;
    Some(SolutionData {
        root,
        iterations: present(&entry["iterations"]),
        accuracy: present(&entry["accuracy"]),
        execution_time: present(&entry["executionTime"]),
        method: entry["method"].as_str().map(String::from),
    })
}

fn solution(payload: &Value) -> Result<SolutionData, String> {
    if !payload.is_object() {
        return Err("expected an object".to_string());
    }
    match payload.get("root") {
        None | Some(Value::Null) => Err("`root` is missing".to_string()),
        Some(_) => solution_fields(payload).ok_or_else(|| "`root` is not a number".to_string()),
    }
}

fn comparison(payload: &Value) -> Result<Vec<ComparisonEntry>, String> {
    let entries = payload
        .as_array()
        .ok_or_else(|| "expected a sequence of method results".to_string())?;

    Ok(entries
        .iter()
        .map(|entry| match solution_fields(entry) {
            Some(data) => ComparisonEntry::Converged(data),
            None => ComparisonEntry::Failed {
                method: entry["method"].as_str().map(String::from),
            },
        })
        .collect())
}
