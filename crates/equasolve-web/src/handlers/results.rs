//! HTML for result views: function plot, root cards, method comparison.

use equasolve_panel::view::{
    ComparisonView, SeparationView, SolutionCard, METHOD_FAILED,
};
use equasolve_panel::payload::PlotPoint;
use equasolve_panel::ResultView;

use super::escape_html;

const PLOT_WIDTH: f64 = 720.0;
const PLOT_HEIGHT: f64 = 360.0;
const PLOT_PAD: f64 = 24.0;

pub fn view_html(view: &ResultView) -> String {
    match view {
        ResultView::Separation(sep) => separation_html(sep),
        ResultView::Solution(card) => format!(
            r#"<section class="card"><h2>Solution</h2>{}</section>"#,
            solution_grid(card, true)
        ),
        ResultView::Comparison(cmp) => comparison_html(cmp),
        ResultView::Unexpected(notice) => format!(
            r#"<div class="alert alert-warning">{}</div>"#,
            escape_html(&notice.message())
        ),
    }
}

fn separation_html(view: &SeparationView) -> String {
    let intervals = if view.intervals.is_empty() {
        String::new()
    } else {
        let cards: String = view
            .intervals
            .iter()
            .map(|card| {
                format!(
                    r#"<div class="stat"><div class="stat-label">{}</div><div class="stat-value mono">{}</div></div>"#,
                    escape_html(&card.label),
                    escape_html(&card.bounds)
                )
            })
            .collect();
        format!(r#"<h3>Root intervals</h3><div class="grid-3">{}</div>"#, cards)
    };

    format!(
        r#"<section class="card"><h2>Function plot</h2>{}{}</section>"#,
        plot_svg(&view.series),
        intervals
    )
}

/// Inline SVG line chart of `points`. Missing y values break the line.
pub fn plot_svg(points: &[PlotPoint]) -> String {
    let defined: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|p| p.y.map(|y| (p.x, y)))
        .collect();

    if defined.is_empty() {
        return r#"<p class="muted">No points to plot.</p>"#.to_string();
    }

    let (x_min, x_max) = bounds(points.iter().map(|p| p.x));
    let (y_min, y_max) = bounds(defined.iter().map(|&(_, y)| y));

    let sx = |x: f64| PLOT_PAD + (x - x_min) / (x_max - x_min) * (PLOT_WIDTH - 2.0 * PLOT_PAD);
    let sy = |y: f64| PLOT_HEIGHT - PLOT_PAD - (y - y_min) / (y_max - y_min) * (PLOT_HEIGHT - 2.0 * PLOT_PAD);

    let mut segments: Vec<Vec<String>> = vec![Vec::new()];
    for point in points {
        match point.y {
            Some(y) => {
                if let Some(current) = segments.last_mut() {
                    current.push(format!("{:.2},{:.2}", sx(point.x), sy(y)));
                }
            }
            None => {
                if segments.last().is_some_and(|s| !s.is_empty()) {
                    segments.push(Vec::new());
                }
            }
        }
    }

    let lines: String = segments
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| format!(r#"<polyline class="series" points="{}"/>"#, s.join(" ")))
        .collect();

    let mut axes = String::new();
    if y_min <= 0.0 && y_max >= 0.0 {
        axes.push_str(&format!(
            r#"<line class="axis" x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
            PLOT_PAD,
            PLOT_WIDTH - PLOT_PAD,
            y = sy(0.0)
        ));
    }
    if x_min <= 0.0 && x_max >= 0.0 {
        axes.push_str(&format!(
            r#"<line class="axis" x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}"/>"#,
            PLOT_PAD,
            PLOT_HEIGHT - PLOT_PAD,
            x = sx(0.0)
        ));
    }

    format!(
        r#"<svg class="plot" viewBox="0 0 {w} {h}" role="img" aria-label="f(x)">{axes}{lines}</svg>"#,
        w = PLOT_WIDTH,
        h = PLOT_HEIGHT,
    )
}

/// Min and max of `values`, widened when flat so scaling never divides by zero.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

/// Comparison cards carry the method in their heading, so only a standalone
/// solution shows it as a stat.
fn solution_grid(card: &SolutionCard, with_method: bool) -> String {
    let stat = |label: &str, value: &str| {
        format!(
            r#"<div class="stat"><div class="stat-label">{}</div><div class="stat-value mono">{}</div></div>"#,
            label,
            escape_html(value)
        )
    };
    let method = match card.method {
        Some(ref method) if with_method => stat("Method", method),
        _ => String::new(),
    };
    format!(
        r#"<div class="grid-2">{}{}{}{}{}</div>"#,
        stat("Root", &card.root),
        stat("Iterations", &card.iterations),
        stat("Accuracy", &card.accuracy),
        stat("Execution time", &card.execution_time),
        method,
    )
}

fn comparison_html(view: &ComparisonView) -> String {
    let cards: String = view
        .entries
        .iter()
        .map(|entry| {
            let body = match entry.result {
                Some(ref card) => solution_grid(card, false),
                None => format!(r#"<p class="alert alert-error">{}</p>"#, METHOD_FAILED),
            };
            format!(
                r#"<div class="card method-card"><h3>{}</h3>{}</div>"#,
                escape_html(&entry.method),
                body
            )
        })
        .collect();
    format!(
        r#"<section class="card"><h2>Method comparison</h2><div class="grid-3">{}</div></section>"#,
        cards
    )
}
