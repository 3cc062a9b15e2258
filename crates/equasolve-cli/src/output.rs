//! Plain-text rendering of result views for the terminal.

use equasolve_panel::view::{SolutionCard, METHOD_FAILED};
use equasolve_panel::ResultView;
use std::fmt::Write;

pub fn render_text(view: &ResultView) -> String {
    let mut out = String::new();
    match view {
        ResultView::Separation(sep) => {
            let plotted = sep.series.iter().filter(|p| p.y.is_some()).count();
            match (sep.series.first(), sep.series.last()) {
                (Some(first), Some(last)) => {
                    let _ = writeln!(
                        out,
                        "Sampled {} points on [{}, {}] ({} defined)",
                        sep.series.len(),
                        first.x,
                        last.x,
                        plotted
                    );
                }
                _ => out.push_str("No points sampled\n"),
            }
            if !sep.intervals.is_empty() {
                out.push_str("Root intervals:\n");
                for card in &sep.intervals {
                    let _ = writeln!(out, "  {}: {}", card.label, card.bounds);
                }
            }
        }
        ResultView::Solution(card) => {
            solution_lines(&mut out, card, "");
            if let Some(ref method) = card.method {
                let _ = writeln!(out, "{:<16}{}", "Method:", method);
            }
        }
        ResultView::Comparison(cmp) => {
            for entry in &cmp.entries {
                let _ = writeln!(out, "{}", entry.method);
                match entry.result {
                    Some(ref card) => solution_lines(&mut out, card, "  "),
                    None => {
                        let _ = writeln!(out, "  {}", METHOD_FAILED);
                    }
                }
            }
        }
        ResultView::Unexpected(notice) => {
            let _ = writeln!(out, "{}", notice.message());
        }
    }
    out
}

fn solution_lines(out: &mut String, card: &SolutionCard, indent: &str) {
    for (label, value) in [
        ("Root", &card.root),
        ("Iterations", &card.iterations),
        ("Accuracy", &card.accuracy),
        ("Execution time", &card.execution_time),
    ] {
        let _ = writeln!(out, "{}{:<16}{}", indent, format!("{}:", label), value);
    }
}
