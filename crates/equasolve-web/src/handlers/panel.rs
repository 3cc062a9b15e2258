//! Solver panel page and its form actions.
//!
//! Every action applies the submitted form first, then redirects back to `/`
//! so a reload never repeats a solve.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use equasolve_common::{METHODS, PRESET_EQUATIONS};
use equasolve_panel::{NumericField, SolverPanel};
use serde::Deserialize;
use tracing::debug;

use super::escape_html;
use super::results::view_html;
use crate::error::WebError;
use crate::state::SharedState;

/// Submitted panel form. Inputs hidden for the current method are absent.
#[derive(Debug, Default, Deserialize)]
pub struct PanelForm {
    pub equation: Option<String>,
    pub method: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub step: Option<String>,
    pub tolerance: Option<String>,
}

impl PanelForm {
    fn raw(&self, field: NumericField) -> Option<&str> {
        match field {
            NumericField::Start => self.start.as_deref(),
            NumericField::End => self.end.as_deref(),
            NumericField::Step => self.step.as_deref(),
            NumericField::Tolerance => self.tolerance.as_deref(),
        }
    }

    /// Numeric text goes through the panel's input buffers, so unparseable
    /// values fall back to the last good number.
    fn apply(&self, panel: &mut SolverPanel) -> Result<(), WebError> {
        if let Some(ref equation) = self.equation {
            panel.set_equation(equation.as_str());
        }
        if let Some(method) = self.method {
            panel.select_method(method)?;
        }
        for field in NumericField::ALL {
            if let Some(raw) = self.raw(field) {
                panel.enter_field(field, raw);
            }
        }
        Ok(())
    }
}

pub async fn panel_page(State(state): State<SharedState>) -> Html<String> {
    let panel = state.panel.lock().await;
    Html(render_panel_page(&panel))
}

pub async fn apply_form(
    State(state): State<SharedState>,
    Form(form): Form<PanelForm>,
) -> Result<Redirect, WebError> {
    form.apply(&mut *state.panel.lock().await)?;
    Ok(Redirect::to("/"))
}

/// Preset buttons submit the whole form, so pending edits are kept.
pub async fn select_preset(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
    Form(form): Form<PanelForm>,
) -> Result<Redirect, WebError> {
    let mut panel = state.panel.lock().await;
    form.apply(&mut panel)?;
    panel.apply_preset(id)?;
    Ok(Redirect::to("/"))
}

pub async fn generate_api_url(
    State(state): State<SharedState>,
    Form(form): Form<PanelForm>,
) -> Result<Redirect, WebError> {
    let mut panel = state.panel.lock().await;
    form.apply(&mut panel)?;
    let url = panel.generate_api_url()?;
    debug!(%url, "API request generated");
    Ok(Redirect::to("/"))
}

pub async fn solve(
    State(state): State<SharedState>,
    Form(form): Form<PanelForm>,
) -> Result<Redirect, WebError> {
    let ticket = {
        let mut panel = state.panel.lock().await;
        form.apply(&mut panel)?;
        panel.begin_solve()
    };

    let outcome = ticket.execute(state.api.as_ref()).await;
    state.panel.lock().await.complete(&ticket, outcome);
    Ok(Redirect::to("/"))
}

// ── Rendering ───────────────────────────────────────────────────────────────

pub fn render_panel_page(panel: &SolverPanel) -> String {
    let form = panel.form();
    let endpoint = form.endpoint();

    let presets_html: String = PRESET_EQUATIONS
        .iter()
        .map(|p| {
            let note = p
                .note
                .map(|n| format!(r#"<span class="preset-note">{}</span>"#, escape_html(n)))
                .unwrap_or_default();
            format!(
                r#"<button type="submit" formaction="/preset/{}" class="preset">
                    <span>{}. {}</span>{}
                </button>"#,
                p.id, p.id, escape_html(p.equation), note
            )
        })
        .collect();

    let methods_html: String = METHODS
        .iter()
        .map(|m| {
            let selected = if m.id == form.method.id { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, m.id, selected, escape_html(m.name))
        })
        .collect();

    let fields_html: String = form
        .visible_fields()
        .into_iter()
        .map(|field| {
            format!(
                r#"<div class="field">
                    <label for="{name}">{label}</label>
                    <input type="text" id="{name}" name="{name}" value="{value}" placeholder="Enter a number">
                </div>"#,
                name = field.name(),
                label = field.label(endpoint),
                value = escape_html(panel.input_text(field)),
            )
        })
        .collect();

    let solve_button = if panel.is_loading() {
        r#"<button type="submit" formaction="/solve" class="btn btn-primary" disabled>Solving...</button>"#
    } else {
        r#"<button type="submit" formaction="/solve" class="btn btn-primary">Solve equation</button>"#
    };

    let api_url_html = panel
        .api_url()
        .map(|url| {
            format!(
                r#"<div class="api-url">
                    <h3>API request:</h3>
                    <a href="{0}" class="mono">{0}</a>
                    <button type="button" class="btn btn-copy" data-url="{0}"
                        onclick="navigator.clipboard.writeText(this.dataset.url).catch(e => console.error('Failed to copy text:', e))">Copy</button>
                </div>"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    let error_html = panel
        .error()
        .map(|message| format!(r#"<div class="alert alert-error">{}</div>"#, escape_html(message)))
        .unwrap_or_default();

    let results_html = panel.view().map(|view| view_html(&view)).unwrap_or_default();

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Equation Solver</title>
    <link rel="stylesheet" href="/static/panel.css">
</head>
<body>
<main class="container">
    <section class="card">
        <h1 class="page-title">Equation Solver</h1>
        <form method="POST" action="/form">
            <div class="grid-2">
                <div>
                    <div class="field">
                        <label for="equation">Equation</label>
                        <input type="text" id="equation" name="equation" value="{equation}">
                    </div>
                    <details class="presets">
                        <summary>Presets</summary>
                        <div class="preset-list">{presets}</div>
                    </details>
                    <div class="field">
                        <label for="method">Solving method</label>
                        <select id="method" name="method">{methods}</select>
                    </div>
                </div>
                <div class="grid-2">{fields}</div>
            </div>
            <div class="actions">
                {solve}
                <button type="submit" formaction="/api-url" class="btn">Generate API request</button>
                <button type="submit" class="btn">Apply</button>
            </div>
        </form>
        {api_url}
    </section>
    {error}
    <div class="results">{results}</div>
</main>
</body>
</html>"#,
        equation = escape_html(&form.equation),
        presets = presets_html,
        methods = methods_html,
        fields = fields_html,
        solve = solve_button,
        api_url = api_url_html,
        error = error_html,
        results = results_html,
    )
}
