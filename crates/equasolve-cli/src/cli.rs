use anyhow::bail;
use clap::{ArgAction, Args};
use equasolve_client::HttpEquationApi;
use equasolve_common::{methods, EndpointKey, METHODS, PRESET_EQUATIONS};
use equasolve_config::Config;
use equasolve_panel::clipboard::Osc52Clipboard;
use equasolve_panel::{NumericField, SolverPanel};
use equasolve_web::state::AppState;
use std::sync::Arc;

use crate::output;

#[derive(clap::Parser)]
#[command(name = "equasolve", version, about = "Solve equations through the Equation API")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

impl Cli {
    pub(crate) async fn run(self, config: Config, api: HttpEquationApi) -> anyhow::Result<()> {
        self.command.run(config, api).await
    }
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Serve the web panel.
    Serve {
        /// Listen address, overrides `web.bind`.
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Run one solve and print the result.
    Solve {
        #[command(flatten)]
        form: FormArgs,
        /// Print the result view as JSON.
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Print the request URL for a solve without sending it.
    Url {
        #[command(flatten)]
        form: FormArgs,
        /// Also copy the URL to the terminal clipboard.
        #[arg(long, action = ArgAction::SetTrue)]
        copy: bool,
    },
    /// List solving methods.
    Methods,
    /// List preset equations.
    Presets,
}

/// Form inputs. Numbers are taken as text and go through the same buffering
/// as the web form, so bad input keeps the configured default.
#[derive(Args, Debug, Default)]
struct FormArgs {
    /// Method id (1-5) or endpoint key (task1..task5).
    #[arg(short, long)]
    method: Option<String>,
    #[arg(short, long, conflicts_with = "preset")]
    equation: Option<String>,
    /// Use a preset equation by id.
    #[arg(short, long)]
    preset: Option<u32>,
    #[arg(long, allow_hyphen_values = true)]
    start: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    end: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    step: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    tolerance: Option<String>,
}

impl FormArgs {
    fn raw(&self, field: NumericField) -> Option<&str> {
        match field {
            NumericField::Start => self.start.as_deref(),
            NumericField::End => self.end.as_deref(),
            NumericField::Step => self.step.as_deref(),
            NumericField::Tolerance => self.tolerance.as_deref(),
        }
    }

    fn panel(&self, config: &Config) -> anyhow::Result<SolverPanel> {
        let mut panel = SolverPanel::new(config.api.base_url()?, &config.form)?;

        if let Some(ref method) = self.method {
            panel.select_method(resolve_method(method)?)?;
        }
        if let Some(id) = self.preset {
            panel.apply_preset(id)?;
        }
        if let Some(ref equation) = self.equation {
            panel.set_equation(equation.as_str());
        }
        for field in NumericField::ALL {
            if let Some(raw) = self.raw(field) {
                panel.enter_field(field, raw);
            }
        }
        Ok(panel)
    }
}

/// Method id from `1`..`5` or an endpoint key such as `task3`.
fn resolve_method(arg: &str) -> anyhow::Result<u32> {
    if let Ok(id) = arg.trim().parse::<u32>() {
        return Ok(methods::method_by_id(id)?.id);
    }
    let endpoint: EndpointKey = arg.parse()?;
    Ok(methods::method_by_endpoint(endpoint).id)
}

impl CliCommand {
    async fn run(self, config: Config, api: HttpEquationApi) -> anyhow::Result<()> {
        match self {
            Self::Serve { bind } => {
                let panel = SolverPanel::new(config.api.base_url()?, &config.form)?;
                let state = AppState::new(panel, Arc::new(api));
                let addr = bind.unwrap_or(config.web.bind);
                equasolve_web::serve(state, &addr).await
            }
            Self::Solve { form, json } => {
                let mut panel = form.panel(&config)?;
                panel.solve(&api).await;

                if let Some(message) = panel.error() {
                    bail!("{}", message);
                }
                let Some(view) = panel.view() else {
                    bail!("No result");
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    print!("{}", output::render_text(&view));
                }
                Ok(())
            }
            Self::Url { form, copy } => {
                let mut panel = form.panel(&config)?;
                println!("{}", panel.generate_api_url()?);
                if copy && panel.copy_api_url(&mut Osc52Clipboard::stdout()) {
                    eprintln!("Copied to clipboard");
                }
                Ok(())
            }
            Self::Methods => {
                for method in METHODS.iter() {
                    println!("{}  {:<6} {}", method.id, method.endpoint.as_str(), method.name);
                }
                Ok(())
            }
            Self::Presets => {
                for preset in PRESET_EQUATIONS.iter() {
                    match preset.note {
                        Some(note) => println!("{:>2}. {}  ({})", preset.id, preset.equation, note),
                        None => println!("{:>2}. {}", preset.id, preset.equation),
                    }
                }
                Ok(())
            }
        }
    }
}
