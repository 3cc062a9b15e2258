//! Equasolve — root-finding panel for the Equation API.
//! Entry point for the `equasolve` binary.

mod cli;
mod output;

use clap::Parser;
use equasolve_client::HttpEquationApi;
use equasolve_common::sandbox::SandboxClient;
use equasolve_config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Equation API client configured from `config.api`.
fn build_api(config: &Config) -> anyhow::Result<HttpEquationApi> {
    let base = config.api.base_url()?;
    let mut client = SandboxClient::for_base_url(&base, config.api.timeout())?;
    for host in &config.api.extra_allowed_hosts {
        client.allow_domain(host);
    }

    let api = HttpEquationApi::new(client);
    Ok(match config.api.origin {
        Some(ref origin) => api.with_origin(origin.as_str()),
        None => api,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = cli::Cli::parse();

    let config = Config::load()?;

    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Equasolve {} using API at {}", env!("CARGO_PKG_VERSION"), config.api.base_url);

    let api = build_api(&config)?;
    args.run(config, api).await
}
