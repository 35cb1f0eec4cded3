//! openoa-status — endpoint diagnostics for the OpenOA API.
//!
//! # Usage
//!
//! ```text
//! openoa-status sweep --expand team
//! openoa-status --api-url http://localhost:8000 probe health --json
//! openoa-status watch --ticks 4
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;

use openoa_client::ApiClient;
use openoa_core::config::API_URL_ENV;

mod commands;
mod settings;

#[derive(Parser)]
#[command(
    name = "openoa-status",
    about = "OpenOA API endpoint diagnostics",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Config file (read only if it exists)
    #[arg(short, long, global = true, default_value = "openoa.toml")]
    config: PathBuf,

    /// Backend origin, e.g. http://localhost:8000. `/api` is appended.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered endpoints in probe order
    List,
    /// Probe every endpoint once, one at a time.
    ///
    /// Exits non-zero when every probe fails.
    Sweep {
        /// Show the response detail for this endpoint id
        #[arg(short, long)]
        expand: Option<String>,
        /// Print the sweep report as JSON
        #[arg(long)]
        json: bool,
        /// Also submit a sample message to POST /contact
        #[arg(long)]
        include_contact: bool,
    },
    /// Probe a single endpoint by id
    Probe {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Run the health beacon and print each tick until Ctrl-C
    Watch {
        /// Stop after this many ticks
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        ticks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("openoa=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let env_url = std::env::var(API_URL_ENV).ok();
    let config = settings::load(&cli.config, cli.api_url.as_deref(), env_url.as_deref())?;
    debug!(
        base_url = %config.base_url,
        source = ?config.base_url.source(),
        timeout = ?config.timeout,
        "configuration resolved"
    );
    let client = ApiClient::from_config(&config);

    match cli.command {
        Commands::List => commands::list::list(&client),
        Commands::Sweep {
            expand,
            json,
            include_contact,
        } => commands::sweep::sweep(&client, expand.as_deref(), json, include_contact).await,
        Commands::Probe { id, json } => commands::probe::probe(&client, &id, json).await,
        Commands::Watch { ticks } => {
            commands::watch::watch(&client, config.beacon_interval, ticks).await
        }
    }
}
