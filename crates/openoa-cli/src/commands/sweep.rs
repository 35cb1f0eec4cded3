use std::process::ExitCode;
use std::sync::Arc;

use anyhow::bail;
use serde::Serialize;
use tracing::info;

use openoa_client::ApiClient;
use openoa_dashboard::{DashboardView, Expansion, render_summary, render_table};
use openoa_diagnostics::{AggregateStats, Diagnostics, SweepEntry};

use super::registry_for;

#[derive(Serialize)]
struct SweepOutput<'a> {
    base_url: &'a str,
    elapsed_ms: u64,
    summary: AggregateStats,
    results: &'a [SweepEntry],
}

pub async fn sweep(
    client: &ApiClient,
    expand: Option<&str>,
    json: bool,
    include_contact: bool,
) -> anyhow::Result<ExitCode> {
    let registry = Arc::new(registry_for(client, include_contact));
    if let Some(id) = expand.filter(|id| registry.get(id).is_none()) {
        bail!("unknown endpoint id '{id}' (see `openoa-status list`)");
    }

    let diagnostics = Diagnostics::new(registry.clone());
    info!(base_url = %client.base_url(), endpoints = registry.len(), "starting sweep");
    let report = diagnostics.test_all().await?;
    let stats = report.aggregate();

    if json {
        let output = SweepOutput {
            base_url: client.base_url().as_str(),
            elapsed_ms: report.elapsed_ms,
            summary: stats,
            results: &report.entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mut expansion = Expansion::new();
        if let Some(id) = expand {
            expansion.toggle(id);
        }
        let view = DashboardView::build(&registry, &diagnostics.snapshot(), &expansion);
        println!("{}", render_table(&view));
        println!();
        println!("{}", render_summary(&view.summary));
    }

    if stats.error_count == registry.len() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
