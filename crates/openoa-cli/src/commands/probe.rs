use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;

use openoa_client::ApiClient;
use openoa_dashboard::{DashboardView, Expansion, render_table};
use openoa_diagnostics::{Diagnostics, ProbeResult};

use super::{registry_for, wants_contact};

#[derive(Serialize)]
struct ProbeOutput<'a> {
    id: &'a str,
    #[serde(flatten)]
    result: &'a ProbeResult,
}

pub async fn probe(client: &ApiClient, id: &str, json: bool) -> anyhow::Result<ExitCode> {
    let registry = Arc::new(registry_for(client, wants_contact(id)));
    let diagnostics = Diagnostics::new(registry.clone());
    let result = diagnostics.test_one(id).await?;

    if json {
        let output = ProbeOutput {
            id,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mut expansion = Expansion::new();
        expansion.toggle(id);
        let mut view = DashboardView::build(&registry, &diagnostics.snapshot(), &expansion);
        view.rows.retain(|row| row.id == id);
        println!("{}", render_table(&view));
    }

    if result.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
