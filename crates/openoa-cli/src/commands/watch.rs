use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use openoa_client::ApiClient;
use openoa_dashboard::{NavIndicator, render_nav};
use openoa_health::HealthBeacon;

use super::registry_for;

pub async fn watch(
    client: &ApiClient,
    interval: Duration,
    ticks: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let registry = registry_for(client, false);
    let probe = registry.health_probe().invoke().clone();

    let beacon = HealthBeacon::start(probe, interval);
    let mut health = beacon.subscribe();
    println!("{}", render_nav(&NavIndicator::from_state(health.current())));

    let mut seen = 0u64;
    loop {
        tokio::select! {
            state = health.changed() => {
                let Some(state) = state else { break };
                seen += 1;
                println!("[{seen}] {}", render_nav(&NavIndicator::from_state(state)));
                if ticks.is_some_and(|n| seen >= n) {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                info!("interrupted");
                break;
            }
        }
    }

    beacon.shutdown().await;
    Ok(ExitCode::SUCCESS)
}
