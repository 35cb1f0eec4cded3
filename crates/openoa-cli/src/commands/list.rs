use openoa_client::ApiClient;

use openoa_diagnostics::CONTACT_PROBE_ID;

use super::registry_for;

pub fn list(client: &ApiClient) -> anyhow::Result<std::process::ExitCode> {
    let registry = registry_for(client, true);

    println!("Base URL: {} ({:?})", client.base_url(), client.base_url().source());
    println!();
    println!("{:<16} {:<6} {:<32} {}", "ID", "METHOD", "PATH", "ENDPOINT");
    for probe in registry.iter() {
        let note = if probe.id() == registry.health_probe().id() {
            "  [beacon]"
        } else if probe.id() == CONTACT_PROBE_ID {
            "  [opt-in]"
        } else {
            ""
        };
        println!(
            "{:<16} {:<6} {:<32} {}{}",
            probe.id(),
            probe.method(),
            probe.path(),
            probe.label(),
            note
        );
    }
    Ok(std::process::ExitCode::SUCCESS)
}
