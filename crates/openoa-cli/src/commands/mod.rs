pub mod list;
pub mod probe;
pub mod sweep;
pub mod watch;

use openoa_client::ApiClient;
use openoa_diagnostics::{CONTACT_PROBE_ID, Registry, default_contact_sample};

/// Registry for the run; the contact probe submits a real message so it
/// is only included on request.
fn registry_for(client: &ApiClient, include_contact: bool) -> Registry {
    if include_contact {
        Registry::with_contact_probe(client, &default_contact_sample())
    } else {
        Registry::standard(client)
    }
}

/// `probe contact` implies the contact probe.
fn wants_contact(id: &str) -> bool {
    id == CONTACT_PROBE_ID
}
