//! Endpoint registry: the fixed, ordered list of probes.
//!
//! Order matters twice: it is the display order and the execution order
//! of a full sweep. Ids are unique and exactly one probe is designated
//! as the health probe, which the health beacon reuses.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use http::Method;
use serde_json::json;

use openoa_client::{ApiClient, ProbeFn};
use openoa_core::config::API_PREFIX;
use openoa_core::{ContactMessage, DocName};

use crate::error::RegistryError;

/// Analysis method the detail probe asks for.
pub const DETAIL_METHOD_ID: &str = "monte_carlo_aep";

pub const HEALTH_PROBE_ID: &str = "health";
pub const CONTACT_PROBE_ID: &str = "contact";

/// One probeable endpoint. Immutable once built.
#[derive(Clone)]
pub struct ProbeDescriptor {
    id: String,
    label: String,
    method: Method,
    path: String,
    invoke: ProbeFn,
}

impl ProbeDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        method: Method,
        path: impl Into<String>,
        invoke: ProbeFn,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            method,
            path: path.into(),
            invoke,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Display path, e.g. `/api/health`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The callable performing the remote call.
    pub fn invoke(&self) -> &ProbeFn {
        &self.invoke
    }
}

impl fmt::Debug for ProbeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Ordered probe descriptors with one designated health probe.
#[derive(Debug, Clone)]
pub struct Registry {
    probes: Vec<Arc<ProbeDescriptor>>,
    health_index: usize,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The nine read-only probes the status page runs, in display order.
    pub fn standard(client: &ApiClient) -> Self {
        let probes = standard_probes(client);
        Self {
            probes: probes.into_iter().map(Arc::new).collect(),
            health_index: 0,
        }
    }

    /// The standard probes followed by a `POST /contact` submitting `sample`.
    pub fn with_contact_probe(client: &ApiClient, sample: &ContactMessage) -> Self {
        let mut registry = Self::standard(client);
        let body = json!(sample);
        registry.probes.push(Arc::new(ProbeDescriptor::new(
            CONTACT_PROBE_ID,
            "Contact Submit",
            Method::POST,
            display_path("/contact"),
            client.post_probe("/contact", body),
        )));
        registry
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProbeDescriptor>> {
        self.probes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ProbeDescriptor>> {
        self.probes.iter().find(|p| p.id() == id)
    }

    /// Position of `id` in registry order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.probes.iter().position(|p| p.id() == id)
    }

    pub fn health_probe(&self) -> &Arc<ProbeDescriptor> {
        &self.probes[self.health_index]
    }

    pub fn ids(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.id()).collect()
    }
}

/// Builder enforcing unique ids and a single health probe.
#[derive(Default)]
pub struct RegistryBuilder {
    probes: Vec<ProbeDescriptor>,
    health: Option<String>,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    pub fn probe(mut self, descriptor: ProbeDescriptor) -> Self {
        self.probes.push(descriptor);
        self
    }

    /// Add `descriptor` and designate it as the health probe.
    pub fn health_probe(mut self, descriptor: ProbeDescriptor) -> Self {
        match self.health.clone() {
            Some(first) => {
                self.error.get_or_insert(RegistryError::DuplicateHealthProbe {
                    first,
                    second: descriptor.id().to_string(),
                });
            }
            None => self.health = Some(descriptor.id().to_string()),
        }
        self.probes.push(descriptor);
        self
    }

    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut seen = HashSet::new();
        for probe in &self.probes {
            if !seen.insert(probe.id()) {
                return Err(RegistryError::DuplicateId(probe.id().to_string()));
            }
        }

        let health_id = self.health.ok_or(RegistryError::MissingHealthProbe)?;
        let health_index = self
            .probes
            .iter()
            .position(|p| p.id() == health_id)
            .ok_or(RegistryError::MissingHealthProbe)?;

        Ok(Registry {
            probes: self.probes.into_iter().map(Arc::new).collect(),
            health_index,
        })
    }
}

/// A sample message for the opt-in contact probe.
pub fn default_contact_sample() -> ContactMessage {
    ContactMessage {
        name: "OpenOA Status".to_string(),
        email: "status@openoa.invalid".to_string(),
        subject: "Endpoint diagnostics".to_string(),
        message: "Automated contact endpoint probe.".to_string(),
    }
}

fn display_path(route: &str) -> String {
    format!("{API_PREFIX}{route}")
}

fn standard_probes(client: &ApiClient) -> Vec<ProbeDescriptor> {
    let get = |id: &str, label: &str, route: String| {
        ProbeDescriptor::new(
            id,
            label,
            Method::GET,
            display_path(&route),
            client.get_probe(route),
        )
    };

    let detail_route = format!("/analysis/{DETAIL_METHOD_ID}");
    let mut probes = vec![
        get(HEALTH_PROBE_ID, "Health Check", "/health".to_string()),
        get("analysis", "Analysis Methods", "/analysis".to_string()),
        get("analysis-detail", "Analysis Detail", detail_route),
        get("features", "Features", "/features".to_string()),
    ];
    for doc in DocName::ALL {
        let label = match doc {
            DocName::Overview => "Docs: Overview",
            DocName::Installation => "Docs: Installation",
            DocName::Schema => "Docs: Schema",
            DocName::Citations => "Docs: Citations",
        };
        probes.push(get(doc.as_str(), label, doc.path()));
    }
    probes.push(get("team", "Team", "/team".to_string()));
    probes
}

#[cfg(test)]
mod tests {
    use super::*;
    use openoa_client::{ApiResponse, probe_fn};
    use openoa_core::{BaseUrl, UrlSource};
    use std::time::Duration;

    fn client() -> ApiClient {
        let base = BaseUrl::parse("http://127.0.0.1:8000/api", UrlSource::Override).unwrap();
        ApiClient::new(base, Duration::from_secs(1))
    }

    fn noop(id: &str) -> ProbeDescriptor {
        ProbeDescriptor::new(
            id,
            id,
            Method::GET,
            format!("/api/{id}"),
            probe_fn(|| async {
                Ok(ApiResponse {
                    status: 200,
                    body: serde_json::Value::Null,
                })
            }),
        )
    }

    #[test]
    fn standard_registry_order() {
        let registry = Registry::standard(&client());
        assert_eq!(
            registry.ids(),
            [
                "health",
                "analysis",
                "analysis-detail",
                "features",
                "overview",
                "installation",
                "schema",
                "citations",
                "team"
            ]
        );
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.health_probe().id(), "health");
    }

    #[test]
    fn standard_registry_display_paths() {
        let registry = Registry::standard(&client());
        let detail = registry.get("analysis-detail").unwrap();
        assert_eq!(detail.path(), "/api/analysis/monte_carlo_aep");
        assert_eq!(detail.method(), &Method::GET);
        assert_eq!(registry.get("schema").unwrap().path(), "/api/docs/schema");
        assert_eq!(registry.get("citations").unwrap().label(), "Docs: Citations");
    }

    #[test]
    fn contact_probe_is_appended_last() {
        let registry = Registry::with_contact_probe(&client(), &default_contact_sample());
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.position(CONTACT_PROBE_ID), Some(9));
        let contact = registry.get(CONTACT_PROBE_ID).unwrap();
        assert_eq!(contact.method(), &Method::POST);
        assert_eq!(contact.path(), "/api/contact");
    }

    #[test]
    fn builder_rejects_duplicate_ids() {
        let err = Registry::builder()
            .health_probe(noop("health"))
            .probe(noop("team"))
            .probe(noop("team"))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("team".to_string()));
    }

    #[test]
    fn builder_requires_health_probe() {
        let err = Registry::builder().probe(noop("team")).build().unwrap_err();
        assert_eq!(err, RegistryError::MissingHealthProbe);
    }

    #[test]
    fn builder_rejects_second_health_probe() {
        let err = Registry::builder()
            .health_probe(noop("health"))
            .health_probe(noop("ping"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateHealthProbe {
                first: "health".to_string(),
                second: "ping".to_string()
            }
        );
    }

    #[test]
    fn builder_keeps_insertion_order() {
        let registry = Registry::builder()
            .probe(noop("b"))
            .health_probe(noop("a"))
            .probe(noop("c"))
            .build()
            .unwrap();
        assert_eq!(registry.ids(), ["b", "a", "c"]);
        assert_eq!(registry.health_probe().id(), "a");
        assert!(registry.get("missing").is_none());
    }
}
