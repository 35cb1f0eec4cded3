//! Response and request shapes exposed by the OpenOA REST API.

use serde::{Deserialize, Serialize};

// ── Health ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ── Analysis ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMethod {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub citations: Vec<String>,
    #[serde(default)]
    pub parameters: Option<Vec<String>>,
    #[serde(default = "default_analysis_icon")]
    pub icon: String,
}

fn default_analysis_icon() -> String {
    "⚡".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisListResponse {
    pub count: usize,
    pub methods: Vec<AnalysisMethod>,
}

// ── Features ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_feature_icon")]
    pub icon: String,
    #[serde(default = "default_feature_category")]
    pub category: String,
}

fn default_feature_icon() -> String {
    "🔧".to_string()
}

fn default_feature_category() -> String {
    "utility".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturesListResponse {
    pub count: usize,
    pub features: Vec<Feature>,
}

// ── Documentation ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subsections: Option<Vec<serde_json::Map<String, serde_json::Value>>>,
}

/// The documentation pages served under `/docs/{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocName {
    Overview,
    Installation,
    Schema,
    Citations,
}

impl DocName {
    pub const ALL: [DocName; 4] = [
        DocName::Overview,
        DocName::Installation,
        DocName::Schema,
        DocName::Citations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocName::Overview => "overview",
            DocName::Installation => "installation",
            DocName::Schema => "schema",
            DocName::Citations => "citations",
        }
    }

    /// Route path relative to the API base.
    pub fn path(self) -> String {
        format!("/docs/{}", self.as_str())
    }
}

// ── Team ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub count: usize,
    pub members: Vec<TeamMember>,
}

// ── Contact ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

// ── Errors ──────────────────────────────────────────────────────

/// Error body returned by the API on non-2xx responses.
///
/// `detail` is usually a string but validation failures carry a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
