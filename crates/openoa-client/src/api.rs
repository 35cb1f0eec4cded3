//! Typed calls for each route the OpenOA API exposes.

use serde::de::DeserializeOwned;

use openoa_core::{
    AnalysisListResponse, AnalysisMethod, ContactMessage, ContactResponse, DocName, DocSection,
    FeaturesListResponse, HealthResponse, TeamResponse,
};

use crate::error::TransportError;
use crate::transport::{ApiClient, ApiResponse};

impl ApiResponse {
    /// Decode the body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        T::deserialize(&self.body).map_err(|e| TransportError::Decode {
            status: self.status,
            reason: e.to_string(),
        })
    }
}

impl ApiClient {
    pub async fn health(&self) -> Result<HealthResponse, TransportError> {
        self.get("/health").await?.decode()
    }

    pub async fn analysis_methods(&self) -> Result<AnalysisListResponse, TransportError> {
        self.get("/analysis").await?.decode()
    }

    pub async fn analysis_method(&self, id: &str) -> Result<AnalysisMethod, TransportError> {
        self.get(&format!("/analysis/{id}")).await?.decode()
    }

    pub async fn features(&self) -> Result<FeaturesListResponse, TransportError> {
        self.get("/features").await?.decode()
    }

    pub async fn doc(&self, name: DocName) -> Result<DocSection, TransportError> {
        self.get(&name.path()).await?.decode()
    }

    pub async fn team(&self) -> Result<TeamResponse, TransportError> {
        self.get("/team").await?.decode()
    }

    /// Submit the contact form. Failures carry the server's `detail`.
    pub async fn submit_contact(
        &self,
        message: &ContactMessage,
    ) -> Result<ContactResponse, TransportError> {
        self.post_json("/contact", message).await?.decode()
    }
}
