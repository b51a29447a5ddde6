use crate::prelude::*;
use std::future::Future;
use testgen_core::generation::{
    build_request, endpoint_url, GenerateContentResponse, GenerationConfig,
};

/// Hard-coded Google Cloud project used when none is configured.
pub const DEFAULT_PROJECT: &str = "fit-cloudgemini";
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Where and as whom generation requests are sent.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub project: String,
    pub location: String,
    pub model: String,
    pub access_token: Option<String>,
}

/// Turns a design document into the model's raw answer.
pub trait Generator {
    fn generate(
        &self,
        config: &GenerationConfig,
        document: &str,
    ) -> impl Future<Output = Result<String, Error>>;
}

/// Builds a fresh [`Generator`] for each file.
pub trait Connect {
    type Client: Generator;

    fn connect(&self) -> impl Future<Output = Result<Self::Client, Error>>;
}

/// Creates [`VertexClient`]s that share one HTTP connection pool.
pub struct VertexConnector {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl VertexConnector {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

impl Connect for VertexConnector {
    type Client = VertexClient;

    async fn connect(&self) -> Result<VertexClient, Error> {
        VertexClient::new(self.http.clone(), &self.settings).await
    }
}

/// Gemini on Vertex AI, called through the `generateContent` REST endpoint.
#[derive(Debug)]
pub struct VertexClient {
    http: reqwest::Client,
    url: String,
    access_token: String,
}

impl VertexClient {
    pub async fn new(http: reqwest::Client, settings: &ClientSettings) -> Result<Self, Error> {
        if settings.project.trim().is_empty() {
            return Err(Error::ClientInit("project id is not set".to_string()));
        }
        if settings.location.trim().is_empty() {
            return Err(Error::ClientInit("location is not set".to_string()));
        }

        let access_token =
            crate::auth::resolve_access_token(settings.access_token.as_deref()).await?;

        Ok(Self {
            http,
            url: endpoint_url(&settings.project, &settings.location, &settings.model),
            access_token,
        })
    }
}

impl Generator for VertexClient {
    async fn generate(&self, config: &GenerationConfig, document: &str) -> Result<String, Error> {
        let request = build_request(config, document);

        log::debug!("POST {} ({} document bytes)", self.url, document.len());

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        log::debug!("Vertex AI responded with HTTP {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        body.text().map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}
