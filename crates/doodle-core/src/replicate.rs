pub mod schemas;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::config::Config;
use crate::error::{Error, Result};
use schemas::{CreatePrediction, Prediction, PredictionInput, UploadedFile};

/// The remote generation service, reduced to the three calls one
/// attempt needs. Split out as a trait so the orchestrator can be
/// driven by a scripted backend in tests.
#[async_trait]
pub trait GenerationBackend {
    /// Upload raw image bytes, returning a publicly fetchable URL.
    async fn upload(&self, bytes: Vec<u8>) -> Result<String>;

    /// Create a generation job for the given input.
    async fn submit(&self, input: PredictionInput) -> Result<Prediction>;

    /// Fetch the current state of a job by id.
    async fn status(&self, id: &str) -> Result<Prediction>;
}

/// Replicate HTTP API client. Holds no per-attempt state, so one
/// client can serve any number of independent attempts.
pub struct ReplicateClient {
    http: reqwest::Client,
    api_base: String,
    api_token: String,
    model_version: String,
}

impl ReplicateClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            model_version: config.model_version.clone(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token)
    }
}

#[async_trait]
impl GenerationBackend for ReplicateClient {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String> {
        let url = format!("{}/files", self.api_base);
        debug!("uploading {} bytes to {}", bytes.len(), url);

        // Raw octet-stream body, not multipart and not base64.
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.bearer())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Upload {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upload {
                reason: format!("HTTP {}: {}", status.as_u16(), body),
            });
        }

        let body = response.text().await.map_err(|e| Error::Upload {
            reason: e.to_string(),
        })?;
        let uploaded: UploadedFile =
            serde_json::from_str(&body).map_err(|e| Error::Upload {
                reason: format!("malformed response: {e}"),
            })?;
        match uploaded.url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(Error::Upload {
                reason: "response missing URL".to_string(),
            }),
        }
    }

    async fn submit(&self, input: PredictionInput) -> Result<Prediction> {
        let url = format!("{}/predictions", self.api_base);
        let request = CreatePrediction {
            version: self.model_version.clone(),
            input,
        };

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.bearer())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Submit {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn status(&self, id: &str) -> Result<Prediction> {
        let url = format!("{}/predictions/{}", self.api_base, id);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
