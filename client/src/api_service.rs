use crate::config::ClientConfig;
use crate::document::SelectedFile;
use crate::error::{ClientError, Result};
use crate::models::*;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// What the backend told us after accepting a PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    pub job_id: Option<String>,
    pub message: Option<String>,
}

/// The external question-answering backend.
///
/// Every call maps a request that could not complete (connection, timeout,
/// undecodable body) to [`ClientError::Transport`] and a decoded reply with
/// `success: false` to [`ClientError::Application`].
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReceipt>;

    async fn ask(&self, request: &AskRequest) -> Result<String>;

    async fn health(&self) -> Result<HealthResponse>;

    async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse>;
}

pub struct HttpDocumentApi {
    client: Client,
    config: ClientConfig,
}

impl HttpDocumentApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Decodes the body as JSON whatever the status code; FastAPI error replies
/// still carry a useful `detail`.
async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        log::warn!("Undecodable reply from {} ({}): {}", endpoint, status, body);
        ClientError::Transport(format!("invalid JSON from {} ({}): {}", endpoint, status, e))
    })
}

async fn expect_ok<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ClientError::Transport(format!(
            "{} returned {}: {}",
            endpoint, status, error_text
        )));
    }
    decode(response, endpoint).await
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReceipt> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let reply: UploadResponse = decode(response, "/upload").await?;
        if !reply.succeeded() {
            return Err(ClientError::Application(reply.server_message()));
        }

        Ok(UploadReceipt {
            job_id: reply.job_id,
            message: reply.message,
        })
    }

    async fn ask(&self, request: &AskRequest) -> Result<String> {
        let response = self
            .client
            .post(self.config.ask_url())
            .json(request)
            .send()
            .await?;

        let reply: AskResponse = decode(response, "/ask").await?;
        if !reply.succeeded() {
            return Err(ClientError::Application(reply.server_message()));
        }

        // success without an answer has nothing to show
        reply.answer.ok_or(ClientError::Application(None))
    }

    async fn health(&self) -> Result<HealthResponse> {
        let response = self.client.get(self.config.health_url()).send().await?;
        expect_ok(response, "/health").await
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let response = self.client.get(self.config.status_url(job_id)).send().await?;
        expect_ok(response, "/status").await
    }
}
