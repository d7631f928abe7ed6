//! Review submission transport

use crate::app::services::review_form::ReviewPayload;
use crate::config::NetworkConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, info};

/// Destination for submitted reviews
#[async_trait]
pub trait ReviewSubmitter: Send + Sync {
    async fn submit(&self, payload: &ReviewPayload) -> Result<()>;
}

/// Posts reviews as JSON to a web endpoint
#[derive(Debug, Clone)]
pub struct HttpReviewSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReviewSubmitter {
    pub fn new(endpoint: impl Into<String>, network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(network.timeout())
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport("", "Failed to build HTTP client", Some(e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewSubmitter for HttpReviewSubmitter {
    async fn submit(&self, payload: &ReviewPayload) -> Result<()> {
        debug!("POST review from {} to {}", payload.name, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::transport(&self.endpoint, "review submission failed", Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(&self.endpoint, status.as_u16()));
        }

        info!("Review submitted ({})", status);
        Ok(())
    }
}

/// Keeps submitted reviews in memory
#[derive(Debug, Default)]
pub struct MemoryReviewSubmitter {
    submitted: Mutex<Vec<ReviewPayload>>,
}

impl MemoryReviewSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<ReviewPayload> {
        self.submitted
            .lock()
            .map(|submitted| submitted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReviewSubmitter for MemoryReviewSubmitter {
    async fn submit(&self, payload: &ReviewPayload) -> Result<()> {
        let mut submitted = self
            .submitted
            .lock()
            .map_err(|_| Error::configuration("review submitter lock poisoned"))?;
        submitted.push(payload.clone());
        Ok(())
    }
}
