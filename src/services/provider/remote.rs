use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::RoastProvider;
use crate::error::ProviderError;
use crate::kernel::form::SubmissionRecord;
use crate::kernel::roast::RoastResult;

/// Talks to `POST <base>/api/roast`.
#[derive(Clone)]
pub struct RemoteProvider {
    client: Client,
    base_url: String,
}

/// Only `roast` is required; the service may echo or augment the rest.
#[derive(Deserialize)]
struct RoastResponse {
    roast: String,
    #[serde(default)]
    id: Option<String>,
}

impl RemoteProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .user_agent(concat!("roastme/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/roast", self.base_url)
    }
}

#[async_trait]
impl RoastProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, record: &SubmissionRecord) -> Result<RoastResult, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(record)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            warn!("Roast service error: {}", response.status());
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: RoastResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if body.roast.trim().is_empty() {
            return Err(ProviderError::Malformed("empty roast".to_string()));
        }

        debug!("Roast {} received", body.id.as_deref().unwrap_or("-"));

        // The session gets back exactly what it sent, whatever the echo says.
        Ok(RoastResult::new(body.roast, record.clone()))
    }
}
