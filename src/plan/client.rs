use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::time::Duration;
use crate::config::PlanServiceConfig;
use crate::error::{ErrorKind, PlannerError};
use super::{Plan, PlanRequest};

/// The external prioritization service.
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn generate(&self, request: &PlanRequest) -> Result<Plan>;
}

/// Prioritization service reached over HTTP (POST JSON, JSON response).
pub struct HttpPlanService {
    client: Client,
    endpoint: String,
}

impl HttpPlanService {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| {
                PlannerError::new(format!("Failed to create HTTP client: {}", e), "startup")
                    .with_kind(ErrorKind::Config)
            })?;
        Ok(HttpPlanService {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &PlanServiceConfig) -> Result<Self, PlannerError> {
        Self::new(config.url.clone(), config.timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlanService for HttpPlanService {
    async fn generate(&self, request: &PlanRequest) -> Result<Plan> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to plan service at {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            anyhow::bail!("Plan service returned {}: {}", status, preview);
        }

        let plan = response
            .json::<Plan>()
            .await
            .context("Plan service returned an unreadable plan")?;
        Ok(plan)
    }
}
