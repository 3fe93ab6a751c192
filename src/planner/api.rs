//! HTTP client for the remote plan-generation service.

use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::planner::errors::PlanApiError;
use crate::planner::json::parse_json_with_context;
use crate::planner::models::{PlanRequest, RawPlanResponse};

/// Relative to the configured base URL, which may carry its own path prefix.
pub const GENERATE_PLAN_PATH: &str = "api/generate-plan";

/// Anything that can turn a [`PlanRequest`] into a raw plan response.
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<RawPlanResponse, PlanApiError>;
}

/// Talks to the plan service over HTTP.
pub struct PlanApi {
    http: reqwest::Client,
    endpoint: Url,
}

impl PlanApi {
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("Invalid plan service URL '{base_url}'"))?;
        // Without a trailing slash, join would replace the last path segment.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let endpoint = base
            .join(GENERATE_PLAN_PATH)
            .context("Failed to build plan endpoint URL")?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PlanService for PlanApi {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<RawPlanResponse, PlanApiError> {
        debug!(url = %self.endpoint, "requesting plan");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "plan service rejected request");
            return Err(PlanApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        parse_json_with_context(&body).map_err(|source| PlanApiError::Malformed {
            status: status.as_u16(),
            url: self.endpoint.to_string(),
            source,
        })
    }
}
