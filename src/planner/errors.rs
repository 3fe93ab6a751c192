//! Error types for the plan service client.

#[derive(Debug, thiserror::Error)]
pub enum PlanApiError {
    /// Non-2xx reply. The body is never parsed.
    #[error("plan service returned status {status}")]
    Status { status: u16 },
    #[error("plan service request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to parse plan response")]
    Malformed {
        status: u16,
        url: String,
        #[source]
        source: anyhow::Error,
    },
}
