//! Ports (interfaces) towards the external marketing platform.
//! The services only talk to the platform through these contracts.

use std::time::Duration;

use async_trait::async_trait;

use super::models::{BlockListRequest, ClientRecord};

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors that can occur while talking to the platform
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Request exceeded the {0:?} deadline")]
    Timeout(Duration),

    #[error("Platform responded with HTTP status {0}")]
    Status(u16),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed platform response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Other(String),
}

/// Outbound calls made against the platform API.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetches every client account visible to the configured API key.
    async fn list_clients(&self) -> PlatformResult<Vec<ClientRecord>>;

    /// Adds the given entries to a client's domain block list.
    async fn add_domain_block_list(&self, request: &BlockListRequest) -> PlatformResult<()>;
}
