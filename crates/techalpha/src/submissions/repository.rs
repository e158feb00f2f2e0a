use async_trait::async_trait;

use super::domain::{RecordId, SubmissionRecord};

/// Storage abstraction so the service module can be exercised in isolation.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, record: SubmissionRecord) -> Result<RecordId, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("record rejected by store: {0}")]
    Rejected(String),
}
