use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Stream not found")]
    StreamNotFound(u64),
    #[error("Invalid status")]
    InvalidStatus(Option<String>),
    #[error("repository error: {0}")]
    Repository(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
