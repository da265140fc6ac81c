use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error("storage error: {0}")]
    Storage(String),
}
