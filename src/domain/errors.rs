use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("storage failure: {0}")]
    Storage(anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DomainError {
    pub fn storage(err: anyhow::Error) -> Self {
        DomainError::Storage(err)
    }
}
