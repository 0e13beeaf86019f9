use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegAdminError>;

#[derive(Debug, Error)]
pub enum RegAdminError {
    #[error("store error: {0}")]
    Store(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
