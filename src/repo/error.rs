use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no company with id {0}")]
    UnknownCompany(String),
    #[error("storage error: {0}")]
    Storage(String),
}
