use thiserror::Error;

use crate::repo::RepoError;

/// Caller-facing failures from the top-level verification flow. Per-probe
/// outcomes are never surfaced here — they're collected into the response
/// and the person's history instead (see [`super::VerificationOutcome`]).
#[derive(Debug, Error)]
pub enum GuessError {
    #[error("no MX record for domain")]
    NoMxRecord,

    #[error("could not determine a domain for this company")]
    DomainUnknown,

    #[error("verification failed: {source}")]
    VerificationError {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("repository error: {0}")]
    Repo(#[from] RepoError),
}

impl GuessError {
    pub(super) fn verification(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::VerificationError { source: Box::new(source) }
    }
}
