use thiserror::Error;

use stockcast_core::DomainError;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("invalid job input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
