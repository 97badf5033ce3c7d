//! Error types for the Quality actor.

use collection_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QualityError {
    #[error("Quality report not found: {0}")]
    NotFound(String),

    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for QualityError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => QualityError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<QualityError>() {
                Ok(e) => *e,
                Err(other) => QualityError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::IdSpaceExhausted(attempts) => QualityError::IdSpaceExhausted(attempts),
            other => QualityError::ActorCommunicationError(other.to_string()),
        }
    }
}
