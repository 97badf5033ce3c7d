//! Error types for the Traceability actor.

use collection_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TraceabilityError {
    #[error("Traceability event not found: {0}")]
    NotFound(String),

    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for TraceabilityError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => TraceabilityError::NotFound(id),
            FrameworkError::IdSpaceExhausted(attempts) => TraceabilityError::IdSpaceExhausted(attempts),
            other => TraceabilityError::ActorCommunicationError(other.to_string()),
        }
    }
}
