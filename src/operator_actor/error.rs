//! Error types for the Operator actor.

use collection_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperatorError {
    #[error("Operator not found: {0}")]
    NotFound(String),

    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OperatorError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OperatorError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<OperatorError>() {
                Ok(e) => *e,
                Err(other) => OperatorError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::IdSpaceExhausted(attempts) => OperatorError::IdSpaceExhausted(attempts),
            other => OperatorError::ActorCommunicationError(other.to_string()),
        }
    }
}
