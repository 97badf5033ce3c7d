//! Error types for the Material actor.

use collection_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MaterialError {
    #[error("Material not found: {0}")]
    NotFound(String),

    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for MaterialError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => MaterialError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<MaterialError>() {
                Ok(e) => *e,
                Err(other) => MaterialError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::IdSpaceExhausted(attempts) => MaterialError::IdSpaceExhausted(attempts),
            other => MaterialError::ActorCommunicationError(other.to_string()),
        }
    }
}
