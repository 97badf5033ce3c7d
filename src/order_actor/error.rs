//! Error types for the Order actor.

use collection_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Every generated identifier was already taken.
    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(e) => *e,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::IdSpaceExhausted(attempts) => OrderError::IdSpaceExhausted(attempts),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
