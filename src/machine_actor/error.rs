//! Error types for the Machine actor.

use collection_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during machine operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    /// The requested machine was not found.
    #[error("Machine not found: {0}")]
    NotFound(String),

    /// Hour counters cannot go below zero.
    #[error("Invalid {field}: {value}")]
    InvalidCounter { field: &'static str, value: f64 },

    /// Every generated identifier was already taken.
    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for MachineError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => MachineError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<MachineError>() {
                Ok(e) => *e,
                Err(other) => MachineError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::IdSpaceExhausted(attempts) => MachineError::IdSpaceExhausted(attempts),
            other => MachineError::ActorCommunicationError(other.to_string()),
        }
    }
}
