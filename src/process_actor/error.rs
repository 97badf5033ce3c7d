//! Error types for the Process actor.

use collection_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProcessError {
    #[error("Process not found: {0}")]
    NotFound(String),

    /// The step does not belong to the process.
    #[error("Step {step_id} not found in process {process_id}")]
    StepNotFound { process_id: String, step_id: String },

    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProcessError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProcessError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProcessError>() {
                Ok(e) => *e,
                Err(other) => ProcessError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::IdSpaceExhausted(attempts) => ProcessError::IdSpaceExhausted(attempts),
            other => ProcessError::ActorCommunicationError(other.to_string()),
        }
    }
}
