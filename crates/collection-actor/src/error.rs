//! # Framework Errors
//!
//! Errors raised by the collection runtime itself, independent of any record type.

/// Errors that can occur within the collection runtime.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("No free identifier after {0} attempts")]
    IdSpaceExhausted(usize),
}
