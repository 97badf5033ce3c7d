//! # Change Observers
//!
//! Observers are told about every successful mutation of a collection and receive
//! the whole collection in stored order. They are how the application mirrors a
//! collection to disk and bumps the store revision used by derived metrics.

/// Receives the full collection after each successful create, update, delete or action.
///
/// Called on the actor task, so implementations must not block for long and must
/// not send requests back to the same actor.
pub trait ChangeObserver<T>: Send + Sync {
    fn on_change(&self, items: &[T]);
}

impl<T, F> ChangeObserver<T> for F
where
    F: Fn(&[T]) + Send + Sync,
{
    fn on_change(&self, items: &[T]) {
        self(items)
    }
}
