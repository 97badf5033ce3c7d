//! # CollectionEntity Trait
//!
//! The contract every record type (order, machine, material, …) implements to be
//! owned by a [`CollectionActor`](crate::CollectionActor). It names the DTOs used
//! to create and update a record, the custom actions it understands, the runtime
//! context injected into its hooks and its error type.
//!
//! # Provided Methods (Hooks)
//! - [`CollectionEntity::on_create`]
//! - [`CollectionEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any record must implement to be managed by a `CollectionActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they may await other actors. The `Context` type is
/// passed to `run()` rather than `new()`, so dependencies can be wired after every
/// actor has been constructed.
#[async_trait]
pub trait CollectionEntity: Clone + Send + Sync + 'static {
    /// Identifier of a record inside its collection (`"OP-2024-001"`, `"M-01"`, …).
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// Payload required to create a record.
    type Create: Send + Sync + Debug;

    /// Payload applied by an update request.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. `SetStatus`, `RecordProduction`).
    type Action: Send + Sync + Debug;

    /// Result returned by [`CollectionEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected when the actor starts. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error type for this record.
    ///
    /// One error enum per collection, shared by every hook and action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// New records are inserted at the front of the collection instead of the back.
    const INSERT_AT_FRONT: bool = false;

    /// The identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Build the record from a freshly generated id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload to the record.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the record is removed from the collection.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
