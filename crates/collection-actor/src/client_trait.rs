//! # ActorClient Trait
//!
//! Shared read and delete operations for the typed clients that wrap a
//! [`CollectionClient`].

use crate::{CollectionClient, CollectionEntity, FrameworkError};
use async_trait::async_trait;

/// Implemented by every collection-specific client.
///
/// Implementors supply the inner [`CollectionClient`] and an error mapping; `get`,
/// `list` and `delete` come for free.
#[async_trait]
pub trait ActorClient<T: CollectionEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map runtime errors to the collection error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every record of the collection, in stored order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Remove a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
