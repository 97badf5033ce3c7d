//! # Generic Messages
//!
//! Requests exchanged between a [`CollectionClient`](crate::CollectionClient) and its
//! [`CollectionActor`](crate::CollectionActor).

use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot response channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a collection actor.
///
/// The variants are the CRUD operations every collection supports, plus `List`
/// (the whole collection in stored order) and `Action` for record-specific logic.
#[derive(Debug)]
pub enum CollectionRequest<T: CollectionEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: CollectionEntity> CollectionRequest<T> {
    /// Name of the operation, for logs and test diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "Create",
            Self::Get { .. } => "Get",
            Self::List { .. } => "List",
            Self::Update { .. } => "Update",
            Self::Delete { .. } => "Delete",
            Self::Action { .. } => "Action",
        }
    }
}
