//! # Collection Actor
//!
//! The server half of a collection: owns the records, generates identifiers and
//! processes requests one at a time on its own Tokio task.

use crate::client::CollectionClient;
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use crate::message::CollectionRequest;
use crate::observer::ChangeObserver;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How many times the identifier generator is asked for an unused id before giving up.
pub const MAX_ID_ATTEMPTS: usize = 64;

type IdGenerator<T> = Box<dyn FnMut() -> <T as CollectionEntity>::Id + Send>;

/// The actor that owns one collection of records.
///
/// Records are kept in a `Vec` so the collection keeps its stored order (creation
/// order, or newest first for entities with [`CollectionEntity::INSERT_AT_FRONT`]).
/// Because requests are processed sequentially, the collection needs no lock.
///
/// # Operations
///
/// * **Create**: asks the generator for ids until one is not already used, builds the
///   record, runs `on_create`, stores it and notifies observers.
/// * **Get** / **List**: clones of the stored records.
/// * **Update** / **Action**: the hook runs on a copy of the record, which replaces
///   the stored one only if the hook succeeds. Observers are notified on success.
/// * **Delete**: runs `on_delete`, removes the record, notifies observers.
pub struct CollectionActor<T: CollectionEntity> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    items: Vec<T>,
    next_id: IdGenerator<T>,
    observers: Vec<Box<dyn ChangeObserver<T>>>,
}

impl<T: CollectionEntity> CollectionActor<T> {
    /// Creates an empty actor and the client used to talk to it.
    ///
    /// `buffer_size` is the capacity of the request channel; `next_id` produces
    /// candidate identifiers for new records.
    pub fn new(
        buffer_size: usize,
        next_id: impl FnMut() -> T::Id + Send + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            items: Vec::new(),
            next_id: Box::new(next_id),
            observers: Vec::new(),
        };
        (actor, CollectionClient::new(sender))
    }

    /// Starts the actor on an existing collection (e.g. loaded from disk).
    pub fn seeded(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Registers an observer notified after every successful mutation.
    pub fn with_observer(mut self, observer: impl ChangeObserver<T> + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn fresh_id(&mut self) -> Result<T::Id, FrameworkError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = (self.next_id)();
            if self.position(&candidate).is_none() {
                return Ok(candidate);
            }
            debug!(%candidate, "Generated id already in use");
        }
        Err(FrameworkError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_change(&self.items);
        }
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every hook of every record.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.items.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = match self.fresh_id() {
                        Ok(id) => id,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                    };
                    let mut item = match T::from_create(id.clone(), params, &context) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if T::INSERT_AT_FRONT {
                        self.items.insert(0, item);
                    } else {
                        self.items.push(item);
                    }
                    info!(entity_type, %id, size = self.items.len(), "Created");
                    self.notify();
                    let _ = respond_to.send(Ok(id));
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.position(&id).map(|pos| self.items[pos].clone());
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::List { respond_to } => {
                    debug!(entity_type, size = self.items.len(), "List");
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                CollectionRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(pos) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = self.items[pos].clone();
                    if let Err(e) = draft.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.items[pos] = draft.clone();
                    info!(entity_type, %id, "Updated");
                    self.notify();
                    let _ = respond_to.send(Ok(draft));
                }
                CollectionRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(pos) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = self.items[pos].on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.items.remove(pos);
                    info!(entity_type, %id, size = self.items.len(), "Deleted");
                    self.notify();
                    let _ = respond_to.send(Ok(()));
                }
                CollectionRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(pos) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = self.items[pos].clone();
                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            self.items[pos] = draft;
                            info!(entity_type, %id, "Action ok");
                            self.notify();
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.items.len(), "Shutdown");
    }
}
