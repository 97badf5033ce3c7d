//! # Plant System
//!
//! Starts one actor per collection, wires persistence and the shared revision
//! counter into each, and shuts them all down together.

use crate::clients::{
    MachineClient, MaterialClient, OperatorClient, OrderClient, ProcessClient, QualityClient,
    TraceabilityClient,
};
use crate::clock::Clock;
use crate::machine_actor::MachineError;
use crate::material_actor::MaterialError;
use crate::metrics::PlantSnapshot;
use crate::operator_actor::OperatorError;
use crate::order_actor::OrderError;
use crate::process_actor::ProcessError;
use crate::quality_actor::QualityError;
use crate::storage::{Collection, JsonStore};
use crate::traceability_actor::TraceabilityError;
use collection_actor::{ActorClient, ChangeObserver, CollectionActor, CollectionEntity};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Machine(#[from] MachineError),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error(transparent)]
    Operator(#[from] OperatorError),
    #[error(transparent)]
    Quality(#[from] QualityError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Traceability(#[from] TraceabilityError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// Handles to every collection of the plant. Cheap to clone.
#[derive(Clone)]
pub struct PlantClients {
    pub orders: OrderClient,
    pub machines: MachineClient,
    pub materials: MaterialClient,
    pub operators: OperatorClient,
    pub quality: QualityClient,
    pub processes: ProcessClient,
    pub traceability: TraceabilityClient,
}

impl PlantClients {
    /// The collections the dashboard metrics are computed from, fetched concurrently.
    pub async fn snapshot(&self) -> Result<PlantSnapshot, SystemError> {
        let (orders, machines, materials, operators, quality_reports) = tokio::try_join!(
            async { self.orders.list().await.map_err(SystemError::from) },
            async { self.machines.list().await.map_err(SystemError::from) },
            async { self.materials.list().await.map_err(SystemError::from) },
            async { self.operators.list().await.map_err(SystemError::from) },
            async { self.quality.list().await.map_err(SystemError::from) },
        )?;
        Ok(PlantSnapshot {
            orders,
            machines,
            materials,
            operators,
            quality_reports,
        })
    }
}

/// Counts successful mutations across every collection of the plant.
#[derive(Clone)]
struct RevisionCounter(Arc<watch::Sender<u64>>);

impl<T> ChangeObserver<T> for RevisionCounter {
    fn on_change(&self, _items: &[T]) {
        self.0.send_modify(|revision| *revision += 1);
    }
}

/// The running plant: seven collection actors sharing a store and a clock.
///
/// Every actor is seeded from the [`JsonStore`] (falling back to the bundled
/// fixtures), writes its collection back after each mutation and bumps the
/// shared store revision that [`MetricsService`](crate::metrics::MetricsService)
/// uses to know when to recompute.
///
/// # Example
///
/// ```ignore
/// let system = PlantSystem::start(JsonStore::new("./data"), Clock::System, 32);
/// let id = system.clients.orders.add_order(order).await?;
/// system.shutdown().await?;
/// ```
pub struct PlantSystem {
    pub clients: PlantClients,
    revision: watch::Receiver<u64>,
    handles: Vec<JoinHandle<()>>,
}

impl PlantSystem {
    /// Loads every collection and spawns its actor. Must be called inside a Tokio runtime.
    pub fn start(store: JsonStore, clock: Clock, buffer_size: usize) -> Self {
        info!(data_dir = %store.dir().display(), "Starting plant");
        let (revision_tx, revision) = watch::channel(0u64);
        let counter = RevisionCounter(Arc::new(revision_tx));
        let mut handles = Vec::with_capacity(Collection::ALL.len());

        let (actor, orders) =
            crate::order_actor::new(buffer_size, store.load(Collection::Orders), clock);
        handles.push(spawn(actor, &store, Collection::Orders, &counter, ()));

        let (actor, machines) = crate::machine_actor::new(buffer_size, store.load(Collection::Machines));
        handles.push(spawn(actor, &store, Collection::Machines, &counter, clock));

        let (actor, materials) =
            crate::material_actor::new(buffer_size, store.load(Collection::Materials));
        handles.push(spawn(actor, &store, Collection::Materials, &counter, ()));

        let (actor, operators) =
            crate::operator_actor::new(buffer_size, store.load(Collection::Operators));
        handles.push(spawn(actor, &store, Collection::Operators, &counter, ()));

        let (actor, quality) = crate::quality_actor::new(buffer_size, store.load(Collection::Quality));
        handles.push(spawn(actor, &store, Collection::Quality, &counter, clock));

        let (actor, processes) =
            crate::process_actor::new(buffer_size, store.load(Collection::Processes));
        handles.push(spawn(actor, &store, Collection::Processes, &counter, ()));

        let (actor, traceability) =
            crate::traceability_actor::new(buffer_size, store.load(Collection::Traceability));
        handles.push(spawn(actor, &store, Collection::Traceability, &counter, clock));

        Self {
            clients: PlantClients {
                orders,
                machines,
                materials,
                operators,
                quality,
                processes,
                traceability,
            },
            revision,
            handles,
        }
    }

    /// Receiver of the store revision, bumped after every successful mutation.
    pub fn revision(&self) -> watch::Receiver<u64> {
        self.revision.clone()
    }

    pub async fn snapshot(&self) -> Result<PlantSnapshot, SystemError> {
        self.clients.snapshot().await
    }

    /// Drops the clients and waits for every actor to finish.
    ///
    /// Clones of the clients held elsewhere keep their actor alive, so they must
    /// be dropped first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down plant...");
        drop(self.clients);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("Plant shutdown complete.");
        Ok(())
    }
}

fn spawn<T>(
    actor: CollectionActor<T>,
    store: &JsonStore,
    collection: Collection,
    counter: &RevisionCounter,
    context: T::Context,
) -> JoinHandle<()>
where
    T: CollectionEntity + Serialize,
{
    let actor = actor
        .with_observer(store.persist::<T>(collection))
        .with_observer(counter.clone());
    tokio::spawn(actor.run(context))
}
