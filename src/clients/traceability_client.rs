//! Client for the traceability history.

use crate::model::{TraceabilityEvent, TraceabilityEventCreate};
use crate::traceability_actor::TraceabilityError;
use async_trait::async_trait;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Traceability actor.
#[derive(Clone)]
pub struct TraceabilityClient {
    inner: CollectionClient<TraceabilityEvent>,
}

impl TraceabilityClient {
    pub fn new(inner: CollectionClient<TraceabilityEvent>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, event), fields(order_id = %event.order_id, kind = ?event.kind))]
    pub async fn record_event(&self, event: TraceabilityEventCreate) -> Result<String, TraceabilityError> {
        debug!("Sending request");
        self.inner.create(event).await.map_err(TraceabilityError::from)
    }

    /// The history of one order, oldest first.
    #[instrument(skip(self))]
    pub async fn events_for_order(&self, order_id: &str) -> Result<Vec<TraceabilityEvent>, TraceabilityError> {
        let mut events: Vec<_> = self
            .list()
            .await?
            .into_iter()
            .filter(|e| e.order_id == order_id)
            .collect();
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }
}

#[async_trait]
impl ActorClient<TraceabilityEvent> for TraceabilityClient {
    type Error = TraceabilityError;

    fn inner(&self) -> &CollectionClient<TraceabilityEvent> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TraceabilityError::from(e)
    }
}
