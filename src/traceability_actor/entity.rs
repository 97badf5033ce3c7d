//! [`CollectionEntity`] implementation for [`TraceabilityEvent`].

use super::error::TraceabilityError;
use crate::clock::{self, Clock};
use crate::model::{TraceabilityEvent, TraceabilityEventCreate};
use async_trait::async_trait;
use collection_actor::CollectionEntity;
use std::convert::Infallible;

#[async_trait]
impl CollectionEntity for TraceabilityEvent {
    type Id = String;
    type Create = TraceabilityEventCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = Clock;
    type Error = TraceabilityError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Events recorded without a timestamp are stamped with the current minute;
    /// given timestamps are truncated to the minute.
    fn from_create(
        id: String,
        params: TraceabilityEventCreate,
        clock: &Clock,
    ) -> Result<Self, TraceabilityError> {
        Ok(Self {
            id,
            order_id: params.order_id,
            timestamp: params
                .timestamp
                .map(clock::to_minute)
                .unwrap_or_else(|| clock.now()),
            kind: params.kind,
            description: params.description,
            actor: params.actor,
            details: params.details,
        })
    }

    async fn on_update(&mut self, update: Infallible, _clock: &Clock) -> Result<(), TraceabilityError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _clock: &Clock,
    ) -> Result<(), TraceabilityError> {
        match action {}
    }
}
