//! # Traceability Actor
//!
//! Owns the event history linking production orders to material issues,
//! process steps, inspections and dispatches. Events are append-only.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::TraceabilityClient;
use crate::ids;
use crate::model::TraceabilityEvent;
use collection_actor::CollectionActor;

/// Creates the traceability actor, seeded with `events`, and its client.
pub fn new(
    buffer_size: usize,
    events: Vec<TraceabilityEvent>,
) -> (CollectionActor<TraceabilityEvent>, TraceabilityClient) {
    let next_event_id = ids::sequence(
        "TR",
        3,
        ids::next_number("TR", events.iter().map(|e| e.id.as_str())),
    );
    let (actor, generic_client) = CollectionActor::new(buffer_size, next_event_id);
    (actor.seeded(events), TraceabilityClient::new(generic_client))
}
