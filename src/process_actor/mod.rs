//! # Process Actor
//!
//! Owns the manufacturing routings. Steps are numbered from 1 in the order they
//! were added and carry identifiers unique within their process.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProcessClient;
use crate::ids;
use crate::model::ManufacturingProcess;
use collection_actor::CollectionActor;

/// Creates the process actor, seeded with `processes`, and its client.
pub fn new(
    buffer_size: usize,
    processes: Vec<ManufacturingProcess>,
) -> (CollectionActor<ManufacturingProcess>, ProcessClient) {
    let next_process_id = ids::sequence(
        "PROC",
        3,
        ids::next_number("PROC", processes.iter().map(|p| p.id.as_str())),
    );
    let (actor, generic_client) = CollectionActor::new(buffer_size, next_process_id);
    (actor.seeded(processes), ProcessClient::new(generic_client))
}
