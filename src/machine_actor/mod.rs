//! # Machine Actor
//!
//! Owns the machine fleet. New machines start at 100% efficiency with their
//! first maintenance due thirty days after commissioning; the commissioning date
//! comes from the [`Clock`](crate::clock::Clock) context.
//!
//! Deleting a machine removes only the machine: orders keep referencing its id.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::MachineClient;
use crate::ids;
use crate::model::Machine;
use collection_actor::CollectionActor;

/// Creates the machine actor, seeded with `machines`, and its client.
pub fn new(buffer_size: usize, machines: Vec<Machine>) -> (CollectionActor<Machine>, MachineClient) {
    let next_machine_id = ids::sequence(
        "M",
        2,
        ids::next_number("M", machines.iter().map(|m| m.id.as_str())),
    );
    let (actor, generic_client) = CollectionActor::new(buffer_size, next_machine_id);
    (actor.seeded(machines), MachineClient::new(generic_client))
}
