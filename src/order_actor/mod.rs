//! # Order Actor
//!
//! Owns the production orders (OP). Besides CRUD, the actor understands three
//! actions that keep status, progress and produced quantity consistent:
//!
//! - [`OrderAction::SetStatus`]: completing an order fills it; starting an untouched
//!   order marks it 1% done.
//! - [`OrderAction::RecordProduction`]: derives progress from the produced quantity
//!   and moves the status forward.
//! - [`OrderAction::Schedule`]: places the order on one machine for a date range.
//!
//! ## Structure
//!
//! - [`entity`] - [`CollectionEntity`](collection_actor::CollectionEntity) implementation for [`ProductionOrder`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::clock::Clock;
use crate::ids;
use crate::model::ProductionOrder;
use chrono::Datelike;
use collection_actor::CollectionActor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates the order actor, seeded with `orders`, and its client.
///
/// Identifiers look like `OP-2024-005`: the current year from `clock` and a
/// sequence starting after the highest seeded number for that year.
pub fn new(
    buffer_size: usize,
    orders: Vec<ProductionOrder>,
    clock: Clock,
) -> (CollectionActor<ProductionOrder>, OrderClient) {
    let prefix = format!("OP-{}", clock.today().year());
    let start = ids::next_number(&prefix, orders.iter().map(|o| o.id.as_str()));
    let order_id_counter = Arc::new(AtomicU64::new(start));
    let next_order_id = move || {
        let n = order_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("OP-{}-{:03}", clock.today().year(), n)
    };

    let (actor, generic_client) = CollectionActor::new(buffer_size, next_order_id);
    (actor.seeded(orders), OrderClient::new(generic_client))
}
