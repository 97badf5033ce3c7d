//! # Operator Actor
//!
//! Owns the personnel roster. New operators are marked present.

pub mod entity;
pub mod error;

pub use entity::OperatorAction;
pub use error::*;

use crate::clients::OperatorClient;
use crate::ids;
use crate::model::Operator;
use collection_actor::CollectionActor;

/// Creates the operator actor, seeded with `operators`, and its client.
pub fn new(
    buffer_size: usize,
    operators: Vec<Operator>,
) -> (CollectionActor<Operator>, OperatorClient) {
    let next_operator_id = ids::sequence(
        "OP",
        2,
        ids::next_number("OP", operators.iter().map(|o| o.id.as_str())),
    );
    let (actor, generic_client) = CollectionActor::new(buffer_size, next_operator_id);
    (actor.seeded(operators), OperatorClient::new(generic_client))
}
