//! # Material Actor
//!
//! Owns the raw-material stock. Stock levels never go below zero: creation and
//! [`MaterialAction::AdjustStock`] clamp at 0.

pub mod entity;
pub mod error;

pub use entity::MaterialAction;
pub use error::*;

use crate::clients::MaterialClient;
use crate::ids;
use crate::model::Material;
use collection_actor::CollectionActor;

/// Creates the material actor, seeded with `materials`, and its client.
pub fn new(
    buffer_size: usize,
    materials: Vec<Material>,
) -> (CollectionActor<Material>, MaterialClient) {
    let next_material_id = ids::sequence(
        "MAT",
        2,
        ids::next_number("MAT", materials.iter().map(|m| m.id.as_str())),
    );
    let (actor, generic_client) = CollectionActor::new(buffer_size, next_material_id);
    (actor.seeded(materials), MaterialClient::new(generic_client))
}
