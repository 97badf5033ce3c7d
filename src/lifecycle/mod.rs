//! Startup and shutdown of the plant.
//!
//! - [`plant_system`]: spawns the collection actors and hands out their clients.
//! - [`tracing`]: logging setup for the binary.

pub mod plant_system;
pub mod tracing;

pub use plant_system::{PlantClients, PlantSystem, SystemError};
pub use tracing::setup_tracing;
