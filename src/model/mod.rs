//! Plain records of the plant, each owned by its own collection actor.
//!
//! Field names serialize in camelCase and enum values keep the labels used by
//! existing data files, so persisted collections load unchanged.

pub mod machine;
pub mod material;
pub mod operator;
pub mod order;
pub mod process;
pub mod quality;
pub mod traceability;

pub use machine::*;
pub use material::*;
pub use operator::*;
pub use order::*;
pub use process::*;
pub use quality::*;
pub use traceability::*;
