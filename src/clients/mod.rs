//! Typed wrappers around [`CollectionClient`](collection_actor::CollectionClient).
//!
//! Each client maps runtime failures to its collection's error type and exposes
//! the collection's operations by name. `get`, `list` and `delete` come from
//! [`ActorClient`](collection_actor::ActorClient).

pub mod machine_client;
pub mod material_client;
pub mod operator_client;
pub mod order_client;
pub mod process_client;
pub mod quality_client;
pub mod traceability_client;

pub use machine_client::*;
pub use material_client::*;
pub use operator_client::*;
pub use order_client::*;
pub use process_client::*;
pub use quality_client::*;
pub use traceability_client::*;
