//! # Factory Floor
//!
//! Back office of a manufacturing-operations dashboard: production orders,
//! machines, raw materials, personnel, quality reports, manufacturing processes
//! and traceability events, with the KPIs derived from them.
//!
//! ## Architecture
//!
//! Each collection is owned by one actor from the
//! [`collection_actor`] crate. The seven actors together are the plant's only
//! mutable state; they process requests one at a time and need no locks.
//!
//! ### 1. The Records ([`model`])
//! Plain serde structs with the camelCase layout of the persisted JSON files.
//!
//! ### 2. The Actors ([`order_actor`], [`machine_actor`], [`material_actor`],
//! [`operator_actor`], [`quality_actor`], [`process_actor`], [`traceability_actor`])
//! Each implements [`CollectionEntity`](collection_actor::CollectionEntity) for its
//! record: creation defaults, update rules, domain actions and its error type.
//!
//! ### 3. The Interface ([`clients`])
//! Typed wrappers around the generic client, one per collection, exposing the
//! operations of the dashboard views (`update_produced_quantity`, `log_maintenance`,
//! `add_step`, ...).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`PlantSystem`](lifecycle::PlantSystem) loads every collection from the
//! [`storage`] directory, spawns the actors, mirrors each mutation to disk and
//! bumps a shared store revision.
//!
//! ### 5. The Read Side ([`metrics`], [`planning`], [`reports`], [`analysis`])
//! Pure reducers over snapshots of the collections: OEE and the other dashboard
//! KPIs, the period overview, the Gantt layout, per-collection statistics and
//! the AI-written production analysis.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- metrics
//! cargo run -- orders produce OP-2023-002 40
//! ```

pub mod analysis;
pub mod clients;
pub mod clock;
pub mod config;
pub mod ids;
pub mod lifecycle;
pub mod machine_actor;
pub mod material_actor;
pub mod metrics;
pub mod model;
pub mod operator_actor;
pub mod order_actor;
pub mod planning;
pub mod process_actor;
pub mod quality_actor;
pub mod reports;
pub mod storage;
pub mod traceability_actor;
