//! # Dashboard Metrics
//!
//! Read-side reducers over a [`PlantSnapshot`]:
//!
//! - [`kpi`]: OEE, maintenance, finance, quality, production and stock KPIs.
//! - [`period`]: the overview for a date range (order mix, costs, alerts, OEE trend).
//! - [`service`]: caches the KPIs and recomputes them when the store revision moves.

pub mod kpi;
pub mod period;
pub mod service;

pub use kpi::*;
pub use period::*;
pub use service::*;
