//! Gantt layout of the production orders.
//!
//! This is a visual calendar only: orders are placed where their dates say,
//! nothing is rescheduled.

pub mod timeline;

pub use timeline::*;
