//! Custom actions for the Order actor.
//!
//! Every action returns the order as stored after the action.

use crate::model::OrderStatus;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Sets the status.
    ///
    /// `Completed` also sets progress to 100 and the produced quantity to the
    /// planned quantity. `InProgress` on an order with progress 0 sets progress to 1.
    SetStatus(OrderStatus),

    /// Records the produced quantity (negative values count as 0).
    ///
    /// Progress becomes `min(100, round(100 × produced / planned))`, 100 when
    /// nothing is planned. Progress 100 completes the order; any progress on a
    /// planned order puts it in progress.
    RecordProduction(i64),

    /// Assigns the order to exactly one machine and replaces its dates.
    Schedule {
        machine_id: String,
        start_date: NaiveDate,
        due_date: NaiveDate,
    },
}
