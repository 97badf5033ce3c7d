//! Custom actions for the Machine actor. Each returns the machine as stored afterwards.

use crate::model::{MachineStatus, MaintenanceRecord};

#[derive(Debug, Clone)]
pub enum MachineAction {
    /// Any status may be set from any other.
    SetStatus(MachineStatus),
    /// Appends an entry to the maintenance log.
    LogMaintenance(MaintenanceRecord),
}
