use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating state of a machine. Any state may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    #[serde(rename = "En Marche")]
    Running,
    #[serde(rename = "En Attente")]
    Idle,
    #[serde(rename = "En Panne")]
    Down,
    #[serde(rename = "Maintenance")]
    Maintenance,
}

impl MachineStatus {
    pub const ALL: [MachineStatus; 4] = [
        MachineStatus::Running,
        MachineStatus::Idle,
        MachineStatus::Down,
        MachineStatus::Maintenance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MachineStatus::Running => "En Marche",
            MachineStatus::Idle => "En Attente",
            MachineStatus::Down => "En Panne",
            MachineStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    Preventive,
    Corrective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLogEntry {
    pub id: String,
    pub machine_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: String,
    pub technician: String,
}

/// A machine of the fleet with its counters and maintenance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    pub name: String,
    pub reference: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub function: String,
    /// Free text, e.g. `"500 T"` or `"200 u/h"`.
    pub capacity: String,
    pub purchase_cost: f64,
    pub status: MachineStatus,
    /// Efficiency percentage.
    pub efficiency: f64,
    /// Cumulative hours.
    pub operating_time: f64,
    /// Cumulative hours.
    pub downtime: f64,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    #[serde(default)]
    pub maintenance_log: Vec<MaintenanceLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineCreate {
    pub name: String,
    pub reference: String,
    pub machine_type: String,
    pub function: String,
    pub capacity: String,
    pub purchase_cost: f64,
    pub status: MachineStatus,
}

/// Counters and schedule fields that can be edited on an existing machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineUpdate {
    pub efficiency: Option<f64>,
    pub operating_time: Option<f64>,
    pub downtime: Option<f64>,
    pub next_maintenance: Option<NaiveDate>,
}

/// Input for a new maintenance log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub date: NaiveDate,
    pub kind: MaintenanceType,
    pub description: String,
    pub technician: String,
}
