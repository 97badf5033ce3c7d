//! [`CollectionEntity`] implementation for [`Machine`].

use super::actions::MachineAction;
use super::error::MachineError;
use crate::clock::Clock;
use crate::ids;
use crate::model::{Machine, MachineCreate, MachineUpdate, MaintenanceLogEntry, MaintenanceRecord};
use async_trait::async_trait;
use chrono::Days;
use collection_actor::CollectionEntity;

/// Days between commissioning and the first scheduled maintenance.
pub const FIRST_MAINTENANCE_DAYS: u64 = 30;

fn non_negative(field: &'static str, value: f64) -> Result<f64, MachineError> {
    if value < 0.0 || value.is_nan() {
        return Err(MachineError::InvalidCounter { field, value });
    }
    Ok(value)
}

impl Machine {
    fn log_maintenance(&mut self, record: MaintenanceRecord) {
        let id = ids::next_child_id("ML", 2, self.maintenance_log.iter().map(|e| e.id.as_str()));
        if record.date > self.last_maintenance {
            self.last_maintenance = record.date;
        }
        self.maintenance_log.push(MaintenanceLogEntry {
            id,
            machine_id: self.id.clone(),
            date: record.date,
            kind: record.kind,
            description: record.description,
            technician: record.technician,
        });
    }
}

#[async_trait]
impl CollectionEntity for Machine {
    type Id = String;
    type Create = MachineCreate;
    type Update = MachineUpdate;
    type Action = MachineAction;
    type ActionResult = Machine;
    type Context = Clock;
    type Error = MachineError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Stamps the commissioning date as the last maintenance.
    fn from_create(id: String, params: MachineCreate, clock: &Clock) -> Result<Self, MachineError> {
        let today = clock.today();
        Ok(Self {
            id,
            name: params.name,
            reference: params.reference,
            machine_type: params.machine_type,
            function: params.function,
            capacity: params.capacity,
            purchase_cost: params.purchase_cost.max(0.0),
            status: params.status,
            efficiency: 100.0,
            operating_time: 0.0,
            downtime: 0.0,
            last_maintenance: today,
            next_maintenance: today
                .checked_add_days(Days::new(FIRST_MAINTENANCE_DAYS))
                .unwrap_or(today),
            maintenance_log: Vec::new(),
        })
    }

    async fn on_update(&mut self, update: MachineUpdate, _clock: &Clock) -> Result<(), MachineError> {
        if let Some(efficiency) = update.efficiency {
            self.efficiency = efficiency.clamp(0.0, 100.0);
        }
        if let Some(hours) = update.operating_time {
            self.operating_time = non_negative("operating time", hours)?;
        }
        if let Some(hours) = update.downtime {
            self.downtime = non_negative("downtime", hours)?;
        }
        if let Some(next) = update.next_maintenance {
            self.next_maintenance = next;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: MachineAction,
        _clock: &Clock,
    ) -> Result<Machine, MachineError> {
        match action {
            MachineAction::SetStatus(status) => self.status = status,
            MachineAction::LogMaintenance(record) => self.log_maintenance(record),
        }
        Ok(self.clone())
    }
}
