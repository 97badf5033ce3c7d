//! [`CollectionEntity`] implementation for [`Operator`].

use super::error::OperatorError;
use crate::model::{Operator, OperatorCreate, OperatorUpdate};
use async_trait::async_trait;
use collection_actor::CollectionEntity;

#[derive(Debug, Clone)]
pub enum OperatorAction {
    /// Marks the operator present or absent; returns the stored operator.
    SetPresence(bool),
}

#[async_trait]
impl CollectionEntity for Operator {
    type Id = String;
    type Create = OperatorCreate;
    type Update = OperatorUpdate;
    type Action = OperatorAction;
    type ActionResult = Operator;
    type Context = ();
    type Error = OperatorError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, params: OperatorCreate, _ctx: &()) -> Result<Self, OperatorError> {
        Ok(Self {
            id,
            name: params.name,
            role: params.role,
            shift: params.shift,
            skills: params.skills,
            present: true,
            efficiency: None,
            salary: params.salary.max(0.0),
        })
    }

    async fn on_update(&mut self, update: OperatorUpdate, _ctx: &()) -> Result<(), OperatorError> {
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(shift) = update.shift {
            self.shift = shift;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(salary) = update.salary {
            self.salary = salary.max(0.0);
        }
        if let Some(efficiency) = update.efficiency {
            self.efficiency = Some(efficiency.clamp(0.0, 100.0));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OperatorAction,
        _ctx: &(),
    ) -> Result<Operator, OperatorError> {
        match action {
            OperatorAction::SetPresence(present) => self.present = present,
        }
        Ok(self.clone())
    }
}
