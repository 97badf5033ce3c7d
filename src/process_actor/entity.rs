//! [`CollectionEntity`] implementation for [`ManufacturingProcess`].

use super::actions::{ProcessAction, ProcessActionResult};
use super::error::ProcessError;
use crate::ids;
use crate::model::{ManufacturingProcess, ProcessCreate, ProcessStep, ProcessUpdate, StepCreate};
use async_trait::async_trait;
use collection_actor::CollectionEntity;

impl ManufacturingProcess {
    fn push_step(&mut self, step: StepCreate) -> ProcessStep {
        let step = ProcessStep {
            id: ids::next_child_id("ST", 2, self.steps.iter().map(|s| s.id.as_str())),
            order: self.steps.len() as u32 + 1,
            name: step.name,
            machine_type: step.machine_type,
            standard_time: step.standard_time.max(0.0),
            instructions: step.instructions,
        };
        self.steps.push(step.clone());
        step
    }
}

#[async_trait]
impl CollectionEntity for ManufacturingProcess {
    type Id = String;
    type Create = ProcessCreate;
    type Update = ProcessUpdate;
    type Action = ProcessAction;
    type ActionResult = ProcessActionResult;
    type Context = ();
    type Error = ProcessError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, params: ProcessCreate, _ctx: &()) -> Result<Self, ProcessError> {
        let mut process = Self {
            id,
            product_reference: params.product_reference,
            name: params.name,
            version: params.version,
            steps: Vec::with_capacity(params.steps.len()),
        };
        for step in params.steps {
            process.push_step(step);
        }
        Ok(process)
    }

    async fn on_update(&mut self, update: ProcessUpdate, _ctx: &()) -> Result<(), ProcessError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(version) = update.version {
            self.version = version;
        }
        if let Some(reference) = update.product_reference {
            self.product_reference = reference;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProcessAction,
        _ctx: &(),
    ) -> Result<ProcessActionResult, ProcessError> {
        match action {
            ProcessAction::AddStep(step) => Ok(ProcessActionResult::AddStep(self.push_step(step))),
            ProcessAction::RemoveStep(step_id) => {
                let pos = self
                    .steps
                    .iter()
                    .position(|s| s.id == step_id)
                    .ok_or_else(|| ProcessError::StepNotFound {
                        process_id: self.id.clone(),
                        step_id,
                    })?;
                let removed = self.steps.remove(pos);
                for (i, step) in self.steps.iter_mut().enumerate() {
                    step.order = i as u32 + 1;
                }
                Ok(ProcessActionResult::RemoveStep(removed))
            }
        }
    }
}
