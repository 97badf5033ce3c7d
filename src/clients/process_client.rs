//! Client for manufacturing routings and their steps.

use crate::model::{ManufacturingProcess, ProcessCreate, ProcessStep, ProcessUpdate, StepCreate};
use crate::process_actor::{ProcessAction, ProcessActionResult, ProcessError};
use async_trait::async_trait;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Process actor.
#[derive(Clone)]
pub struct ProcessClient {
    inner: CollectionClient<ManufacturingProcess>,
}

impl ProcessClient {
    pub fn new(inner: CollectionClient<ManufacturingProcess>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, process), fields(reference = %process.product_reference))]
    pub async fn add_process(&self, process: ProcessCreate) -> Result<String, ProcessError> {
        debug!("Sending request");
        self.inner.create(process).await.map_err(ProcessError::from)
    }

    #[instrument(skip(self, update))]
    pub async fn edit(
        &self,
        id: String,
        update: ProcessUpdate,
    ) -> Result<ManufacturingProcess, ProcessError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(ProcessError::from)
    }

    /// Appends a step and returns it with its number and id.
    #[instrument(skip(self, step), fields(step = %step.name))]
    pub async fn add_step(&self, process_id: String, step: StepCreate) -> Result<ProcessStep, ProcessError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(process_id, ProcessAction::AddStep(step))
            .await
            .map_err(ProcessError::from)?
        {
            ProcessActionResult::AddStep(step) => Ok(step),
            other => Err(unexpected(other)),
        }
    }

    /// Removes a step; the remaining steps are renumbered.
    #[instrument(skip(self))]
    pub async fn remove_step(
        &self,
        process_id: String,
        step_id: String,
    ) -> Result<ProcessStep, ProcessError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(process_id, ProcessAction::RemoveStep(step_id))
            .await
            .map_err(ProcessError::from)?
        {
            ProcessActionResult::RemoveStep(step) => Ok(step),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: ProcessActionResult) -> ProcessError {
    ProcessError::ActorCommunicationError(format!("Unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<ManufacturingProcess> for ProcessClient {
    type Error = ProcessError;

    fn inner(&self) -> &CollectionClient<ManufacturingProcess> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProcessError::from(e)
    }
}
