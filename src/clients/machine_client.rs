//! Client for the machine fleet.

use crate::machine_actor::{MachineAction, MachineError};
use crate::model::{Machine, MachineCreate, MachineStatus, MachineUpdate, MaintenanceRecord};
use async_trait::async_trait;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Machine actor.
#[derive(Clone)]
pub struct MachineClient {
    inner: CollectionClient<Machine>,
}

impl MachineClient {
    pub fn new(inner: CollectionClient<Machine>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, machine), fields(reference = %machine.reference))]
    pub async fn add_machine(&self, machine: MachineCreate) -> Result<String, MachineError> {
        debug!("Sending request");
        self.inner.create(machine).await.map_err(MachineError::from)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: String, status: MachineStatus) -> Result<Machine, MachineError> {
        self.act(id, MachineAction::SetStatus(status)).await
    }

    #[instrument(skip(self, record), fields(date = %record.date))]
    pub async fn log_maintenance(
        &self,
        id: String,
        record: MaintenanceRecord,
    ) -> Result<Machine, MachineError> {
        self.act(id, MachineAction::LogMaintenance(record)).await
    }

    /// Updates efficiency, hour counters or the next maintenance date.
    #[instrument(skip(self, update))]
    pub async fn update_counters(
        &self,
        id: String,
        update: MachineUpdate,
    ) -> Result<Machine, MachineError> {
        debug!(?update, "Sending request");
        self.inner.update(id, update).await.map_err(MachineError::from)
    }

    async fn act(&self, id: String, action: MachineAction) -> Result<Machine, MachineError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(MachineError::from)
    }
}

#[async_trait]
impl ActorClient<Machine> for MachineClient {
    type Error = MachineError;

    fn inner(&self) -> &CollectionClient<Machine> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        MachineError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_actor::mock::{create_mock_client, expect_update};

    #[tokio::test]
    async fn counter_updates_reach_the_actor_unchanged() {
        let (inner, mut receiver) = create_mock_client::<Machine>(4);
        let client = MachineClient::new(inner);

        let task = tokio::spawn(async move {
            client
                .update_counters(
                    "M-02".into(),
                    MachineUpdate {
                        downtime: Some(12.5),
                        ..Default::default()
                    },
                )
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, "M-02");
        assert_eq!(update.downtime, Some(12.5));
        assert_eq!(update.efficiency, None);
        drop(responder);

        assert!(matches!(
            task.await.unwrap(),
            Err(MachineError::ActorCommunicationError(_))
        ));
    }
}
