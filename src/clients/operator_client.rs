//! Client for the personnel roster.

use crate::model::{Operator, OperatorCreate, OperatorUpdate};
use crate::operator_actor::{OperatorAction, OperatorError};
use async_trait::async_trait;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Operator actor.
#[derive(Clone)]
pub struct OperatorClient {
    inner: CollectionClient<Operator>,
}

impl OperatorClient {
    pub fn new(inner: CollectionClient<Operator>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, operator), fields(name = %operator.name))]
    pub async fn add_operator(&self, operator: OperatorCreate) -> Result<String, OperatorError> {
        debug!("Sending request");
        self.inner.create(operator).await.map_err(OperatorError::from)
    }

    #[instrument(skip(self, update))]
    pub async fn edit(&self, id: String, update: OperatorUpdate) -> Result<Operator, OperatorError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(OperatorError::from)
    }

    #[instrument(skip(self))]
    pub async fn set_presence(&self, id: String, present: bool) -> Result<Operator, OperatorError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OperatorAction::SetPresence(present))
            .await
            .map_err(OperatorError::from)
    }
}

#[async_trait]
impl ActorClient<Operator> for OperatorClient {
    type Error = OperatorError;

    fn inner(&self) -> &CollectionClient<Operator> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OperatorError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_actor::mock::MockClient;

    #[tokio::test]
    async fn deleting_an_unknown_operator_is_not_found() {
        let mut mock = MockClient::<Operator>::new();
        mock.expect_delete("OP-09".into())
            .return_err(FrameworkError::NotFound("OP-09".into()));

        let err = OperatorClient::new(mock.client())
            .delete("OP-09".into())
            .await
            .unwrap_err();

        assert_eq!(err, OperatorError::NotFound("OP-09".into()));
        mock.verify();
    }
}
