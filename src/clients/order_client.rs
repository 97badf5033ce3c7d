//! Client for production orders.
//!
//! Besides the actions, it offers two read-side searches over id, reference and
//! product name: [`OrderClient::search`] sorted by due date and
//! [`OrderClient::find`] in stored order.

use crate::model::{OrderCreate, OrderStatus, OrderUpdate, ProductionOrder};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use chrono::NaiveDate;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<ProductionOrder>,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<ProductionOrder>) -> Self {
        Self { inner }
    }

    /// Creates a planned order and returns its id.
    #[instrument(skip(self, order), fields(reference = %order.reference))]
    pub async fn add_order(&self, order: OrderCreate) -> Result<String, OrderError> {
        debug!("Sending request");
        self.inner.create(order).await.map_err(OrderError::from)
    }

    #[instrument(skip(self, update))]
    pub async fn edit(&self, id: String, update: OrderUpdate) -> Result<ProductionOrder, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(OrderError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: String,
        status: OrderStatus,
    ) -> Result<ProductionOrder, OrderError> {
        self.act(id, OrderAction::SetStatus(status)).await
    }

    /// Records the produced quantity; progress and status follow from it.
    #[instrument(skip(self))]
    pub async fn update_produced_quantity(
        &self,
        id: String,
        quantity: i64,
    ) -> Result<ProductionOrder, OrderError> {
        self.act(id, OrderAction::RecordProduction(quantity)).await
    }

    /// Places the order on a single machine for the given dates.
    #[instrument(skip(self))]
    pub async fn schedule(
        &self,
        id: String,
        machine_id: String,
        start_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<ProductionOrder, OrderError> {
        self.act(
            id,
            OrderAction::Schedule {
                machine_id,
                start_date,
                due_date,
            },
        )
        .await
    }

    /// Orders matching `term`, earliest due date first.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<ProductionOrder>, OrderError> {
        let mut orders: Vec<_> = self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.matches(term))
            .collect();
        orders.sort_by_key(|o| o.due_date);
        Ok(orders)
    }

    /// Orders matching `term` in collection order, as listed by the traceability view.
    #[instrument(skip(self))]
    pub async fn find(&self, term: &str) -> Result<Vec<ProductionOrder>, OrderError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.matches(term))
            .collect())
    }

    async fn act(&self, id: String, action: OrderAction) -> Result<ProductionOrder, OrderError> {
        debug!(?action, "Sending action");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl ActorClient<ProductionOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<ProductionOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
