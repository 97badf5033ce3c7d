//! [`CollectionEntity`] implementation for [`QualityReport`].
//!
//! Reports are inserted at the front and cannot be edited.

use super::error::QualityError;
use crate::clock::Clock;
use crate::model::{QualityReport, QualityReportCreate};
use async_trait::async_trait;
use collection_actor::CollectionEntity;
use std::convert::Infallible;

#[async_trait]
impl CollectionEntity for QualityReport {
    type Id = String;
    type Create = QualityReportCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = Clock;
    type Error = QualityError;

    const INSERT_AT_FRONT: bool = true;

    fn id(&self) -> &String {
        &self.id
    }

    /// Dated today. The rejected quantity is capped at the checked quantity and a
    /// blank defect reason is stored as none.
    fn from_create(
        id: String,
        params: QualityReportCreate,
        clock: &Clock,
    ) -> Result<Self, QualityError> {
        Ok(Self {
            id,
            order_id: params.order_id,
            checked_quantity: params.checked_quantity,
            rejected_quantity: params.rejected_quantity.min(params.checked_quantity),
            defect_reason: params
                .defect_reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            date: clock.today(),
            inspector: params.inspector,
        })
    }

    async fn on_update(&mut self, update: Infallible, _clock: &Clock) -> Result<(), QualityError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _clock: &Clock) -> Result<(), QualityError> {
        match action {}
    }
}
