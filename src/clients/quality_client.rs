//! Client for inspection reports.

use crate::model::{QualityReport, QualityReportCreate};
use crate::quality_actor::QualityError;
use async_trait::async_trait;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Quality actor.
#[derive(Clone)]
pub struct QualityClient {
    inner: CollectionClient<QualityReport>,
}

impl QualityClient {
    pub fn new(inner: CollectionClient<QualityReport>) -> Self {
        Self { inner }
    }

    /// Files an inspection report dated today.
    #[instrument(skip(self, report), fields(order_id = %report.order_id))]
    pub async fn add_report(&self, report: QualityReportCreate) -> Result<String, QualityError> {
        debug!("Sending request");
        self.inner.create(report).await.map_err(QualityError::from)
    }
}

#[async_trait]
impl ActorClient<QualityReport> for QualityClient {
    type Error = QualityError;

    fn inner(&self) -> &CollectionClient<QualityReport> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        QualityError::from(e)
    }
}
