//! Client for the raw-material stock, including the low-stock query.

use crate::material_actor::{MaterialAction, MaterialError};
use crate::model::{Material, MaterialCreate, MaterialUpdate};
use async_trait::async_trait;
use collection_actor::{ActorClient, CollectionClient, FrameworkError};
use tracing::{debug, instrument};

/// Client for interacting with the Material actor.
#[derive(Clone)]
pub struct MaterialClient {
    inner: CollectionClient<Material>,
}

impl MaterialClient {
    pub fn new(inner: CollectionClient<Material>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, material), fields(name = %material.name))]
    pub async fn add_material(&self, material: MaterialCreate) -> Result<String, MaterialError> {
        debug!("Sending request");
        self.inner.create(material).await.map_err(MaterialError::from)
    }

    #[instrument(skip(self, update))]
    pub async fn edit(&self, id: String, update: MaterialUpdate) -> Result<Material, MaterialError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(MaterialError::from)
    }

    /// Adds `delta` to the stock (negative to consume).
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: String, delta: f64) -> Result<Material, MaterialError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, MaterialAction::AdjustStock(delta))
            .await
            .map_err(MaterialError::from)
    }

    /// Materials at or below their reorder threshold.
    pub async fn low_stock(&self) -> Result<Vec<Material>, MaterialError> {
        Ok(self.list().await?.into_iter().filter(Material::is_low).collect())
    }
}

#[async_trait]
impl ActorClient<Material> for MaterialClient {
    type Error = MaterialError;

    fn inner(&self) -> &CollectionClient<Material> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        MaterialError::from(e)
    }
}
