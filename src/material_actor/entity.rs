//! [`CollectionEntity`] implementation for [`Material`]: stock clamped at zero.

use super::error::MaterialError;
use crate::model::{Material, MaterialCreate, MaterialUpdate};
use async_trait::async_trait;
use collection_actor::CollectionEntity;

#[derive(Debug, Clone)]
pub enum MaterialAction {
    /// Adds `delta` (negative to consume) to the stock, flooring at zero.
    /// Returns the material as stored afterwards.
    AdjustStock(f64),
}

#[async_trait]
impl CollectionEntity for Material {
    type Id = String;
    type Create = MaterialCreate;
    type Update = MaterialUpdate;
    type Action = MaterialAction;
    type ActionResult = Material;
    type Context = ();
    type Error = MaterialError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, params: MaterialCreate, _ctx: &()) -> Result<Self, MaterialError> {
        Ok(Self {
            id,
            name: params.name,
            stock: params.stock.max(0.0),
            unit: params.unit,
            min_threshold: params.min_threshold.max(0.0),
            daily_consumption: params.daily_consumption,
            unit_cost: params.unit_cost,
        })
    }

    async fn on_update(&mut self, update: MaterialUpdate, _ctx: &()) -> Result<(), MaterialError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(threshold) = update.min_threshold {
            self.min_threshold = threshold.max(0.0);
        }
        if let Some(consumption) = update.daily_consumption {
            self.daily_consumption = Some(consumption.max(0.0));
        }
        if let Some(cost) = update.unit_cost {
            self.unit_cost = Some(cost.max(0.0));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: MaterialAction,
        _ctx: &(),
    ) -> Result<Material, MaterialError> {
        match action {
            MaterialAction::AdjustStock(delta) => {
                self.stock = (self.stock + delta).max(0.0);
            }
        }
        Ok(self.clone())
    }
}
