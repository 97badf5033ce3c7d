use serde::{Deserialize, Serialize};

/// A raw material held in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub stock: f64,
    pub unit: String,
    pub min_threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_consumption: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
}

impl Material {
    /// At or below the reorder threshold.
    pub fn is_low(&self) -> bool {
        self.stock <= self.min_threshold
    }

    pub fn stock_value(&self) -> f64 {
        self.stock * self.unit_cost.unwrap_or(0.0)
    }

    pub fn daily_cost(&self) -> f64 {
        self.daily_consumption.unwrap_or(0.0) * self.unit_cost.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCreate {
    pub name: String,
    pub stock: f64,
    pub unit: String,
    pub min_threshold: f64,
    pub daily_consumption: Option<f64>,
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUpdate {
    pub name: Option<String>,
    pub min_threshold: Option<f64>,
    pub daily_consumption: Option<f64>,
    pub unit_cost: Option<f64>,
}
