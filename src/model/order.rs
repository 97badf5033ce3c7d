/// A production order (OP) on the shop floor.
///
/// # Collection Actor
/// Implements [`CollectionEntity`](collection_actor::CollectionEntity); see
/// [`order_actor`](crate::order_actor) for the update rules and actions.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a production order. The serialized values match the
/// persisted layout of existing data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Planifié")]
    Planned,
    #[serde(rename = "En Cours")]
    InProgress,
    #[serde(rename = "Terminé")]
    Completed,
    #[serde(rename = "Retard")]
    Delayed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Planned,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Delayed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Planned => "Planifié",
            OrderStatus::InProgress => "En Cours",
            OrderStatus::Completed => "Terminé",
            OrderStatus::Delayed => "Retard",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOrder {
    pub id: String,
    pub product_name: String,
    pub reference: String,
    pub quantity_planned: u32,
    pub quantity_produced: u32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: OrderStatus,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    #[serde(default)]
    pub assigned_machine_ids: Vec<String>,
    #[serde(default)]
    pub assigned_operator_ids: Vec<String>,
}

impl ProductionOrder {
    /// Case-insensitive substring match on id, reference or product name.
    /// An empty term matches every order.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.id.to_lowercase().contains(&term)
            || self.reference.to_lowercase().contains(&term)
            || self.product_name.to_lowercase().contains(&term)
    }
}

/// DTO for order creation. Status, progress and produced quantity are set by the actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub product_name: String,
    pub reference: String,
    pub quantity_planned: u32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub assigned_machine_ids: Vec<String>,
    #[serde(default)]
    pub assigned_operator_ids: Vec<String>,
}

/// DTO for editing the descriptive fields of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub product_name: Option<String>,
    pub reference: Option<String>,
    pub quantity_planned: Option<u32>,
    pub assigned_operator_ids: Option<Vec<String>>,
}
