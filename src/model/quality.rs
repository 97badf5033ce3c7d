use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The outcome of one inspection. `order_id` is not checked against the orders collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub id: String,
    pub order_id: String,
    pub checked_quantity: u32,
    pub rejected_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defect_reason: Option<String>,
    pub date: NaiveDate,
    pub inspector: String,
}

impl QualityReport {
    /// Rejected share in percent, 0 when nothing was checked.
    pub fn reject_rate(&self) -> f64 {
        if self.checked_quantity == 0 {
            return 0.0;
        }
        f64::from(self.rejected_quantity) / f64::from(self.checked_quantity) * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReportCreate {
    pub order_id: String,
    pub checked_quantity: u32,
    pub rejected_quantity: u32,
    pub defect_reason: Option<String>,
    pub inspector: String,
}
