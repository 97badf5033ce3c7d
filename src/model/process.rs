use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub id: String,
    /// 1-based position in the routing.
    pub order: u32,
    pub name: String,
    pub machine_type: String,
    /// Minutes.
    pub standard_time: f64,
    pub instructions: String,
}

/// A routing: the ordered steps used to manufacture one product reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingProcess {
    pub id: String,
    pub product_reference: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
}

impl ManufacturingProcess {
    /// Sum of the standard times of every step, in minutes.
    pub fn total_standard_time(&self) -> f64 {
        self.steps.iter().map(|s| s.standard_time).sum()
    }
}

/// Step fields supplied by the caller; id and position are assigned by the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCreate {
    pub name: String,
    pub machine_type: String,
    pub standard_time: f64,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCreate {
    pub product_reference: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub steps: Vec<StepCreate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessUpdate {
    pub name: Option<String>,
    pub version: Option<String>,
    pub product_reference: Option<String>,
}
