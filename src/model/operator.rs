use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "Matin")]
    Morning,
    #[serde(rename = "Après-midi")]
    Afternoon,
    #[serde(rename = "Nuit")]
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Matin",
            Shift::Afternoon => "Après-midi",
            Shift::Night => "Nuit",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub role: String,
    pub shift: Shift,
    #[serde(default)]
    pub skills: Vec<String>,
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(default)]
    pub salary: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorCreate {
    pub name: String,
    pub role: String,
    pub shift: Shift,
    pub skills: Vec<String>,
    pub salary: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorUpdate {
    pub role: Option<String>,
    pub shift: Option<Shift>,
    pub skills: Option<Vec<String>>,
    pub salary: Option<f64>,
    pub efficiency: Option<f64>,
}

/// Splits a comma-separated skills field, trimming entries and dropping empty ones.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
