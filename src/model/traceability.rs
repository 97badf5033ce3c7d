use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceabilityKind {
    Material,
    Process,
    Quality,
    Dispatch,
}

/// One timestamped occurrence in the history of a production order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceabilityEvent {
    pub id: String,
    pub order_id: String,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: TraceabilityKind,
    pub description: String,
    /// Operator or inspector name.
    pub actor: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceabilityEventCreate {
    pub order_id: String,
    /// Defaults to the current minute when absent.
    pub timestamp: Option<NaiveDateTime>,
    pub kind: TraceabilityKind,
    pub description: String,
    pub actor: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

/// `YYYY-MM-DD HH:MM` timestamps.
pub mod minute_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_uses_minute_timestamps_and_upper_case_kinds() {
        let raw = r#"{"id":"TR-001","orderId":"OP-2023-001","timestamp":"2023-10-25 08:30",
            "type":"MATERIAL","description":"Sortie Stock Matière","actor":"Magasinier",
            "details":{"Qty":"250kg","Batch":"ACIER-LOT-884"}}"#;
        let event: TraceabilityEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(event.kind, TraceabilityKind::Material);
        assert_eq!(event.timestamp.format("%H:%M").to_string(), "08:30");

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["timestamp"], "2023-10-25 08:30");
        assert_eq!(back["type"], "MATERIAL");
        let keys: Vec<_> = event.details.keys().cloned().collect();
        assert_eq!(keys, ["Batch", "Qty"]);
    }
}
