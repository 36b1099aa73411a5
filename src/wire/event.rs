use crate::{Result, SatelliteError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Transport-level envelope shared by every message kind
///
/// Serializes as `{"type": "...", "data": {...}}`. A missing or `null` `data`
/// reads as an empty map, and an empty map is left out on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(rename = "type")]
    event_type: String,

    #[serde(
        default,
        deserialize_with = "deserialize_data",
        skip_serializing_if = "Map::is_empty"
    )]
    data: Map<String, Value>,
}

fn deserialize_data<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl WireEvent {
    /// Create an event with no payload
    pub fn new(event_type: impl Into<String>) -> Self {
        Self::with_data(event_type, Map::new())
    }

    /// Create an event carrying `data`
    pub fn with_data(event_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Look up a single payload key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_type(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }

    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.event_type, self.data)
    }

    /// Reject events without a discriminator
    pub fn validate(&self) -> Result<()> {
        if self.event_type.is_empty() {
            return Err(SatelliteError::EmptyEventType);
        }
        Ok(())
    }
}
