// Gateway sensor models
use super::metric::MetricKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// `"{device_id}/{value_type}"`, identifies a sensor across devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(device_id: &str, value_type: &str) -> Self {
        Self(format!("{}/{}", device_id, value_type))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Id assigned by the gateway. Kept in whatever JSON form the gateway used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorId {
    Number(serde_json::Number),
    Text(String),
}

impl SensorId {
    /// Numbers of any kind and non-empty strings are ids; anything else is not.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(SensorId::Number(n.clone())),
            Value::String(s) if !s.is_empty() => Some(SensorId::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<u64> for SensorId {
    fn from(id: u64) -> Self {
        SensorId::Number(id.into())
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorId::Number(n) => write!(f, "{}", n),
            SensorId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSource {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of the gateway's sensor configuration listing.
/// Fields the bridge does not use are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfiguration {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub source: Option<SensorSource>,
}

impl SensorConfiguration {
    pub fn sensor_id(&self) -> Option<SensorId> {
        self.id.as_ref().and_then(SensorId::from_json)
    }

    pub fn is_from(&self, source_name: &str) -> bool {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .is_some_and(|name| name == source_name)
    }
}

/// Raw listing; entries are decoded one by one so a record the bridge
/// cannot read never hides the others.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfigurations {
    #[serde(default)]
    pub config: Vec<Value>,
}

impl SensorConfigurations {
    pub fn into_entries(self) -> Vec<SensorConfiguration> {
        self.config
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(configuration) => Some(configuration),
                Err(e) => {
                    tracing::debug!("Skipping unreadable sensor configuration: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Payload for registering a new sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRegistration {
    pub external_id: String,
    pub source: SensorSource,
    pub name: String,
    pub physical_quantity: String,
    pub unit: String,
}

impl SensorRegistration {
    pub fn new(external_id: &ExternalId, kind: MetricKind, source_name: &str) -> Self {
        Self {
            external_id: external_id.as_str().to_string(),
            source: SensorSource {
                kind: Some("plugin".to_string()),
                name: Some(source_name.to_string()),
            },
            name: kind.display_name().to_string(),
            physical_quantity: kind.physical_quantity().to_string(),
            unit: kind.unit().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatus {
    pub id: SensorId,
    pub value: f64,
}

/// `{"success": ...}` envelope returned by gateway write calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: Value,
}

impl ApiResponse {
    pub fn new(success: bool) -> Self {
        Self {
            success: Value::Bool(success),
        }
    }

    /// Missing, `null`, `false`, zero and empty values all count as failure.
    pub fn is_success(&self) -> bool {
        match &self.success {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}

/// Sensors previously registered by this bridge, keyed by external id.
#[derive(Debug, Clone, Default)]
pub struct KnownSensors {
    by_external_id: HashMap<ExternalId, SensorId>,
}

impl KnownSensors {
    pub fn from_configurations(configurations: &[SensorConfiguration], source_name: &str) -> Self {
        let by_external_id = configurations
            .iter()
            .filter(|c| c.is_from(source_name))
            .filter_map(|c| {
                let external_id = c.external_id.as_deref().filter(|e| !e.is_empty())?;
                Some((ExternalId(external_id.to_string()), c.sensor_id()?))
            })
            .collect();

        Self { by_external_id }
    }

    pub fn get(&self, external_id: &ExternalId) -> Option<&SensorId> {
        self.by_external_id.get(external_id)
    }

    pub fn insert(&mut self, external_id: ExternalId, sensor_id: SensorId) {
        self.by_external_id.insert(external_id, sensor_id);
    }

    pub fn len(&self) -> usize {
        self.by_external_id.len()
    }
}

/// Find the id of a sensor registered by `source_name` under `external_id`.
pub fn find_sensor_id(
    configurations: &[SensorConfiguration],
    external_id: &ExternalId,
    source_name: &str,
) -> Option<SensorId> {
    configurations
        .iter()
        .filter(|c| c.external_id.as_deref() == Some(external_id.as_str()) && c.is_from(source_name))
        .find_map(|c| c.sensor_id())
}
