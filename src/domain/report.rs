// Device report - inbound payload pushed by sensor.community firmware
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Report is missing the device id (esp8266id)")]
    MissingDeviceId,

    #[error("Report has an unexpected shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// One push from a device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceReport {
    #[serde(rename = "esp8266id")]
    pub device_id: String,
    #[serde(default)]
    pub software_version: Option<String>,
    #[serde(rename = "sensordatavalues", default)]
    pub readings: Vec<MetricReading>,
}

/// The value is kept raw and only interpreted for metrics the bridge forwards,
/// so unknown firmware fields may carry anything.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricReading {
    pub value_type: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl MetricReading {
    /// Firmware sends values as strings ("23.20"); plain numbers are tolerated.
    pub fn numeric_value(&self) -> Option<f64> {
        match self.value.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn raw_value(&self) -> String {
        match &self.value {
            Some(Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => "missing".to_string(),
        }
    }
}

impl DeviceReport {
    /// Decode a raw request body.
    ///
    /// The device id is checked separately so a missing id is reported as such
    /// rather than as a generic shape error.
    pub fn decode(body: &[u8]) -> Result<Self, ReportError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(ReportError::InvalidJson)?;

        if value.get("esp8266id").is_none_or(|id| id.is_null()) {
            return Err(ReportError::MissingDeviceId);
        }

        serde_json::from_value(value).map_err(ReportError::InvalidShape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "esp8266id": "12345678",
        "software_version": "NRZ-2020-133",
        "sensordatavalues": [
            {"value_type": "SDS_P1", "value": "7.18"},
            {"value_type": "SDS_P2", "value": "2.58"},
            {"value_type": "temperature", "value": "23.20"},
            {"value_type": "humidity", "value": "46.40"},
            {"value_type": "samples", "value": "5029246"},
            {"value_type": "signal", "value": "-60"}
        ]
    }"#;

    #[test]
    fn test_decode_firmware_report() {
        let report = DeviceReport::decode(SAMPLE.as_bytes()).unwrap();
        assert_eq!(report.device_id, "12345678");
        assert_eq!(report.software_version.as_deref(), Some("NRZ-2020-133"));

        let types: Vec<&str> = report.readings.iter().map(|r| r.value_type.as_str()).collect();
        assert_eq!(types, ["SDS_P1", "SDS_P2", "temperature", "humidity", "samples", "signal"]);
        assert_eq!(report.readings[2].numeric_value(), Some(23.2));
    }

    #[test]
    fn test_missing_readings_is_empty() {
        let report = DeviceReport::decode(br#"{"esp8266id": "1"}"#).unwrap();
        assert!(report.readings.is_empty());
        assert!(report.software_version.is_none());
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = DeviceReport::decode(b"{not json").unwrap_err();
        assert!(matches!(err, ReportError::InvalidJson(_)));
    }

    #[test]
    fn test_missing_device_id_is_rejected() {
        let err = DeviceReport::decode(br#"{"sensordatavalues": []}"#).unwrap_err();
        assert!(matches!(err, ReportError::MissingDeviceId));
    }

    #[test]
    fn test_malformed_reading_is_rejected() {
        let body = br#"{"esp8266id": "1", "sensordatavalues": [{"value": "1.0"}]}"#;
        let err = DeviceReport::decode(body).unwrap_err();
        assert!(matches!(err, ReportError::InvalidShape(_)));
    }

    fn reading(value: Option<Value>) -> MetricReading {
        MetricReading {
            value_type: "temperature".to_string(),
            value,
        }
    }

    #[test]
    fn test_numeric_value_parsing() {
        assert_eq!(reading(Some(json!(" 46.40 "))).numeric_value(), Some(46.4));
        assert_eq!(reading(Some(json!(7))).numeric_value(), Some(7.0));
        assert_eq!(reading(Some(json!("n/a"))).numeric_value(), None);
        assert_eq!(reading(Some(json!({"raw": 1}))).numeric_value(), None);
        assert_eq!(reading(None).numeric_value(), None);
        assert_eq!(reading(None).raw_value(), "missing");
    }

    #[test]
    fn test_unknown_fields_with_odd_values_are_accepted() {
        let body = br#"{
            "esp8266id": "1",
            "sensordatavalues": [
                {"value_type": "gps", "value": {"lat": 52.1, "lon": 5.1}},
                {"value_type": "flag", "value": null},
                {"value_type": "marker"},
                {"value_type": "humidity", "value": "46.40"}
            ]
        }"#;
        let report = DeviceReport::decode(body).unwrap();

        assert_eq!(report.readings.len(), 4);
        assert!(report.readings[2].value.is_none());
        assert_eq!(report.readings[3].numeric_value(), Some(46.4));
    }
}
