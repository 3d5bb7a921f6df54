// Metric classification - supported sensor.community value types

/// A metric type this bridge knows how to map onto a gateway sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Temperature,
    Humidity,
    Pm10,
    Pm25,
}

impl MetricKind {
    /// Classify a `value_type` from a device report.
    /// Returns `None` for anything the bridge does not forward.
    pub fn classify(value_type: &str) -> Option<Self> {
        match value_type {
            "temperature" => Some(Self::Temperature),
            "humidity" => Some(Self::Humidity),
            "SDS_P1" => Some(Self::Pm10),
            "SDS_P2" => Some(Self::Pm25),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Pm10 => "PM10",
            Self::Pm25 => "PM2.5",
        }
    }

    pub fn physical_quantity(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pm10 | Self::Pm25 => "dust",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "celsius",
            Self::Humidity => "percent",
            Self::Pm10 | Self::Pm25 => "micro_gram_per_cubic_meter",
        }
    }
}
