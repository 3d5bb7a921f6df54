// Ingest service - Maps device reports onto gateway sensors
use crate::application::gateway_api::GatewayApi;
use crate::domain::metric::MetricKind;
use crate::domain::report::{DeviceReport, ReportError};
use crate::domain::sensor::{
    find_sensor_id, ExternalId, KnownSensors, SensorId, SensorRegistration, SensorStatus,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Could not load sensor configurations from the gateway: {0:#}")]
    Gateway(anyhow::Error),
}

/// Result of processing one report. Only failed resolutions count as errors.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    pub updated: Vec<SensorId>,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl IngestOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_message(&self) -> String {
        self.errors.join("\n")
    }
}

#[derive(Clone)]
pub struct IngestService {
    gateway: Arc<dyn GatewayApi>,
    source_name: String,
}

impl IngestService {
    pub fn new(gateway: Arc<dyn GatewayApi>, source_name: String) -> Self {
        Self {
            gateway,
            source_name,
        }
    }

    /// Decode a raw body and process it.
    pub async fn ingest(&self, body: &[u8]) -> Result<IngestOutcome, IngestError> {
        let report = DeviceReport::decode(body)?;
        self.process(&report).await
    }

    pub async fn process(&self, report: &DeviceReport) -> Result<IngestOutcome, IngestError> {
        let configurations = self
            .gateway
            .get_sensor_configurations()
            .await
            .map_err(IngestError::Gateway)?;
        let mut known = KnownSensors::from_configurations(&configurations, &self.source_name);

        tracing::debug!(
            "Report from {} ({}): {} readings, {} known sensors",
            report.device_id,
            report.software_version.as_deref().unwrap_or("unknown firmware"),
            report.readings.len(),
            known.len()
        );

        let mut outcome = IngestOutcome::default();

        for reading in &report.readings {
            let Some(kind) = MetricKind::classify(&reading.value_type) else {
                tracing::debug!("Unsupported sensor value {}", reading.value_type);
                outcome.skipped += 1;
                continue;
            };

            let name = kind.display_name();
            let external_id = ExternalId::new(&report.device_id, &reading.value_type);

            let Some(value) = reading.numeric_value() else {
                let msg = format!(
                    "Sensor.community sensor {} ({}) reported invalid value '{}'",
                    name,
                    external_id,
                    reading.raw_value()
                );
                tracing::error!("{}", msg);
                outcome.errors.push(msg);
                continue;
            };

            match self.resolve(&mut known, &external_id, kind).await {
                Some(sensor_id) => {
                    tracing::info!(
                        "Updating sensor {} ({}) with {} ({})",
                        name,
                        sensor_id,
                        value,
                        kind.unit()
                    );
                    self.update(&sensor_id, value).await;
                    outcome.updated.push(sensor_id);
                }
                None => {
                    let msg = format!("Sensor.community sensor {} ({}) not found", name, external_id);
                    tracing::error!("{}", msg);
                    outcome.errors.push(msg);
                }
            }
        }

        Ok(outcome)
    }

    /// Look up a sensor, registering it when the gateway doesn't know it yet.
    async fn resolve(
        &self,
        known: &mut KnownSensors,
        external_id: &ExternalId,
        kind: MetricKind,
    ) -> Option<SensorId> {
        if let Some(sensor_id) = known.get(external_id) {
            return Some(sensor_id.clone());
        }

        tracing::info!(
            "Registering new sensor {} with external id {}",
            kind.display_name(),
            external_id
        );
        let sensor_id = self.register(external_id, kind).await?;
        known.insert(external_id.clone(), sensor_id.clone());
        Some(sensor_id)
    }

    async fn register(&self, external_id: &ExternalId, kind: MetricKind) -> Option<SensorId> {
        let registration = SensorRegistration::new(external_id, kind, &self.source_name);

        match self.gateway.set_sensor_configuration(&registration).await {
            Ok(response) if response.is_success() => {}
            Ok(_) => {
                tracing::error!(
                    "Could not register sensor {}, registration failed through API",
                    external_id
                );
                return None;
            }
            Err(e) => {
                tracing::error!("Could not register sensor {}: {:#}", external_id, e);
                return None;
            }
        }

        let configurations = match self.gateway.get_sensor_configurations().await {
            Ok(configurations) => configurations,
            Err(e) => {
                tracing::error!(
                    "Could not reload sensor configurations after registering {}: {:#}",
                    external_id,
                    e
                );
                return None;
            }
        };

        let sensor_id = find_sensor_id(&configurations, external_id, &self.source_name);
        match &sensor_id {
            Some(id) => tracing::info!(
                "Registered new sensor with name {} and external_id {} as {}",
                kind.display_name(),
                external_id,
                id
            ),
            None => tracing::warn!(
                "Sensor {} was accepted by the gateway but is not listed yet",
                external_id
            ),
        }
        sensor_id
    }

    /// Best effort: failures are logged, never reported back to the device.
    async fn update(&self, sensor_id: &SensorId, value: f64) {
        tracing::debug!("Updating sensor {} with status {}", sensor_id, value);
        let status = SensorStatus {
            id: sensor_id.clone(),
            value,
        };

        match self.gateway.set_sensor_status(&status).await {
            Ok(response) if response.is_success() => {}
            Ok(_) => tracing::warn!("Could not set the updated value for sensor {}", sensor_id),
            Err(e) => tracing::warn!("Could not set the updated value for sensor {}: {:#}", sensor_id, e),
        }
    }
}
