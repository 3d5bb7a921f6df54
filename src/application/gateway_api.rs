// Gateway API trait for sensor configuration and status access
use crate::domain::sensor::{ApiResponse, SensorConfiguration, SensorRegistration, SensorStatus};
use async_trait::async_trait;

#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Snapshot of every sensor configured on the gateway
    async fn get_sensor_configurations(&self) -> anyhow::Result<Vec<SensorConfiguration>>;

    /// Create a new sensor record
    async fn set_sensor_configuration(
        &self,
        registration: &SensorRegistration,
    ) -> anyhow::Result<ApiResponse>;

    /// Push a new value for an existing sensor
    async fn set_sensor_status(&self, status: &SensorStatus) -> anyhow::Result<ApiResponse>;
}
