// HTTP client for the gateway's webinterface API
use crate::application::gateway_api::GatewayApi;
use crate::domain::sensor::{
    ApiResponse, SensorConfiguration, SensorConfigurations, SensorRegistration, SensorStatus,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build gateway HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn build_url(&self, call: &str) -> String {
        format!("{}/{}", self.base_url, call)
    }

    async fn call<T: DeserializeOwned>(&self, call: &str, params: &[(&str, String)]) -> Result<T> {
        let mut request = self
            .client
            .get(self.build_url(call))
            .query(params)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to gateway", call))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gateway call {} failed with status {}: {}", call, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse gateway {} response", call))
    }

    /// Write calls answer `{"success": ...}`; a `null` body counts as failure.
    async fn write_call(&self, call: &str, param: &str, payload: String) -> Result<ApiResponse> {
        let response: Option<ApiResponse> = self.call(call, &[(param, payload)]).await?;
        Ok(response.unwrap_or_default())
    }
}

#[async_trait]
impl GatewayApi for HttpGateway {
    async fn get_sensor_configurations(&self) -> Result<Vec<SensorConfiguration>> {
        let data: SensorConfigurations = self.call("get_sensor_configurations", &[]).await?;
        let configurations = data.into_entries();
        tracing::debug!("Gateway lists {} sensor configurations", configurations.len());
        Ok(configurations)
    }

    async fn set_sensor_configuration(&self, registration: &SensorRegistration) -> Result<ApiResponse> {
        let payload = serde_json::to_string(registration)?;
        self.write_call("set_sensor_configuration", "config", payload).await
    }

    async fn set_sensor_status(&self, status: &SensorStatus) -> Result<ApiResponse> {
        let payload = serde_json::to_string(status)?;
        self.write_call("set_sensor_status", "status", payload).await
    }
}
