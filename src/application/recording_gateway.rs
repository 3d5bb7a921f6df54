// In-memory gateway that records every call, for tests
use crate::application::gateway_api::GatewayApi;
use crate::domain::sensor::{
    ApiResponse, SensorConfiguration, SensorRegistration, SensorSource, SensorStatus,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

pub const SOURCE_NAME: &str = "SensorDotCommunity";

#[derive(Default)]
struct Inner {
    sensors: Vec<SensorConfiguration>,
    next_id: u64,
    reject_registrations: bool,
    hide_new_sensors: bool,
    reject_updates: bool,
    fail_listing: bool,
    listings: usize,
    registrations: Vec<SensorRegistration>,
    updates: Vec<SensorStatus>,
}

pub struct RecordingGateway {
    inner: Mutex<Inner>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 100,
                ..Default::default()
            }),
        }
    }

    pub fn with_sensor(self, id: u64, external_id: &str, source_name: &str) -> Self {
        self.inner.lock().unwrap().sensors.push(SensorConfiguration {
            id: Some(json!(id)),
            external_id: Some(external_id.to_string()),
            source: Some(SensorSource {
                kind: Some("plugin".to_string()),
                name: Some(source_name.to_string()),
            }),
        });
        self
    }

    pub fn rejecting_registrations(self) -> Self {
        self.inner.lock().unwrap().reject_registrations = true;
        self
    }

    /// Accept registrations but never list the new sensor afterwards.
    pub fn hiding_new_sensors(self) -> Self {
        self.inner.lock().unwrap().hide_new_sensors = true;
        self
    }

    pub fn rejecting_updates(self) -> Self {
        self.inner.lock().unwrap().reject_updates = true;
        self
    }

    pub fn failing_listing(self) -> Self {
        self.inner.lock().unwrap().fail_listing = true;
        self
    }

    pub fn listings(&self) -> usize {
        self.inner.lock().unwrap().listings
    }

    pub fn registrations(&self) -> Vec<SensorRegistration> {
        self.inner.lock().unwrap().registrations.clone()
    }

    pub fn updates(&self) -> Vec<SensorStatus> {
        self.inner.lock().unwrap().updates.clone()
    }
}

#[async_trait]
impl GatewayApi for RecordingGateway {
    async fn get_sensor_configurations(&self) -> anyhow::Result<Vec<SensorConfiguration>> {
        let mut inner = self.inner.lock().unwrap();
        inner.listings += 1;
        if inner.fail_listing {
            anyhow::bail!("gateway unreachable");
        }
        Ok(inner.sensors.clone())
    }

    async fn set_sensor_configuration(
        &self,
        registration: &SensorRegistration,
    ) -> anyhow::Result<ApiResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.registrations.push(registration.clone());
        if inner.reject_registrations {
            return Ok(ApiResponse::new(false));
        }
        if !inner.hide_new_sensors {
            let id = inner.next_id;
            inner.next_id += 1;
            inner.sensors.push(SensorConfiguration {
                id: Some(json!(id)),
                external_id: Some(registration.external_id.clone()),
                source: Some(registration.source.clone()),
            });
        }
        Ok(ApiResponse::new(true))
    }

    async fn set_sensor_status(&self, status: &SensorStatus) -> anyhow::Result<ApiResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.updates.push(status.clone());
        Ok(ApiResponse::new(!inner.reject_updates))
    }
}
