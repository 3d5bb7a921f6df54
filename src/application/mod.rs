// Application layer - Use cases and the ports they depend on
pub mod config_service;
pub mod config_store;
pub mod gateway_api;
pub mod ingest_service;

#[cfg(test)]
pub mod recording_gateway;
