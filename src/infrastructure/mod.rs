// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_config_store;
pub mod gateway_client;
pub mod http_response;
