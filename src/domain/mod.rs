// Domain layer - Report, metric, sensor and plugin config models
pub mod metric;
pub mod plugin_config;
pub mod report;
pub mod sensor;
