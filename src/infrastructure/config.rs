use serde::Deserialize;

pub const PLUGIN_NAME: &str = "SensorDotCommunity";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize, Clone)]
pub struct BridgeConfig {
    pub server: ServerSettings,
    pub gateway: GatewaySettings,
    pub plugin: PluginSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PluginSettings {
    /// Source name stamped on every sensor this bridge registers
    pub name: String,
    pub config_path: String,
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.listen_addr", "0.0.0.0:8080")?
        .set_default("gateway.base_url", "http://localhost:8088")?
        .set_default("gateway.timeout_secs", 10)?
        .set_default("plugin.name", PLUGIN_NAME)?
        .set_default("plugin.config_path", "config/plugin_config.json")?)
}

/// Defaults, overlaid by `config/bridge.*`, overlaid by `SDC_BRIDGE__*` env vars.
pub fn load_bridge_config() -> anyhow::Result<BridgeConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/bridge").required(false))
        .add_source(
            config::Environment::with_prefix("SDC_BRIDGE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
