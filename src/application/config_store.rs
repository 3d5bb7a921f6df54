// Persistence trait for the plugin configuration
use crate::domain::plugin_config::PluginConfig;
use async_trait::async_trait;

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the persisted config, `None` when nothing was saved yet
    async fn load(&self) -> anyhow::Result<Option<PluginConfig>>;

    async fn save(&self, config: &PluginConfig) -> anyhow::Result<()>;
}
