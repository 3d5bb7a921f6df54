// Config service - Owns the plugin configuration value
use crate::application::config_store::ConfigStore;
use crate::domain::plugin_config::{ConfigCheckError, ConfigChecker, ConfigField, PluginConfig};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Config must be a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Check(#[from] ConfigCheckError),

    #[error("Could not persist config: {0:#}")]
    Store(anyhow::Error),
}

#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
    checker: Arc<ConfigChecker>,
    current: Arc<RwLock<PluginConfig>>,
}

impl ConfigService {
    /// Load the persisted config, falling back to the default when it is
    /// missing or no longer passes the checker.
    pub async fn load(store: Arc<dyn ConfigStore>, checker: ConfigChecker) -> anyhow::Result<Self> {
        let config = match store.load().await? {
            Some(config) => match checker.check(&config) {
                Ok(()) => config,
                Err(e) => {
                    tracing::warn!("Ignoring persisted config: {}", e);
                    PluginConfig::new()
                }
            },
            None => PluginConfig::new(),
        };

        Ok(Self {
            store,
            checker: Arc::new(checker),
            current: Arc::new(RwLock::new(config)),
        })
    }

    pub fn description(&self) -> &[ConfigField] {
        self.checker.fields()
    }

    pub async fn get(&self) -> PluginConfig {
        self.current.read().await.clone()
    }

    /// Validate, store and persist a new config given as raw JSON.
    pub async fn set(&self, raw: &[u8]) -> Result<(), ConfigError> {
        let value: serde_json::Value = serde_json::from_slice(raw)?;
        let serde_json::Value::Object(config) = value else {
            return Err(ConfigError::NotAnObject);
        };
        self.checker.check(&config)?;

        let mut current = self.current.write().await;
        self.store.save(&config).await.map_err(ConfigError::Store)?;
        *current = config;
        tracing::info!("Plugin config updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plugin_config::{config_description, ConfigFieldType};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<PluginConfig>>,
    }

    #[async_trait]
    impl ConfigStore for MemoryStore {
        async fn load(&self) -> anyhow::Result<Option<PluginConfig>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, config: &PluginConfig) -> anyhow::Result<()> {
            *self.saved.lock().unwrap() = Some(config.clone());
            Ok(())
        }
    }

    fn label_checker() -> ConfigChecker {
        ConfigChecker::new(vec![ConfigField {
            name: "label".to_string(),
            kind: ConfigFieldType::Str,
            description: "Label".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_defaults_to_empty_config() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::load(store, ConfigChecker::new(config_description()))
            .await
            .unwrap();

        assert!(service.get().await.is_empty());
        assert!(service.description().is_empty());
    }

    #[tokio::test]
    async fn test_set_persists_config() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::load(store.clone(), label_checker()).await.unwrap();

        service.set(br#"{"label": "garden"}"#).await.unwrap();

        assert_eq!(service.get().await.get("label"), Some(&json!("garden")));
        let saved = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.get("label"), Some(&json!("garden")));
    }

    #[tokio::test]
    async fn test_rejected_config_is_not_stored() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::load(store.clone(), label_checker()).await.unwrap();

        assert!(matches!(
            service.set(br#"{"colour": "red"}"#).await,
            Err(ConfigError::Check(ConfigCheckError::UnknownKey(_)))
        ));
        assert!(matches!(service.set(b"[]").await, Err(ConfigError::NotAnObject)));
        assert!(matches!(service.set(b"{").await, Err(ConfigError::InvalidJson(_))));

        assert!(service.get().await.is_empty());
        assert!(store.saved.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_persisted_config_is_ignored() {
        let store = Arc::new(MemoryStore::default());
        *store.saved.lock().unwrap() = json!({"label": 3}).as_object().cloned();

        let service = ConfigService::load(store, label_checker()).await.unwrap();
        assert!(service.get().await.is_empty());
    }
}
