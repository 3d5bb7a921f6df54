// Plugin configuration model and checker
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// User-editable plugin settings, stored as a flat JSON object.
pub type PluginConfig = serde_json::Map<String, Value>;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigCheckError {
    #[error("Unknown config key '{0}'")]
    UnknownKey(String),

    #[error("Config key '{key}' should be of type {expected}")]
    WrongType { key: String, expected: ConfigFieldType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfigFieldType {
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "bool")]
    Bool,
}

impl std::fmt::Display for ConfigFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConfigFieldType::Str => "str",
            ConfigFieldType::Int => "int",
            ConfigFieldType::Bool => "bool",
        };
        f.write_str(name)
    }
}

impl ConfigFieldType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            ConfigFieldType::Str => value.is_string(),
            ConfigFieldType::Int => value.is_i64() || value.is_u64(),
            ConfigFieldType::Bool => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ConfigFieldType,
    pub description: String,
}

/// The bridge currently exposes no options.
pub fn config_description() -> Vec<ConfigField> {
    Vec::new()
}

#[derive(Debug, Clone)]
pub struct ConfigChecker {
    fields: Vec<ConfigField>,
}

impl ConfigChecker {
    pub fn new(fields: Vec<ConfigField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    /// Every key must be described and hold a value of the described type.
    /// Described keys may be omitted.
    pub fn check(&self, config: &PluginConfig) -> Result<(), ConfigCheckError> {
        for (key, value) in config {
            let field = self
                .fields
                .iter()
                .find(|f| f.name == *key)
                .ok_or_else(|| ConfigCheckError::UnknownKey(key.clone()))?;

            if !field.kind.accepts(value) {
                return Err(ConfigCheckError::WrongType {
                    key: key.clone(),
                    expected: field.kind,
                });
            }
        }
        Ok(())
    }
}
