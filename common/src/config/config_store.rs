use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ConfigContentProvider, FileContentConfigProvider, Validate};

/// YAML documents on top of a content provider, validated on both load and save.
pub struct ConfigStore<TProvider: ConfigContentProvider> {
    provider: TProvider,
}

impl ConfigStore<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path))
    }
}

impl<TProvider: ConfigContentProvider> ConfigStore<TProvider> {
    pub fn new(provider: TProvider) -> Self {
        Self { provider }
    }

    pub fn load<TConfig>(&self) -> Result<TConfig, String>
    where
        TConfig: DeserializeOwned + Validate + Default,
    {
        let Some(content) = self.provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }

    pub fn save<TConfig>(&self, config: &TConfig) -> Result<(), String>
    where
        TConfig: Serialize + Validate,
    {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        let content = serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        self.provider.set_config_content(&content)
    }
}
