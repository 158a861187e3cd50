use anyhow::Result;
use figment::providers::{Data, Format, Json, Toml, Yaml};
use figment::value::{Dict, Map};
use figment::{Metadata, Profile, Provider};
use std::path::Path;

use super::core::StepConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Format implied by a file extension; unknown extensions read as TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => ConfigFormat::Json,
            "yaml" | "yml" => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// A config file provider whose parser is picked from the file extension.
pub enum FileProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
    Yaml(Data<Yaml>),
}

impl FileProvider {
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => FileProvider::Toml(Toml::file(path)),
            ConfigFormat::Json => FileProvider::Json(Json::file(path)),
            ConfigFormat::Yaml => FileProvider::Yaml(Yaml::file(path)),
        }
    }
}

impl Provider for FileProvider {
    fn metadata(&self) -> Metadata {
        match self {
            FileProvider::Toml(p) => p.metadata(),
            FileProvider::Json(p) => p.metadata(),
            FileProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        match self {
            FileProvider::Toml(p) => p.data(),
            FileProvider::Json(p) => p.data(),
            FileProvider::Yaml(p) => p.data(),
        }
    }
}

impl StepConfig {
    /// Render the merged configuration with the auth token masked. YAML is
    /// read but not written.
    pub fn export_config(&self, format: ConfigFormat) -> Result<String> {
        let mut config: serde_json::Value = self.get_full_config()?;
        if let Some(token) = config.pointer_mut("/service/token") {
            let is_set = match token {
                serde_json::Value::Null => false,
                serde_json::Value::String(t) => !t.is_empty(),
                _ => true,
            };
            if is_set {
                *token = serde_json::Value::from("<redacted>");
            }
        }

        let output = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
            ConfigFormat::Toml | ConfigFormat::Yaml => toml::to_string_pretty(&config)?,
        };

        Ok(output)
    }
}
