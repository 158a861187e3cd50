use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use super::formats::FileProvider;
use crate::filter::{FilterConfig, FilterOptions};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "RQC_STEP_";

/// SDK variables mapped onto config keys, merged verbatim as strings.
const SDK_ENV_KEYS: [(&str, &str); 2] = [
    ("SDK_CALLBACK_URL", "service.callback_url"),
    ("KB_AUTH_TOKEN", "service.token"),
];

/// Merged configuration from defaults, files and environment.
pub struct StepConfig {
    figment: Figment,
}

/// Typed view of the `[service]` and `[filter]` sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub service: ServiceSettings,
    pub filter: FilterSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(deserialize_with = "scalar_string")]
    pub callback_url: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub token: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub bbtools_version: String,
    #[serde(deserialize_with = "scalar_string")]
    pub datafileutil_version: String,
}

/// Env values are typed by content, so `RQC_STEP_SERVICE__TOKEN=1234` arrives
/// as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub scratch_dir: PathBuf,
    #[serde(default)]
    pub skip_rqcfilter: bool,
    #[serde(default)]
    pub debug: bool,
    /// Gzip on this machine instead of calling DataFileUtil.
    #[serde(default)]
    pub local_pack: bool,
}

impl Settings {
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig::new(
            self.service.callback_url.clone(),
            self.filter.scratch_dir.clone(),
            FilterOptions {
                skip_rqcfilter: self.filter.skip_rqcfilter,
                debug: self.filter.debug,
            },
        )
    }
}

impl StepConfig {
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        Self::load_with_env(custom_config, |name| std::env::var(name).ok())
    }

    /// Like [`StepConfig::load`], reading the SDK variables through `lookup`.
    pub(crate) fn load_with_env<F>(custom_config: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG)) // Embedded defaults
            .merge(FileProvider::for_path(Self::user_config_path("toml")))
            .merge(FileProvider::for_path(Self::user_config_path("json")))
            .merge(FileProvider::for_path(Self::user_config_path("yaml")))
            .merge(FileProvider::for_path("rqc-step.toml"))
            .merge(FileProvider::for_path("rqc-step.json"))
            .merge(FileProvider::for_path("rqc-step.yaml"));

        if let Some(custom_path) = custom_config {
            tracing::trace!("CONFIG LOAD: Custom config {}", custom_path);
            figment = figment.merge(FileProvider::for_path(custom_path));
        }

        // Environment variables always have highest priority
        for (name, key) in SDK_ENV_KEYS {
            if let Some(value) = lookup(name) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(StepConfig { figment })
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .context("Invalid rqc-step configuration")
    }

    fn user_config_path(extension: &str) -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/rqc-step/config.{extension}"),
            Err(_) => format!("~/.config/rqc-step/config.{extension}"),
        }
    }
}
