//! Lightweight configuration loader.
//!
//! Uses Figment to merge built-in defaults, `config.toml`,
//! `config.<env>.toml` and `APP_*` env vars (nested keys split on `__`,
//! e.g. `APP_EXPLORER__BASE_URL`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::Error;
use crate::types::DEFAULT_K;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Load with config files looked up under `base`.
    pub fn load_from(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::default("explorer", ExplorerSettings::default()))
            .merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<ExplorerSettings> {
        self.get("explorer")
    }
}

/// Tunables of the explorer. Every field has a default, so an empty or
/// missing config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    pub base_url: String,
    pub k: usize,
    pub items_per_page: usize,
    pub graph_stagger_ms: u64,
    pub spelling_debounce_ms: u64,
    pub max_graph_nodes: usize,
    pub request_timeout_secs: u64,
    pub health_retry_ms: u64,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            k: DEFAULT_K,
            items_per_page: 20,
            graph_stagger_ms: 600,
            spelling_debounce_ms: 500,
            max_graph_nodes: 75,
            request_timeout_secs: 30,
            health_retry_ms: 1000,
        }
    }
}

impl ExplorerSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("explorer.base_url must not be empty".to_string()));
        }
        if self.items_per_page == 0 {
            return Err(Error::InvalidConfig("explorer.items_per_page must be at least 1".to_string()));
        }
        if self.max_graph_nodes == 0 {
            return Err(Error::InvalidConfig("explorer.max_graph_nodes must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn graph_stagger(&self) -> Duration {
        Duration::from_millis(self.graph_stagger_ms)
    }

    pub fn spelling_debounce(&self) -> Duration {
        Duration::from_millis(self.spelling_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn health_retry(&self) -> Duration {
        Duration::from_millis(self.health_retry_ms)
    }
}
