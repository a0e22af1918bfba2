//! Registry configuration
//!
//! Loaded from the environment (with `.env` support) or from a YAML file:
//!
//! ```yaml
//! store:
//!   kind: json_file
//!   path: data/students.json
//! log_filter: student_registry=debug
//! listing_limit: 50
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::gateway::{InMemoryGateway, JsonFileGateway, RecordGateway};

pub const DEFAULT_STORE_PATH: &str = "students.json";
pub const DEFAULT_LOG_FILTER: &str = "student_registry=info";

/// Where records are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreBackend {
    /// Lost when the process exits
    #[default]
    Memory,
    /// JSON document array on disk
    JsonFile { path: PathBuf },
}

impl StoreBackend {
    fn from_env_values(kind: &str, path: Option<String>) -> Result<Self> {
        match kind.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "json" | "json_file" | "file" => Ok(StoreBackend::JsonFile {
                path: PathBuf::from(path.unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())),
            }),
            other => Err(anyhow!(
                "Unknown REGISTRY_STORE '{}'. Valid values: memory, json",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub store: StoreBackend,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_limit: Option<usize>,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            log_filter: default_log_filter(),
            listing_limit: None,
        }
    }
}

impl RegistryConfig {
    /// Read `REGISTRY_STORE`, `REGISTRY_STORE_PATH`, `REGISTRY_LOG` and
    /// `REGISTRY_LISTING_LIMIT`, after loading `.env` if one exists
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let kind = lookup("REGISTRY_STORE").unwrap_or_else(|| "memory".to_string());
        let store = StoreBackend::from_env_values(&kind, lookup("REGISTRY_STORE_PATH"))?;

        let log_filter = lookup("REGISTRY_LOG").unwrap_or_else(default_log_filter);

        let listing_limit = lookup("REGISTRY_LISTING_LIMIT")
            .map(|raw| {
                usize::from_str(raw.trim())
                    .with_context(|| format!("REGISTRY_LISTING_LIMIT '{}' is not a count", raw))
            })
            .transpose()?;

        Ok(Self {
            store,
            log_filter,
            listing_limit,
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse registry config")
    }

    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Open the configured store
    pub fn open_gateway(&self) -> Result<Box<dyn RecordGateway>> {
        match &self.store {
            StoreBackend::Memory => Ok(Box::new(InMemoryGateway::new())),
            StoreBackend::JsonFile { path } => {
                let gateway = JsonFileGateway::open(path)
                    .with_context(|| format!("Failed to open store {}", path.display()))?;
                Ok(Box::new(gateway))
            }
        }
    }
}
