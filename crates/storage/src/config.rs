#![forbid(unsafe_code)]

use std::path::PathBuf;

pub const ENV_STORAGE_DIR: &str = "TRACE_CATALOG_DIR";
pub const ENV_BACKEND: &str = "TRACE_CATALOG_BACKEND";
pub const ENV_NAMESPACE: &str = "TRACE_CATALOG_NAMESPACE";
pub const ENV_QUOTA_BYTES: &str = "TRACE_CATALOG_QUOTA_BYTES";

pub const DEFAULT_STORAGE_DIR: &str = ".trace_catalog";
pub const DEFAULT_NAMESPACE: &str = "catalog";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackendKind {
    Sqlite,
    Memory,
}

impl BackendKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "file" => Some(Self::Sqlite),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub backend: BackendKind,
    pub namespace: String,
    pub quota_bytes: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            backend: BackendKind::Sqlite,
            namespace: DEFAULT_NAMESPACE.to_string(),
            quota_bytes: None,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`; unset or unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = non_blank(lookup(ENV_STORAGE_DIR)) {
            config.storage_dir = PathBuf::from(dir);
        }

        if let Some(raw) = non_blank(lookup(ENV_BACKEND)) {
            match BackendKind::from_str(&raw) {
                Some(kind) => config.backend = kind,
                None => log::warn!(
                    "ignoring {ENV_BACKEND}={raw:?}; using {}",
                    config.backend.as_str()
                ),
            }
        }

        if let Some(namespace) = non_blank(lookup(ENV_NAMESPACE)) {
            config.namespace = namespace;
        }

        if let Some(raw) = non_blank(lookup(ENV_QUOTA_BYTES)) {
            match raw.parse::<u64>() {
                Ok(quota) => config.quota_bytes = Some(quota),
                Err(err) => log::warn!("ignoring {ENV_QUOTA_BYTES}={raw:?}: {err}"),
            }
        }

        config
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
