//! Configuration loading and root folder resolution
//!
//! Root folder resolution follows a fixed priority order:
//! 1. Command-line argument (handled by the service binary)
//! 2. Environment variable (`PRD_ROOT_FOLDER`, then `PRD_ROOT`)
//! 3. TOML config file (`<config_dir>/prd-review/<module>.toml`)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file is never fatal: it is logged and the
//! compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Primary root folder environment variable
pub const ENV_ROOT_FOLDER: &str = "PRD_ROOT_FOLDER";
/// Secondary (short) root folder environment variable
pub const ENV_ROOT: &str = "PRD_ROOT";

/// Name of the uploads directory below the root folder
pub const UPLOADS_DIR_NAME: &str = "prd";

/// Compiled-in fallback values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    pub api_base: String,
    pub tick_interval_ms: u64,
    pub max_upload_bytes: usize,
    pub event_capacity: usize,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: "info".to_string(),
            log_file: None,
            host: "127.0.0.1".to_string(),
            port: 5740,
            api_base: "/api".to_string(),
            tick_interval_ms: 300,
            max_upload_bytes: 20 * 1024 * 1024,
            event_capacity: 100,
        }
    }
}

fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("prd-review"))
        .unwrap_or_else(|| PathBuf::from("./prd_review_data"))
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// `[server]` section; unset fields fall back to compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_base: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

/// `[simulation]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: Option<u64>,
}

/// On-disk TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
}

impl TomlConfig {
    /// Parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Load the module's config file, or defaults if it is missing or invalid
    pub fn load_or_default(module_name: &str) -> Self {
        let Some(path) = config_file_path(module_name) else {
            debug!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Location of a module's TOML file (`<config_dir>/prd-review/<module>.toml`)
pub fn config_file_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("prd-review").join(format!("{}.toml", module_name)))
}

/// Resolves the root folder for a module (tiers 2-4; the CLI tier is the caller's)
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn resolve(&self) -> PathBuf {
        self.resolve_with(&TomlConfig::load_or_default(&self.module_name))
    }

    /// Resolve against an already loaded TOML config
    pub fn resolve_with(&self, toml_config: &TomlConfig) -> PathBuf {
        for var in [ENV_ROOT_FOLDER, ENV_ROOT] {
            if let Ok(path) = std::env::var(var) {
                if !path.trim().is_empty() {
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(root) = &toml_config.root_folder {
            return root.clone();
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Creates the root folder layout on startup
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Directory receiving raw uploaded documents
    pub fn uploads_path(&self) -> PathBuf {
        self.root_folder.join(UPLOADS_DIR_NAME)
    }

    pub fn uploads_exist(&self) -> bool {
        self.uploads_path().is_dir()
    }

    /// Create root and uploads directories (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(self.uploads_path()).map_err(|e| {
            Error::Config(format!(
                "Failed to create {}: {}",
                self.uploads_path().display(),
                e
            ))
        })
    }
}
