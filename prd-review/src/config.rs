//! Configuration resolution for prd-review
//!
//! Priority per setting: command line → environment → TOML → compiled default.
//! clap reads the environment tier for everything except the root folder,
//! which goes through [`RootFolderResolver`] (`PRD_ROOT_FOLDER`, then `PRD_ROOT`).

use clap::Parser;
use prd_common::config::{CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Module name used for the TOML file and logs
pub const MODULE_NAME: &str = "prd-review";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "prd-review")]
#[command(about = "PRD review wizard service")]
#[command(version)]
pub struct Cli {
    /// Root folder; uploads are written to `<root>/prd`
    #[arg(long)]
    pub root_folder: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "PRD_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRD_PORT")]
    pub port: Option<u16>,

    /// Prefix for every documents/catalog/session route
    #[arg(long, env = "PRD_API_BASE")]
    pub api_base: Option<String>,

    /// Analysis simulation tick, in milliseconds
    #[arg(long, env = "PRD_TICK_INTERVAL_MS")]
    pub tick_interval_ms: Option<u64>,

    /// Largest accepted request body for uploads
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub uploads_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub api_base: String,
    pub tick_interval: Duration,
    pub max_upload_bytes: usize,
    pub event_capacity: usize,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn resolve(cli: &Cli, toml_config: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::for_current_platform();

        let root_folder = cli.root_folder.clone().unwrap_or_else(|| {
            RootFolderResolver::new(MODULE_NAME).resolve_with(toml_config)
        });
        let uploads_dir = RootFolderInitializer::new(root_folder.clone()).uploads_path();

        let server = &toml_config.server;
        let api_base = cli
            .api_base
            .clone()
            .or_else(|| server.api_base.clone())
            .unwrap_or(defaults.api_base);
        let tick_ms = cli
            .tick_interval_ms
            .or(toml_config.simulation.tick_interval_ms)
            .unwrap_or(defaults.tick_interval_ms)
            .max(1);

        Self {
            root_folder,
            uploads_dir,
            host: cli
                .host
                .clone()
                .or_else(|| server.host.clone())
                .unwrap_or(defaults.host),
            port: cli.port.or(server.port).unwrap_or(defaults.port),
            api_base: normalize_api_base(&api_base),
            tick_interval: Duration::from_millis(tick_ms),
            max_upload_bytes: cli
                .max_upload_bytes
                .or(server.max_upload_bytes)
                .unwrap_or(defaults.max_upload_bytes),
            event_capacity: defaults.event_capacity,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| toml_config.logging.level.clone()),
            log_file: toml_config.logging.file.clone().or(defaults.log_file),
        }
    }

    /// Compiled defaults rooted at `root_folder`, for tests and embedding
    pub fn with_root(root_folder: PathBuf) -> Self {
        let cli = Cli {
            root_folder: Some(root_folder),
            ..Cli::default()
        };
        Self::resolve(&cli, &TomlConfig::default())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leading slash, no trailing slash; `""` mounts at the root
pub fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prd_common::config::{ServerConfig, SimulationConfig};

    #[test]
    fn test_normalize_api_base() {
        assert_eq!(normalize_api_base("/api"), "/api");
        assert_eq!(normalize_api_base("api/"), "/api");
        assert_eq!(normalize_api_base("/v1/prd/"), "/v1/prd");
        assert_eq!(normalize_api_base("/"), "");
        assert_eq!(normalize_api_base(""), "");
    }

    #[test]
    fn test_cli_beats_toml_beats_defaults() {
        let toml_config = TomlConfig {
            root_folder: Some(PathBuf::from("/toml/root")),
            server: ServerConfig {
                host: Some("0.0.0.0".to_string()),
                port: Some(6000),
                api_base: None,
                max_upload_bytes: Some(1024),
            },
            simulation: SimulationConfig {
                tick_interval_ms: Some(50),
            },
            ..TomlConfig::default()
        };
        let cli = Cli {
            root_folder: Some(PathBuf::from("/cli/root")),
            port: Some(7000),
            ..Cli::default()
        };

        let config = ServiceConfig::resolve(&cli, &toml_config);
        assert_eq!(config.root_folder, PathBuf::from("/cli/root"));
        assert_eq!(config.uploads_dir, PathBuf::from("/cli/root/prd"));
        assert_eq!(config.port, 7000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_with_root_uses_compiled_defaults() {
        let config = ServiceConfig::with_root(PathBuf::from("/tmp/prd-root"));
        assert_eq!(config.port, 5740);
        assert_eq!(config.tick_interval, Duration::from_millis(300));
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.event_capacity, 100);
        assert_eq!(config.bind_address(), "127.0.0.1:5740");
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let cli = Cli {
            root_folder: Some(PathBuf::from("/r")),
            tick_interval_ms: Some(0),
            ..Cli::default()
        };
        let config = ServiceConfig::resolve(&cli, &TomlConfig::default());
        assert_eq!(config.tick_interval, Duration::from_millis(1));
    }
}
