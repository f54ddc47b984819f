//! Configuration resolution for folio-web
//!
//! Per-setting priority order:
//! 1. Command-line argument (clap also reads the matching FOLIO_* env var)
//! 2. TOML config file (`~/.config/folio/folio-web.toml`)
//! 3. Compiled default
//!
//! The memory backend needs no settings at all, so a bare `folio-web`
//! starts without any configuration. The Firestore backend requires a
//! project id and API key.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{Error, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5080;
const DEFAULT_COLLECTION: &str = "recommendations";

/// Command-line arguments (every flag falls back to a FOLIO_* env var)
#[derive(Parser, Debug, Default)]
#[command(name = "folio-web", version, about = "Personal portfolio site with visitor recommendations")]
pub struct Cli {
    /// Bind host
    #[arg(long, env = "FOLIO_HOST")]
    pub host: Option<String>,

    /// Bind port
    #[arg(long, env = "FOLIO_PORT")]
    pub port: Option<u16>,

    /// Storage backend: "firestore" or "memory"
    #[arg(long, env = "FOLIO_BACKEND")]
    pub backend: Option<String>,

    /// Path to a TOML config file (overrides the default location)
    #[arg(long = "config", env = "FOLIO_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Firestore project id
    #[arg(long, env = "FOLIO_FIRESTORE_PROJECT")]
    pub firestore_project: Option<String>,

    /// Firestore API key
    #[arg(long, env = "FOLIO_FIRESTORE_API_KEY")]
    pub firestore_api_key: Option<String>,

    /// Firestore collection holding the recommendations
    #[arg(long, env = "FOLIO_FIRESTORE_COLLECTION")]
    pub firestore_collection: Option<String>,
}

/// TOML config file shape
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub backend: Option<String>,
    #[serde(default)]
    pub firestore: TomlFirestore,
}

#[derive(Debug, Default, Deserialize)]
pub struct TomlFirestore {
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub collection: Option<String>,
}

/// Connection identifiers for the Firestore backend
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    pub collection: String,
}

/// Selected storage backend
#[derive(Debug, Clone)]
pub enum StoreBackend {
    Firestore(FirestoreConfig),
    Memory,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
}

impl Config {
    /// Resolve configuration from CLI/env, the TOML file, and defaults.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let toml_config = load_toml(cli.config_file.clone())?;
        Self::resolve_with(cli, toml_config)
    }

    fn resolve_with(cli: &Cli, toml_config: Option<TomlConfig>) -> Result<Self> {
        let toml_config = toml_config.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);

        let backend_name = cli
            .backend
            .clone()
            .or(toml_config.backend)
            .unwrap_or_else(|| "memory".to_string());

        let store = match backend_name.as_str() {
            "memory" => {
                info!("Using in-process memory store (records do not survive restart)");
                StoreBackend::Memory
            }
            "firestore" => {
                let project_id = cli
                    .firestore_project
                    .clone()
                    .or(toml_config.firestore.project_id);
                let api_key = cli
                    .firestore_api_key
                    .clone()
                    .or(toml_config.firestore.api_key);
                let collection = cli
                    .firestore_collection
                    .clone()
                    .or(toml_config.firestore.collection)
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

                match (project_id, api_key) {
                    (Some(project_id), Some(api_key)) => {
                        info!(project_id = %project_id, collection = %collection, "Using Firestore store");
                        StoreBackend::Firestore(FirestoreConfig {
                            project_id,
                            api_key,
                            collection,
                        })
                    }
                    _ => {
                        return Err(Error::Config(
                            "Firestore backend selected but not configured. Provide both:\n\
                             1. Project id: --firestore-project / FOLIO_FIRESTORE_PROJECT / firestore.project_id\n\
                             2. API key:    --firestore-api-key / FOLIO_FIRESTORE_API_KEY / firestore.api_key\n\
                             or run with --backend memory"
                                .to_string(),
                        ));
                    }
                }
            }
            other => {
                return Err(Error::Config(format!(
                    "Unknown backend '{}' (expected \"firestore\" or \"memory\")",
                    other
                )));
            }
        };

        Ok(Config { host, port, store })
    }
}

/// Load the TOML config file.
///
/// An explicitly passed path must exist and parse; the default location
/// is optional and silently skipped when absent.
fn load_toml(explicit: Option<PathBuf>) -> Result<Option<TomlConfig>> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(None),
        },
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    match toml::from_str::<TomlConfig>(&content) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            Ok(Some(config))
        }
        Err(e) => {
            if required {
                Err(Error::Config(format!(
                    "Failed to parse {}: {}",
                    path.display(),
                    e
                )))
            } else {
                warn!("Ignoring unparsable config {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }
}

/// `~/.config/folio/folio-web.toml` (platform equivalent)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("folio-web.toml"))
}
