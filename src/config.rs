use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from an optional YAML file.
///
/// The file path comes from the `PORTER_CONFIG` environment variable and
/// defaults to `porter.yaml`. A missing file is not an error: every field
/// has a default, so the server can run with no configuration at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// Root directory for static files.
    #[serde(default = "default_www_root")]
    pub www_root: PathBuf,
    /// Directory uploaded files are stored in and served from.
    #[serde(default = "default_uploads_root")]
    pub uploads_root: PathBuf,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_www_root() -> PathBuf {
    PathBuf::from("./www")
}

fn default_uploads_root() -> PathBuf {
    PathBuf::from("./uploads")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            www_root: default_www_root(),
            uploads_root: default_uploads_root(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var("PORTER_CONFIG").unwrap_or_else(|_| "porter.yaml".to_string());

        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_yaml::from_str(&contents)
                .with_context(|| format!("invalid config file {path}")),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read config file {path}")),
        }
    }
}
