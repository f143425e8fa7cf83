//! Dev server configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Built SPA (index.html + wasm bundle)
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    #[serde(default)]
    pub proxy: ProxyConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// One forwarding rule: requests under `prefix` go to `target`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_target")]
    pub target: String,

    /// Present the target's origin to the backend instead of the dev server's
    #[serde(default = "default_change_origin")]
    pub change_origin: bool,

    /// Tried in order; only the first matching pattern is applied
    #[serde(default = "default_path_rewrite")]
    pub path_rewrite: Vec<PathRewrite>,
}

/// Regex over the request path and its replacement (`$1` style captures allowed).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathRewrite {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

impl PathRewrite {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            target: default_target(),
            change_origin: default_change_origin(),
            path_rewrite: default_path_rewrite(),
        }
    }
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_target() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_change_origin() -> bool {
    true
}

fn default_path_rewrite() -> Vec<PathRewrite> {
    vec![PathRewrite::new("^/api", "")]
}

pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "card-game", "card-game-frontend")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_dir())
}

/// Load `config.{toml,json,yaml}` from `config_dir`, then apply `CARD_GAME_*` env overrides.
pub fn load_config_from(config_dir: &Path) -> Result<Config> {
    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("port", i64::from(default_port()))?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                .required(false),
        )
        // Override with environment variables (CARD_GAME_PORT, CARD_GAME_PROXY__TARGET, etc.)
        .add_source(
            ::config::Environment::with_prefix("CARD_GAME")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
