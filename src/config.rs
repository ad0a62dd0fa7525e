use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use normalize_path::NormalizePath;
use reqwest::Url;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::OnceCell;

use crate::{backend::http::DEFAULT_HEALTH_TIMEOUT, cli::CliArgs, display::PLACEHOLDER_IMAGE};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:7860";
static CONFIG: OnceCell<Config> = OnceCell::const_new();

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Matching backend base URL
    pub backend_url: String,
    /// Initial similarity threshold
    pub threshold: f64,
    /// Fallback image for products whose picture cannot be loaded
    pub placeholder_image: String,
    /// Debug panel visibility, derived from the backend host when unset
    pub debug: Option<bool>,
    /// Seconds the startup health check may take
    pub health_timeout: u64,
    /// Where to write the preview of each result set
    pub save_preview: Option<PathBuf>,
}

impl Config {
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.backend_url)
            .map_err(|e| anyhow!("Invalid backend URL {:?}: {}", self.backend_url, e))
    }

    /// Development hosts get the debug panel unless told otherwise.
    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or_else(|| {
            self.base_url()
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .is_some_and(|host| host == "localhost" || host == "127.0.0.1")
        })
    }
}

pub(crate) async fn init_config(args: &CliArgs) -> Result<&'static Config> {
    CONFIG.get_or_try_init(|| async { load_config(args) }).await
}

pub(crate) fn load_config(args: &CliArgs) -> Result<Config> {
    let defaults = json!({
        "backend_url": DEFAULT_BACKEND_URL,
        "threshold": 0.0,
        "health_timeout": DEFAULT_HEALTH_TIMEOUT.as_secs(),
        "placeholder_image": PLACEHOLDER_IMAGE,
    });

    let mut figment = Figment::new().merge(Serialized::defaults(defaults));

    let config_path = PathBuf::from(
        args.config
            .clone()
            .unwrap_or(DEFAULT_CONFIG_PATH.to_string()),
    );

    if config_path.exists() {
        log::info!("Config file found: {}", config_path.display());
        figment = merge_file(figment, &config_path)?;
    } else if config_path.to_str() != Some(DEFAULT_CONFIG_PATH) {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config: Config = figment.merge(Serialized::defaults(args)).extract()?;

    log::debug!("Loaded config: {:#?}", config);

    config.base_url()?;
    if !config.threshold.is_finite() || !(0.0..=1.0).contains(&config.threshold) {
        bail!(
            "Threshold must be between 0 and 1, got {}",
            config.threshold
        );
    }

    config.save_preview = config
        .save_preview
        .map(|dir| dir.as_path().resolve().normalize());

    Ok(config)
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        Some("json") => Ok(figment.merge(Json::file(path))),
        Some("yaml") | Some("yml") => Ok(figment.merge(Yaml::file(path))),
        _ => bail!("Cannot identify config file type. Must be .toml, .json or .yaml"),
    }
}
