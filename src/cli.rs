use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

/// Find catalog products that look like an image.
#[derive(Parser, Serialize, Debug, Default)]
#[command(version, about)]
pub(crate) struct CliArgs {
    /// Matching backend base URL (default: "http://127.0.0.1:7860")
    #[arg(short, long, env = "VPM_BACKEND_URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) backend_url: Option<String>,

    /// Minimum similarity to display, between 0 and 1 (default: 0)
    #[arg(short, long, env = "VPM_THRESHOLD")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) threshold: Option<f64>,

    /// Image shown for products whose picture fails to load
    #[arg(long, env = "VPM_PLACEHOLDER_IMAGE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) placeholder_image: Option<String>,

    /// Show the debug panel (default: only for a localhost backend)
    #[arg(long, env = "VPM_DEBUG")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) debug: Option<bool>,

    /// Seconds to wait for the startup health check (default: 5)
    #[arg(long, env = "VPM_HEALTH_TIMEOUT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) health_timeout: Option<u64>,

    /// Directory to store the matched image preview in
    #[arg(long, env = "VPM_SAVE_PREVIEW")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) save_preview: Option<PathBuf>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "VPM_CONFIG")]
    #[serde(skip_serializing)]
    pub(crate) config: Option<String>,

    /// Search once with this image file and exit
    #[arg(short, long, conflicts_with = "url")]
    #[serde(skip_serializing)]
    pub(crate) file: Option<PathBuf>,

    /// Search once with this image URL and exit
    #[arg(short, long)]
    #[serde(skip_serializing)]
    pub(crate) url: Option<String>,
}
