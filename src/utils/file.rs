use std::path::{Path, PathBuf};

use tokio::fs;

use crate::models::Preview;

const PREVIEW_FILE: &str = "preview.jpg";

/// Writes the decoded preview into `dir`, overwriting the previous one. Returns `None`
/// when there was nothing to write.
pub async fn save_preview(dir: &Path, preview: &Preview) -> std::io::Result<Option<PathBuf>> {
    if preview.bytes.is_empty() {
        log::debug!("No preview bytes to save");
        return Ok(None);
    }

    fs::create_dir_all(dir).await?;
    let path = dir.join(PREVIEW_FILE);
    fs::write(&path, &preview.bytes).await?;

    log::info!("Preview saved to {}", path.display());
    Ok(Some(path))
}
