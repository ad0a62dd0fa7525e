use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::ValidationError;

/// The image the user picked, either through `select` or by dropping it.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSelection {
    pub path: PathBuf,
    pub name: String,
}

impl FileSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if !is_image(&path) {
            log::warn!("Selected file {} does not look like an image", path.display());
        }

        Self { path, name }
    }
}

fn is_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime::IMAGE)
}

/// Drop target state. Purely cosmetic, never consulted by submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    pub highlighted: bool,
    pub label: String,
}

impl Default for DropZone {
    fn default() -> Self {
        Self {
            highlighted: false,
            label: t!("drop.prompt").to_string(),
        }
    }
}

impl DropZone {
    pub fn highlight(&mut self) {
        self.highlighted = true;
    }

    pub fn unhighlight(&mut self) {
        self.highlighted = false;
    }

    pub fn show_file(&mut self, name: &str) {
        self.label = t!("drop.selected", name = name).to_string();
    }
}

/// First file of a drop. The rest are ignored, like a single-file picker would.
pub fn first_dropped(paths: &[PathBuf]) -> Option<FileSelection> {
    paths.first().map(FileSelection::new)
}

pub fn validate_file(selection: Option<&FileSelection>) -> Result<&FileSelection, ValidationError> {
    selection.ok_or(ValidationError::NoFile)
}

/// Only absolute URLs pass; relative references and free text are rejected.
pub fn validate_url(input: &str) -> Result<Url, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    Url::parse(input).map_err(|e| {
        log::debug!("Rejected URL {:?}: {}", input, e);
        ValidationError::InvalidUrl
    })
}
