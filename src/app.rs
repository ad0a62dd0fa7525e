use std::path::PathBuf;

use crate::{
    backend::SharedMatchBackend,
    display::{Renderer, View},
    error::MatchError,
    input::{self, FileSelection},
    models::ResultSet,
    state::AppState,
    utils,
};

/// Everything the user can do. Drag events only touch the drop zone; the host never
/// gets to act on them.
#[derive(strum_macros::Display, Debug, Clone, PartialEq)]
pub enum Action {
    SelectFile(PathBuf),
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<PathBuf>),
    SubmitFile,
    SubmitUrl(String),
    SetThreshold(f64),
    CheckHealth,
}

/// Owns the state and drives action -> state update -> render.
pub struct App {
    backend: SharedMatchBackend,
    renderer: Renderer,
    state: AppState,
    preview_dir: Option<PathBuf>,
    on_progress: Option<Box<dyn Fn(&View) + Send + Sync>>,
}

impl App {
    pub fn new(backend: SharedMatchBackend, renderer: Renderer, state: AppState) -> Self {
        Self {
            backend,
            renderer,
            state,
            preview_dir: None,
            on_progress: None,
        }
    }

    /// Write the preview of every stored result set into `dir`.
    pub fn save_previews_to(mut self, dir: PathBuf) -> Self {
        self.preview_dir = Some(dir);
        self
    }

    /// Called with the in-flight view once a request has started, so the busy
    /// indicator is visible while waiting.
    pub fn on_progress(mut self, hook: impl Fn(&View) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.renderer.render(&self.state)
    }

    pub async fn dispatch(&mut self, action: Action) -> View {
        log::debug!("Dispatching {}", action);

        match action {
            Action::SelectFile(path) => {
                let selection = FileSelection::new(path);
                self.state.drop_zone.show_file(&selection.name);
                self.state.selection = Some(selection);
            }
            Action::DragEnter | Action::DragOver => self.state.drop_zone.highlight(),
            Action::DragLeave => self.state.drop_zone.unhighlight(),
            Action::Drop(paths) => {
                self.state.drop_zone.unhighlight();
                if let Some(selection) = input::first_dropped(&paths) {
                    self.state.drop_zone.show_file(&selection.name);
                    self.state.selection = Some(selection);
                }
            }
            Action::SubmitFile => self.submit_file().await,
            Action::SubmitUrl(url) => self.submit_url(&url).await,
            Action::SetThreshold(threshold) => {
                if let Err(e) = self.state.set_threshold(threshold) {
                    self.state.show_error(e.to_string());
                }
            }
            Action::CheckHealth => self.check_health().await,
        }

        self.view()
    }

    async fn submit_file(&mut self) {
        let selection = match input::validate_file(self.state.selection.as_ref()) {
            Ok(selection) => selection.clone(),
            Err(e) => {
                self.state.show_error(e.to_string());
                return;
            }
        };

        let backend = self.backend.clone();
        self.run(async move { backend.submit_file(&selection).await })
            .await;
    }

    async fn submit_url(&mut self, url: &str) {
        let url = match input::validate_url(url) {
            Ok(url) => url,
            Err(e) => {
                self.state.show_error(e.to_string());
                return;
            }
        };

        let backend = self.backend.clone();
        self.run(async move { backend.submit_url(&url).await }).await;
    }

    /// Wraps one backend call in the loading indicator. The indicator is released on
    /// every path, and a failure leaves the stored results alone.
    async fn run(&mut self, request: impl Future<Output = Result<ResultSet, MatchError>>) {
        self.state.hide_error();
        self.state.show_loading();
        if let Some(hook) = &self.on_progress {
            hook(&self.view());
        }

        match request.await {
            Ok(results) => {
                log::info!("Storing {} products", results.products.len());
                log::debug!(
                    "Preview data URI is {} characters long",
                    results.preview.data_uri().len()
                );
                if let Some(dir) = &self.preview_dir
                    && let Err(e) = utils::save_preview(dir, &results.preview).await
                {
                    log::error!("Failed to save preview to {}: {}", dir.display(), e);
                }
                self.state.set_results(results);
            }
            Err(e) => {
                log::error!("Search failed: {}", e);
                self.state.show_error(e.user_message());
            }
        }

        self.state.hide_loading();
    }

    /// Best effort. The outcome only ever lands in the debug panel.
    async fn check_health(&mut self) {
        self.state.debug.lines = vec![t!("debug.testing").to_string()];

        self.state.debug.lines = match self.backend.health().await {
            Ok(health) => {
                log::info!("Backend is up: {}", health.status);
                vec![
                    t!("debug.running", status = health.status).to_string(),
                    t!("debug.message", message = health.message).to_string(),
                ]
            }
            Err(e) => {
                log::warn!("Backend health check failed: {}", e);
                vec![
                    t!("debug.failed", error = e).to_string(),
                    t!("debug.hint", url = self.backend.name()).to_string(),
                ]
            }
        };
    }
}
