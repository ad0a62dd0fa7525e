#[macro_use]
extern crate rust_i18n;

use std::{
    io::Write,
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use clap::Parser;
use tokio::io::{self, AsyncWriteExt, BufReader};

mod app;
mod backend;
mod cli;
mod config;
mod display;
mod error;
mod handlers;
mod input;
mod models;
mod state;
mod utils;

use crate::{
    app::{Action, App},
    backend::HttpBackend,
    cli::CliArgs,
    display::{Renderer, View, terminal},
    state::AppState,
};

i18n!("locales", fallback = "en");

/// A one-shot search fails when its final screen shows an error.
fn exit_code(view: &View) -> ExitCode {
    if view.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    pretty_env_logger::init();

    log::debug!("Parsing CLI args...");
    let args = CliArgs::parse();
    let config = config::init_config(&args).await?;
    let base_url = config.base_url()?;

    log::info!("Using matching backend at {}", base_url);

    let backend = HttpBackend::new(&base_url)
        .with_health_timeout(Duration::from_secs(config.health_timeout));
    let mut app = App::new(
        Arc::new(backend),
        Renderer::new(config.placeholder_image.clone()),
        AppState::new(config.threshold, config.debug_enabled()),
    )
    .on_progress(|view| {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(terminal::format(view).as_bytes());
        let _ = stdout.flush();
    });

    if let Some(dir) = config.save_preview.clone() {
        app = app.save_previews_to(dir);
    }

    app.dispatch(Action::CheckHealth).await;

    let one_shot = match (args.file, args.url) {
        (Some(file), _) => {
            app.dispatch(Action::SelectFile(file)).await;
            Some(Action::SubmitFile)
        }
        (None, Some(url)) => Some(Action::SubmitUrl(url)),
        (None, None) => None,
    };

    let mut stdout = io::stdout();
    if let Some(action) = one_shot {
        let view = app.dispatch(action).await;
        stdout
            .write_all(terminal::format(&view).as_bytes())
            .await?;
        stdout.flush().await?;

        return Ok(exit_code(&view));
    }

    handlers::session::run(&mut app, BufReader::new(io::stdin()), stdout).await?;
    Ok(ExitCode::SUCCESS)
}
