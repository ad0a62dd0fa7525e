use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{app::App, display::terminal, handlers::command::Command};

const PROMPT: &str = "> ";

/// Reads commands line by line until `quit` or end of input, printing the screen after
/// every action.
pub(crate) async fn run<R, W>(app: &mut App, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output
        .write_all(terminal::format(&app.view()).as_bytes())
        .await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match Command::parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                output.write_all(e.render().to_string().as_bytes()).await?;
                continue;
            }
        };

        let view = match command {
            Command::Quit => break,
            Command::Show => app.view(),
            command => match command.action() {
                Some(action) => app.dispatch(action).await,
                None => app.view(),
            },
        };

        output
            .write_all(terminal::format(&view).as_bytes())
            .await?;
    }

    log::info!("Session ended");
    Ok(())
}
