use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::Action;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub(crate) enum DragEvent {
    Enter,
    Over,
    Leave,
}

/// Commands understood by the interactive session.
#[derive(Subcommand, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    /// Pick an image file to upload
    Select {
        #[arg(required = true, num_args = 1..)]
        path: Vec<String>,
    },
    /// Drop one or more files on the drop zone (the first one is kept)
    Drop { paths: Vec<PathBuf> },
    /// Simulate dragging over the drop zone
    Drag {
        #[arg(value_enum)]
        event: DragEvent,
    },
    /// Upload the selected file
    Upload,
    /// Search with an image URL
    Url {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        url: Vec<String>,
    },
    /// Set the minimum similarity, between 0 and 1
    Threshold {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Print the current screen again
    Show,
    /// Check whether the backend is reachable
    Health,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

impl Command {
    pub(crate) fn parse_line(line: &str) -> Result<Command, clap::Error> {
        Line::try_parse_from(line.split_whitespace()).map(|line| line.command)
    }

    /// The action this command triggers, if it triggers one at all.
    pub(crate) fn action(self) -> Option<Action> {
        match self {
            Command::Select { path } => Some(Action::SelectFile(PathBuf::from(path.join(" ")))),
            Command::Drop { paths } => Some(Action::Drop(paths)),
            Command::Drag { event } => Some(match event {
                DragEvent::Enter => Action::DragEnter,
                DragEvent::Over => Action::DragOver,
                DragEvent::Leave => Action::DragLeave,
            }),
            Command::Upload => Some(Action::SubmitFile),
            Command::Url { url } => Some(Action::SubmitUrl(url.join(" "))),
            Command::Threshold { value } => Some(Action::SetThreshold(value)),
            Command::Health => Some(Action::CheckHealth),
            Command::Show | Command::Quit => None,
        }
    }
}
