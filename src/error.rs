use thiserror::Error;

/// Rejected user input, caught before anything is sent to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select an image to upload")]
    NoFile,

    #[error("Please enter an image URL")]
    EmptyUrl,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered with a non-success HTTP status
    #[error("Server error: {status}")]
    Transport { status: u16 },

    /// The backend answered but reported `success: false`
    #[error("{message}")]
    Processing { message: String },

    // Connection refused, broken body, undecodable JSON.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// The text shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            MatchError::Validation(e) => e.to_string(),
            MatchError::Processing { message } => message.clone(),
            other => format!("Error: {}", other),
        }
    }
}
