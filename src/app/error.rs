use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsprintError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout failed: {0}")]
    Layout(String),

    #[error("Failed to write {path}: {source}")]
    Render {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Print dispatch to '{printer}' failed: {reason}")]
    Print { printer: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NewsprintError>;
