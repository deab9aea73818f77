//! Error types for the birthday bot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),

    #[error("Slack API error: {0}")]
    SlackError(String),

    #[error("Translation file error: {0}")]
    TranslationError(String),

    #[error("Missing translation for base locale '{0}'")]
    MissingBaseLocale(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::SpreadsheetError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::SlackError(err.to_string())
    }
}
