use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Error: {reason}")]
    MissingInput { reason: String },

    #[error("Error loading JSON file {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("Error loading JSON file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Error: Invalid JSON format for items: {source}")]
    MalformedItems { source: serde_json::Error },

    #[error("{var} not found in the environment or .env file")]
    MissingApiKey { var: &'static str },

    #[error("An error occurred: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("An error occurred: invoice service responded {status}\n\
             Response content: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("IO Error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl InvoiceError {
    pub fn missing(reason: &str) -> Self {
        Self::MissingInput {
            reason: reason.to_string(),
        }
    }
}
