use std::path::PathBuf;
use thiserror::Error;

/// Request-level failures: the input could not be located, read or decoded.
///
/// Individual tournament blocks that fail to parse never end up here; they
/// are skipped inside the parser.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The input path does not exist.
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    /// The input exists but holds no text members.
    #[error("No text files found in {0}")]
    NoTextFiles(PathBuf),

    /// A member could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A member's bytes are not valid UTF-8 text.
    #[error("File is not valid UTF-8 text: {0}")]
    InvalidEncoding(PathBuf),

    /// The response document could not be serialised.
    #[error("Failed to process JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ReportError {
    /// Generic message suitable for the error payload returned to callers.
    ///
    /// Paths and OS error details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ReportError::InputNotFound(_) => "No input archive was provided".to_string(),
            ReportError::NoTextFiles(_) => "The archive contains no text files".to_string(),
            ReportError::FileRead { .. } => "Failed to read the archive".to_string(),
            ReportError::InvalidEncoding(_) => "The archive contains unreadable files".to_string(),
            ReportError::JsonParse(_) => "Failed to process the archive".to_string(),
        }
    }
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
