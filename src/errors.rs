// ABOUTME: Error types for the html2pptx application
// ABOUTME: Separates configuration failures from rendering and writing failures

use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "Usage: html2pptx --html-dir <dir> | --html <file> [--html <file2>] \
--output <file.pptx> --layout <widescreen|normal|A1> [--validate]";

#[derive(Error, Debug)]
pub enum Html2PptxError {
    #[error("Use either --html-dir or --html, not both.")]
    ConflictingInputSources,

    #[error("HTML directory not found: {0:?}")]
    InputDirectoryNotFound(PathBuf),

    #[error("No HTML inputs to convert.\n{}", USAGE)]
    NoInputs,

    #[error("Missing --output for PPTX generation.")]
    MissingOutput,

    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    #[error("Failed to convert {path:?}: {message}")]
    Conversion { path: PathBuf, message: String },

    #[error("Headless browser error: {message}")]
    Browser {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("PPTX serialization error: {0}")]
    Serialization(String),

    #[error("File operation failed: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl Html2PptxError {
    /// True for errors raised while validating the invocation, before any
    /// conversion work starts.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Html2PptxError::ConflictingInputSources
                | Html2PptxError::InputDirectoryNotFound(_)
                | Html2PptxError::NoInputs
                | Html2PptxError::MissingOutput
                | Html2PptxError::UnsupportedLayout(_)
        )
    }
}

impl From<anyhow::Error> for Html2PptxError {
    fn from(err: anyhow::Error) -> Self {
        Html2PptxError::Browser {
            message: err.to_string(),
            source: Some(err.into()),
        }
    }
}

impl From<zip::result::ZipError> for Html2PptxError {
    fn from(err: zip::result::ZipError) -> Self {
        Html2PptxError::Serialization(format!("ZIP operation failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Html2PptxError>;
