//! Error types for the generate pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ValidationError;

/// Why an input document could not be loaded
#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] ValidationError),
}

/// Errors that can occur while generating an output file
///
/// Each variant names the stage that failed and carries the underlying cause
/// in its message.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read input JSON from {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: InputError,
    },

    #[error("Failed to read template from {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Failed to write output to {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
