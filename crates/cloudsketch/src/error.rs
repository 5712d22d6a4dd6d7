//! Error types for cloudsketch operations.
//!
//! This module provides the main error type [`SketchError`] which wraps
//! the conditions that can stop a diagram from being rendered.

use std::io;

use thiserror::Error;

/// The main error type for cloudsketch operations.
///
/// Every variant is fatal for the render that raised it; nothing is retried.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout engine `{program}` is not available")]
    EngineUnavailable { program: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for SketchError {
    fn from(error: crate::export::Error) -> Self {
        use crate::export::Error;

        match error {
            Error::EngineNotFound { program } => Self::EngineUnavailable { program },
            failed @ (Error::EngineFailed { .. } | Error::EmptyOutput { .. }) => {
                Self::Layout(failed.to_string())
            }
            other => Self::Export(Box::new(other)),
        }
    }
}
