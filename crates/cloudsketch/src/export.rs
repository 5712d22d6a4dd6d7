//! Export of diagrams to Graphviz and to image files.
//!
//! - [`dot`] turns a validated [`TopologyGraph`](crate::structure::TopologyGraph)
//!   into Graphviz source.
//! - [`graphviz`] runs the Graphviz program on that source and writes images.

pub mod dot;
pub mod graphviz;

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while running the layout engine or writing its output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{program}` was not found")]
    EngineNotFound { program: String },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    EngineFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("`{program}` produced no {format} output")]
    EmptyOutput { program: String, format: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to move rendered file into place at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
