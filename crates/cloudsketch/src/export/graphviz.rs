//! Running the Graphviz program and writing its output.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use cloudsketch_core::semantic::{LayoutEngine, OutputFormat};

use super::Error;
use crate::config::LayoutConfig;

/// A Graphviz executable together with the layout algorithm it runs.
#[derive(Debug, Clone)]
pub struct GraphvizEngine {
    program: String,
    engine: LayoutEngine,
}

impl GraphvizEngine {
    pub fn new(program: impl Into<String>, engine: LayoutEngine) -> Self {
        Self {
            program: program.into(),
            engine,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.program(), config.engine())
    }

    /// Lays out `source` and returns the rendered bytes in `format`.
    ///
    /// The source is written to a temporary file which Graphviz reads, so
    /// large diagrams never block on a pipe.
    ///
    /// # Errors
    ///
    /// - [`Error::EngineNotFound`] if the program cannot be located.
    /// - [`Error::EngineFailed`] if it exits unsuccessfully.
    /// - [`Error::EmptyOutput`] if it succeeds without writing anything.
    pub fn run(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>, Error> {
        let mut input = NamedTempFile::new()?;
        input.write_all(source.as_bytes())?;
        input.flush()?;

        debug!(
            program = self.program,
            engine = self.engine.as_str(),
            format = format.as_str(),
            input:? = input.path();
            "Invoking Graphviz"
        );

        let output = Command::new(&self.program)
            .arg(format!("-K{}", self.engine.as_str()))
            .arg(format!("-T{}", format.as_str()))
            .arg(input.path())
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => Error::EngineNotFound {
                    program: self.program.clone(),
                },
                _ => Error::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(program = self.program, status:% = output.status; "Graphviz failed");
            return Err(Error::EngineFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        if output.stdout.is_empty() {
            return Err(Error::EmptyOutput {
                program: self.program.clone(),
                format: format.to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Writes each `(file_name, bytes)` pair into `dir`, creating `dir` if needed.
///
/// Every file is staged as a temporary file in `dir` before any of them is
/// moved into place. If moving one fails, the files already moved are
/// removed again, so either all files are written or none is.
pub fn write_all_atomically(
    dir: &Path,
    files: &[(String, Vec<u8>)],
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(dir)?;

    let mut staged = Vec::with_capacity(files.len());
    for (file_name, bytes) in files {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        staged.push((file, dir.join(file_name), bytes.len()));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (file, target, len) in staged {
        if let Err(err) = file.persist(&target) {
            for path in &written {
                if let Err(cleanup) = fs::remove_file(path) {
                    warn!(path:? = path, err:% = cleanup; "Failed to remove partial output");
                }
            }
            return Err(Error::Persist {
                path: target,
                source: err.error,
            });
        }
        info!(path:? = target, bytes = len; "Diagram written");
        written.push(target);
    }

    Ok(written)
}
