//! Error adapter for converting SketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use cloudsketch::SketchError;

/// Adapter that renders a [`SketchError`] as a miette diagnostic.
///
/// Each error variant gets a stable code and, where the user can act on it,
/// a help message.
pub struct ErrorAdapter<'a>(pub &'a SketchError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            SketchError::Io(_) => "cloudsketch::io",
            SketchError::Config(_) => "cloudsketch::config",
            SketchError::Graph(_) => "cloudsketch::graph",
            SketchError::EngineUnavailable { .. } => "cloudsketch::engine",
            SketchError::Layout(_) => "cloudsketch::layout",
            SketchError::Export(_) => "cloudsketch::export",
        }
    }

    fn help_text(&self) -> Option<String> {
        match self.0 {
            SketchError::EngineUnavailable { program } => Some(format!(
                "install Graphviz (https://graphviz.org/download/) or set \
                 `layout.program` in the configuration to the location of `{program}`"
            )),
            SketchError::Config(_) => Some(
                "check the configuration file passed with --config or found in \
                 cloudsketch/config.toml"
                    .to_string(),
            ),
            SketchError::Layout(_) => {
                Some("run with --emit-dot to inspect the generated Graphviz source".to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Render `err` as a graphical miette report.
pub fn render_report(err: &SketchError) -> Result<String, fmt::Error> {
    render_with(&GraphicalReportHandler::new(), err)
}

fn render_with(reporter: &GraphicalReportHandler, err: &SketchError) -> Result<String, fmt::Error> {
    let mut writer = String::new();
    reporter.render_report(&mut writer, &ErrorAdapter(err))?;
    Ok(writer)
}
