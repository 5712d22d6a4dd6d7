//! Configuration types for diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, styled, and written. All types implement
//! [`serde::Deserialize`] so they can be loaded from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Which Graphviz program and [`LayoutEngine`] to run.
//! - [`StyleConfig`] - Background color and icon directory.
//! - [`OutputConfig`] - Output directory and format overrides.
//!
//! # Example
//!
//! ```
//! # use cloudsketch::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().program(), "dot");
//! assert!(config.style().background_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use cloudsketch_core::{
    color::Color,
    semantic::{LayoutEngine, OutputFormat},
};

/// Name of the Graphviz executable used when none is configured.
pub const DEFAULT_PROGRAM: &str = "dot";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, output: OutputConfig) -> Self {
        Self {
            layout,
            style,
            output,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the configured output formats. An empty list clears the override.
    pub fn with_output_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.output.formats = (!formats.is_empty()).then_some(formats);
        self
    }

    /// Replaces the configured output directory.
    pub fn with_output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = Some(directory.into());
        self
    }
}

/// Layout engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Graphviz layout algorithm, passed as `-K<engine>`.
    #[serde(default)]
    engine: LayoutEngine,

    /// Graphviz executable to run.
    #[serde(default = "default_program")]
    program: String,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            program: default_program(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `engine` - Layout algorithm.
    /// * `program` - Graphviz executable name or path.
    pub fn new(engine: LayoutEngine, program: impl Into<String>) -> Self {
        Self {
            engine,
            program: program.into(),
        }
    }

    /// Returns the [`LayoutEngine`].
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Returns the Graphviz executable.
    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to the renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Diagram background, as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Directory holding node icons as `<provider>/<category>/<icon>.png`.
    #[serde(default)]
    icons_dir: Option<PathBuf>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    pub fn new(background_color: Option<String>, icons_dir: Option<PathBuf>) -> Self {
        Self {
            background_color,
            icons_dir,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the icon directory, if configured.
    pub fn icons_dir(&self) -> Option<&Path> {
        self.icons_dir.as_deref()
    }
}

/// Where and in which formats diagrams are written.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory output files are written to.
    #[serde(default)]
    directory: Option<PathBuf>,

    /// Formats that replace the diagram's own output formats.
    #[serde(default)]
    formats: Option<Vec<OutputFormat>>,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(directory: Option<PathBuf>, formats: Option<Vec<OutputFormat>>) -> Self {
        Self { directory, formats }
    }

    /// Returns the configured output directory.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Returns the configured format override.
    pub fn formats(&self) -> Option<&[OutputFormat]> {
        self.formats.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.layout().engine(), LayoutEngine::Dot);
        assert_eq!(config.layout().program(), DEFAULT_PROGRAM);
        assert_eq!(config.style().background_color(), Ok(None));
        assert_eq!(config.style().icons_dir(), None);
        assert_eq!(config.output().directory(), None);
        assert_eq!(config.output().formats(), None);
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::new(Some("not-a-color".to_string()), None);

        let err = style.background_color().unwrap_err();
        assert!(err.starts_with("Invalid background color in config"));
    }

    #[test]
    fn test_valid_background_color() {
        let style = StyleConfig::new(Some("white".to_string()), None);

        let color = style.background_color().unwrap().unwrap();
        assert_eq!(color.to_hex(), "#ffffff");
    }

    #[test]
    fn test_with_output_formats() {
        let config = AppConfig::default().with_output_formats(vec![OutputFormat::Svg]);
        assert_eq!(config.output().formats(), Some(&[OutputFormat::Svg][..]));

        let cleared = config.with_output_formats(Vec::new());
        assert_eq!(cleared.output().formats(), None);
    }

    #[test]
    fn test_with_output_directory() {
        let config = AppConfig::default().with_output_directory("out");
        assert_eq!(config.output().directory(), Some(Path::new("out")));
    }
}
