//! Cloudsketch - Architecture diagrams of cloud topologies, laid out by Graphviz.
//!
//! Diagrams are declared in code with a [`Canvas`](semantic::Canvas), checked
//! for consistency, translated to Graphviz source and handed to a Graphviz
//! program that lays out and draws the image.

pub mod blueprint;
pub mod config;

mod error;
mod export;
mod structure;

pub use cloudsketch_core::{catalog, color, identifier, semantic};

pub use error::SketchError;

use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use config::AppConfig;
use export::{
    dot::DotExporter,
    graphviz::{self, GraphvizEngine},
};
use semantic::{Diagram, OutputFormat};
use structure::TopologyGraph;

/// Renders diagrams according to an [`AppConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use cloudsketch::{DiagramRenderer, blueprint, config::AppConfig};
///
/// let renderer = DiagramRenderer::new(AppConfig::default());
/// let diagram = blueprint::image_sharing_service();
///
/// let written = renderer
///     .render_to_dir(&diagram, ".")
///     .expect("Failed to render");
/// println!("{written:?}");
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    config: AppConfig,
}

impl DiagramRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate a diagram and return its Graphviz source.
    ///
    /// The same diagram always produces the same text.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Graph`] for an inconsistent diagram and
    /// [`SketchError::Config`] for an invalid style configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloudsketch::{DiagramRenderer, blueprint};
    ///
    /// let dot = DiagramRenderer::default()
    ///     .to_dot(&blueprint::image_sharing_service())
    ///     .unwrap();
    /// assert!(dot.contains("Image Sharing Service"));
    /// ```
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, SketchError> {
        info!(title = diagram.title(); "Building diagram structure");
        let graph = TopologyGraph::from_diagram(diagram)?;
        debug!(
            nodes = graph.nodes_count(),
            edges = graph.edges_count();
            "Structure built successfully"
        );

        let dot = DotExporter::new(diagram, &graph, self.config.style()).build()?;
        let source = DotExporter::to_source(&dot);
        trace!(source = source.as_str(); "Generated Graphviz source");

        Ok(source)
    }

    /// Render a diagram in one format and return the produced bytes.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`to_dot`](Self::to_dot), returns
    /// [`SketchError::EngineUnavailable`] when the Graphviz program cannot be
    /// found and [`SketchError::Layout`] when it fails.
    pub fn render(&self, diagram: &Diagram, format: OutputFormat) -> Result<Vec<u8>, SketchError> {
        let source = self.to_dot(diagram)?;
        self.run_engine(&source, format)
    }

    /// Render a diagram into `dir`, one file per output format.
    ///
    /// Formats come from the configured override when set, otherwise from
    /// the diagram. `dir` is created when missing. Every format is rendered
    /// before anything is written, and the files are moved into place
    /// together, so a failed render or write leaves no new file in `dir`.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render), plus [`SketchError::Io`] and
    /// [`SketchError::Export`] when the files cannot be written.
    pub fn render_to_dir(
        &self,
        diagram: &Diagram,
        dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, SketchError> {
        let dir = dir.as_ref();
        let formats = self.output_formats(diagram);
        let source = self.to_dot(diagram)?;

        info!(
            formats = formats.len(),
            dir:? = dir;
            "Rendering diagram"
        );
        let rendered = formats
            .iter()
            .map(|&format| {
                let file_name = format!("{}.{}", diagram.filename(), format.as_str());
                Ok((file_name, self.run_engine(&source, format)?))
            })
            .collect::<Result<Vec<_>, SketchError>>()?;

        let written = graphviz::write_all_atomically(dir, &rendered)?;

        info!(files = written.len(); "Diagram rendered successfully");
        Ok(written)
    }

    /// The formats [`render_to_dir`](Self::render_to_dir) writes for `diagram`.
    pub fn output_formats(&self, diagram: &Diagram) -> Vec<OutputFormat> {
        self.config
            .output()
            .formats()
            .unwrap_or(diagram.output_formats())
            .to_vec()
    }

    fn run_engine(&self, source: &str, format: OutputFormat) -> Result<Vec<u8>, SketchError> {
        let engine = GraphvizEngine::from_config(self.config.layout());
        let bytes = engine.run(source, format)?;
        debug!(format = format.as_str(), bytes = bytes.len(); "Layout finished");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{LayoutConfig, OutputConfig, StyleConfig},
        semantic::{Canvas, LayoutEngine},
    };

    use super::*;

    #[test]
    fn test_output_formats_prefer_config() {
        let diagram = Canvas::new("Formats")
            .with_output_formats([OutputFormat::Png, OutputFormat::Pdf])
            .finish();

        let renderer = DiagramRenderer::default();
        assert_eq!(
            renderer.output_formats(&diagram),
            vec![OutputFormat::Png, OutputFormat::Pdf]
        );

        let renderer =
            DiagramRenderer::new(AppConfig::default().with_output_formats(vec![OutputFormat::Svg]));
        assert_eq!(renderer.output_formats(&diagram), vec![OutputFormat::Svg]);
    }

    #[test]
    fn test_missing_engine_is_unavailable() {
        let config = AppConfig::new(
            LayoutConfig::new(LayoutEngine::Dot, "cloudsketch-missing-dot"),
            StyleConfig::default(),
            OutputConfig::default(),
        );
        let renderer = DiagramRenderer::new(config);

        let err = renderer
            .render(&blueprint::image_sharing_service(), OutputFormat::Png)
            .unwrap_err();
        assert!(matches!(
            err,
            SketchError::EngineUnavailable { ref program } if program == "cloudsketch-missing-dot"
        ));
    }

    #[test]
    fn test_to_dot_rejects_invalid_style() {
        let config = AppConfig::new(
            LayoutConfig::default(),
            StyleConfig::new(Some("no-such-color".to_string()), None),
            OutputConfig::default(),
        );

        let err = DiagramRenderer::new(config)
            .to_dot(&blueprint::image_sharing_service())
            .unwrap_err();
        assert!(matches!(err, SketchError::Config(_)));
    }
}
