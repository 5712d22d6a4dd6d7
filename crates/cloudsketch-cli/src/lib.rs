//! CLI logic for the cloudsketch diagram renderer.
//!
//! The binary renders the image sharing service topology, either to image
//! files or, with `--emit-dot`, as Graphviz source on stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use cloudsketch::{DiagramRenderer, SketchError, blueprint};

/// Run the cloudsketch CLI application, printing to stdout.
///
/// # Errors
///
/// Returns `SketchError` for:
/// - Configuration loading errors
/// - Graph validation errors
/// - A missing or failing Graphviz program
/// - File I/O errors while writing output
pub fn run(args: &Args) -> Result<(), SketchError> {
    let stdout = io::stdout();
    run_with_writer(args, &mut stdout.lock())
}

/// Run the cloudsketch CLI application, printing to `out`.
///
/// Output directory precedence is `--output-dir`, then the configured
/// `output.directory`, then the working directory.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_writer(args: &Args, out: &mut impl Write) -> Result<(), SketchError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if !args.formats.is_empty() {
        app_config = app_config.with_output_formats(args.formats.clone());
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| app_config.output().directory().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let diagram = blueprint::image_sharing_service();
    let renderer = DiagramRenderer::new(app_config);

    if args.emit_dot {
        let source = renderer.to_dot(&diagram)?;
        writeln!(out, "{source}")?;
        info!("Graphviz source written to stdout");
        return Ok(());
    }

    info!(
        title = diagram.title(),
        output_dir = output_dir.display().to_string();
        "Processing diagram"
    );

    let written = renderer.render_to_dir(&diagram, &output_dir)?;

    for path in &written {
        info!(output_file = path.display().to_string(); "Diagram exported successfully");
    }

    Ok(())
}
