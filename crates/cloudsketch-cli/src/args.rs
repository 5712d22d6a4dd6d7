//! Command-line argument definitions for the cloudsketch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output directory and formats,
//! configuration file selection, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

use cloudsketch::semantic::OutputFormat;

/// Command-line arguments for the cloudsketch diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the diagram is written to [default: .]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format, repeat for several (png, jpg, svg, pdf, dot)
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the Graphviz source to stdout instead of rendering
    #[arg(long)]
    pub emit_dot: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["cloudsketch"]).unwrap();

        assert_eq!(args.output_dir, None);
        assert!(args.formats.is_empty());
        assert_eq!(args.config, None);
        assert!(!args.emit_dot);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_repeated_formats() {
        let args =
            Args::try_parse_from(["cloudsketch", "--format", "svg", "-f", "pdf", "-o", "out"])
                .unwrap();

        assert_eq!(args.formats, vec![OutputFormat::Svg, OutputFormat::Pdf]);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["cloudsketch", "--format", "bmp"]).is_err());
    }
}
