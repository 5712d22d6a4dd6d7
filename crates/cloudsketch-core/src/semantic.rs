//! Semantic diagram model types.
//!
//! This module contains the description of a diagram before it is turned
//! into Graphviz source and handed to a layout engine.
//!
//! # Pipeline Position
//!
//! ```text
//! Canvas declarations (nodes, clusters, flows)
//!     ↓ Canvas::finish
//! Semantic Model (these types)
//!     ↓ structure (validation, edge expansion)
//! Topology Graph
//!     ↓ export
//! DOT source → layout engine → image file
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - [`Diagram`] and its canvas-wide settings ([`Direction`], [`CurveStyle`],
//!   [`OutputFormat`], [`LayoutEngine`])
//! - [`element`] - Diagram elements: [`Node`], [`Cluster`], [`Flow`], [`Link`]
//! - [`canvas`] - The scoped [`Canvas`] builder

pub mod canvas;
pub mod diagram;
pub mod element;

pub use canvas::*;
pub use diagram::*;
pub use element::*;
