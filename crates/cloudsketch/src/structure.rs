//! Graph structure built from a semantic diagram.
//!
//! The [`TopologyGraph`] is the validated, edge-expanded view of a
//! [`Diagram`](cloudsketch_core::semantic::Diagram) that the exporter walks.

mod topology;

pub use topology::TopologyGraph;
