//! Core diagram structure types.
//!
//! This module contains the root of the semantic model:
//! - [`Diagram`] - Title, canvas-wide settings, and the declared elements
//! - [`Direction`], [`CurveStyle`] - Layout hints passed to the engine
//! - [`OutputFormat`] - Image formats the engine can produce
//! - [`LayoutEngine`] - Graphviz layout algorithms

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::UnknownVariant,
    identifier::Id,
    semantic::element::{Cluster, Flow, Node},
};

/// Ordered Graphviz attributes (`name` → `value`).
pub type Attributes = IndexMap<String, String>;

/// Rank direction of the layout.
///
/// The names match Graphviz `rankdir` values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Self::TopBottom,
        Self::BottomTop,
        Self::LeftRight,
        Self::RightLeft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
        }
    }
}

/// How edges are routed between nodes.
///
/// The names match Graphviz `splines` values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    #[default]
    Ortho,
    Curved,
    Spline,
    Polyline,
}

impl CurveStyle {
    pub const ALL: [CurveStyle; 4] = [Self::Ortho, Self::Curved, Self::Spline, Self::Polyline];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ortho => "ortho",
            Self::Curved => "curved",
            Self::Spline => "spline",
            Self::Polyline => "polyline",
        }
    }
}

/// Image format produced by the layout engine.
///
/// The name doubles as the Graphviz `-T` argument and the file extension.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [Self::Png, Self::Jpg, Self::Svg, Self::Pdf, Self::Dot];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

/// Available Graphviz layout algorithms.
///
/// The names match external configuration strings (snake_case) and the
/// values of the Graphviz `-K` flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Hierarchical layout (default)
    #[default]
    Dot,
    /// Spring model layout
    Neato,
    /// Force-directed placement
    Fdp,
    /// Scalable force-directed placement for large graphs
    Sfdp,
    /// Circular layout
    Circo,
    /// Radial layout
    Twopi,
}

impl LayoutEngine {
    pub const ALL: [LayoutEngine; 6] = [
        Self::Dot,
        Self::Neato,
        Self::Fdp,
        Self::Sfdp,
        Self::Circo,
        Self::Twopi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Neato => "neato",
            Self::Fdp => "fdp",
            Self::Sfdp => "sfdp",
            Self::Circo => "circo",
            Self::Twopi => "twopi",
        }
    }
}

/// Implements `Display` and `FromStr` for an enum from its `ALL` and `as_str`.
macro_rules! string_enum {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| {
                        let names: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        UnknownVariant::new($kind, s, &names)
                    })
            }
        }
    };
}

string_enum!(Direction, "direction");
string_enum!(CurveStyle, "curve style");
string_enum!(OutputFormat, "output format");
string_enum!(LayoutEngine, "layout engine");

/// Derives the output file stem from a diagram title.
///
/// Whitespace runs become a single `_` and the result is lower-cased. A title
/// with no visible characters yields `"diagram"`.
///
/// # Examples
///
/// ```
/// use cloudsketch_core::semantic::filename_from_title;
///
/// assert_eq!(filename_from_title("Image Sharing Service"), "image_sharing_service");
/// assert_eq!(filename_from_title("   "), "diagram");
/// ```
pub fn filename_from_title(title: &str) -> String {
    let stem = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    if stem.is_empty() {
        "diagram".to_string()
    } else {
        stem
    }
}

/// A complete diagram: canvas settings plus every declared element.
///
/// Diagrams are produced by [`Canvas::finish`](crate::semantic::Canvas::finish)
/// and are immutable afterwards.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub(crate) title: String,
    pub(crate) filename: String,
    pub(crate) direction: Direction,
    pub(crate) curve_style: CurveStyle,
    pub(crate) output_formats: Vec<OutputFormat>,
    pub(crate) strict: bool,
    pub(crate) autolabel: bool,
    pub(crate) graph_attrs: Attributes,
    pub(crate) node_attrs: Attributes,
    pub(crate) edge_attrs: Attributes,
    pub(crate) nodes: Vec<Node>,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) flows: Vec<Flow>,
}

impl Diagram {
    pub(crate) fn new(title: String) -> Self {
        let filename = filename_from_title(&title);
        Self {
            title,
            filename,
            direction: Direction::default(),
            curve_style: CurveStyle::default(),
            output_formats: vec![OutputFormat::default()],
            strict: false,
            autolabel: false,
            graph_attrs: Attributes::new(),
            node_attrs: Attributes::new(),
            edge_attrs: Attributes::new(),
            nodes: Vec::new(),
            clusters: Vec::new(),
            flows: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Output file stem, without extension.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn curve_style(&self) -> CurveStyle {
        self.curve_style
    }

    pub fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }

    /// Whether the Graphviz graph is declared `strict` (duplicate edges merged).
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether node labels are prefixed with their kind's class name.
    pub fn autolabel(&self) -> bool {
        self.autolabel
    }

    /// Extra graph attributes, applied over the defaults.
    pub fn graph_attrs(&self) -> &Attributes {
        &self.graph_attrs
    }

    /// Extra node attributes, applied over the defaults.
    pub fn node_attrs(&self) -> &Attributes {
        &self.node_attrs
    }

    /// Extra edge attributes, applied over the defaults.
    pub fn edge_attrs(&self) -> &Attributes {
        &self.edge_attrs
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Clusters in declaration order, outer clusters before the clusters they contain.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Edge statements in declaration order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn cluster(&self, id: Id) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id() == id)
    }

    /// Number of rendered edges once every flow is expanded into hops.
    pub fn edge_count(&self) -> usize {
        self.flows.iter().map(Flow::len).sum()
    }

    /// File names the diagram renders to, one per output format.
    pub fn output_file_names(&self) -> Vec<String> {
        self.output_formats
            .iter()
            .map(|format| format!("{}.{}", self.filename, format.as_str()))
            .collect()
    }
}
