//! Diagram element types for the semantic model.

use std::fmt;

use crate::{
    catalog::NodeKind,
    color::Color,
    identifier::Id,
    semantic::diagram::{Attributes, Direction},
};

/// Cluster background colors, indexed by nesting depth.
pub const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// A labeled icon for one infrastructure element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
    cluster: Option<Id>,
}

impl Node {
    pub(crate) fn new(id: Id, kind: NodeKind, label: String, cluster: Option<Id>) -> Self {
        Self {
            id,
            kind,
            label,
            cluster,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The innermost cluster the node was declared in, if any.
    pub fn cluster(&self) -> Option<Id> {
        self.cluster
    }

    /// Returns the text drawn under the node.
    ///
    /// With `autolabel`, the label is prefixed by the kind's class name on its
    /// own line.
    pub fn display_label(&self, autolabel: bool) -> String {
        if autolabel {
            format!("{}\n{}", self.kind.class_name(), self.label)
        } else {
            self.label.clone()
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.label)
    }
}

/// Settings for a cluster opened with [`Canvas::cluster_with`](crate::semantic::Canvas::cluster_with).
#[derive(Debug, Clone, Default)]
pub struct ClusterOptions {
    label: String,
    direction: Direction,
    attrs: Attributes,
}

impl ClusterOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Adds a Graphviz attribute applied over the cluster defaults.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// A named visual grouping of nodes, drawn with a surrounding boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    label: String,
    direction: Direction,
    depth: usize,
    parent: Option<Id>,
    members: Vec<Id>,
    attrs: Attributes,
}

impl Cluster {
    pub(crate) fn new(id: Id, options: ClusterOptions, depth: usize, parent: Option<Id>) -> Self {
        Self {
            id,
            label: options.label,
            direction: options.direction,
            depth,
            parent,
            members: Vec::new(),
            attrs: options.attrs,
        }
    }

    pub(crate) fn add_member(&mut self, node: Id) {
        self.members.push(node);
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Nesting depth; top-level clusters have depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Nodes declared directly inside this cluster, in declaration order.
    pub fn members(&self) -> &[Id] {
        &self.members
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Background color for the cluster's depth.
    pub fn background(&self) -> &'static str {
        CLUSTER_BACKGROUNDS[self.depth % CLUSTER_BACKGROUNDS.len()]
    }
}

/// Which way an edge points.
///
/// Edges are always emitted left-to-right as written; the direction only
/// decides where the arrowheads go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    Forward,       // >>
    Backward,      // <<
    Undirected,    // -
    Bidirectional, // <>
}

impl EdgeDirection {
    /// Graphviz `dir` attribute value.
    pub fn dot_dir(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "back",
            Self::Undirected => "none",
            Self::Bidirectional => "both",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Forward => ">>",
            Self::Backward => "<<",
            Self::Undirected => "-",
            Self::Bidirectional => "<>",
        }
    }
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Line pattern of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

/// One hop of a [`Flow`]: a direction plus optional styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    direction: EdgeDirection,
    label: Option<String>,
    color: Option<Color>,
    style: Option<LineStyle>,
}

impl Link {
    pub fn new(direction: EdgeDirection) -> Self {
        Self {
            direction,
            label: None,
            color: None,
            style: None,
        }
    }

    pub fn forward() -> Self {
        Self::new(EdgeDirection::Forward)
    }

    pub fn backward() -> Self {
        Self::new(EdgeDirection::Backward)
    }

    pub fn undirected() -> Self {
        Self::new(EdgeDirection::Undirected)
    }

    pub fn bidirectional() -> Self {
        Self::new(EdgeDirection::Bidirectional)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn style(&self) -> Option<LineStyle> {
        self.style
    }
}

/// One edge statement: a start node followed by a chain of hops.
///
/// `a - b - c` is a single flow with two hops, and `a << b >> c` mixes
/// directions along the chain.
///
/// # Examples
///
/// ```
/// use cloudsketch_core::{identifier::Id, semantic::{EdgeDirection, Flow}};
///
/// let (handlers, s3, s3g) = (Id::new("handlers"), Id::new("s3"), Id::new("s3g"));
/// let flow = Flow::start(handlers).backward(s3).forward(s3g);
///
/// let hops: Vec<_> = flow.edges().map(|(from, link, to)| (from, link.direction(), to)).collect();
/// assert_eq!(hops, vec![
///     (handlers, EdgeDirection::Backward, s3),
///     (s3, EdgeDirection::Forward, s3g),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    start: Id,
    hops: Vec<(Link, Id)>,
}

impl Flow {
    /// Begins a flow at `node`. A flow needs at least one hop to draw anything.
    pub fn start(node: Id) -> Self {
        Self {
            start: node,
            hops: Vec::new(),
        }
    }

    /// Appends a hop to `node` using `link`.
    pub fn hop(mut self, link: Link, node: Id) -> Self {
        self.hops.push((link, node));
        self
    }

    pub fn forward(self, node: Id) -> Self {
        self.hop(Link::forward(), node)
    }

    pub fn backward(self, node: Id) -> Self {
        self.hop(Link::backward(), node)
    }

    pub fn undirected(self, node: Id) -> Self {
        self.hop(Link::undirected(), node)
    }

    pub fn bidirectional(self, node: Id) -> Self {
        self.hop(Link::bidirectional(), node)
    }

    pub fn start_node(&self) -> Id {
        self.start
    }

    pub fn hops(&self) -> &[(Link, Id)] {
        &self.hops
    }

    /// Number of edges the flow draws.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Every node the flow touches, in chain order.
    pub fn nodes(&self) -> impl Iterator<Item = Id> + '_ {
        std::iter::once(self.start).chain(self.hops.iter().map(|(_, node)| *node))
    }

    /// The flow's edges as `(from, link, to)`, in chain order.
    pub fn edges(&self) -> impl Iterator<Item = (Id, &Link, Id)> + '_ {
        self.nodes()
            .zip(self.hops.iter())
            .map(|(from, (link, to))| (from, link, *to))
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        for (link, node) in &self.hops {
            write!(f, " {} {}", link.direction(), node)?;
        }
        Ok(())
    }
}
