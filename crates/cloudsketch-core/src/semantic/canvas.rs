//! Scoped builder for diagrams.
//!
//! A [`Canvas`] is opened with a title, receives node, cluster, and flow
//! declarations in order, and is closed with [`Canvas::finish`], which hands
//! back the immutable [`Diagram`]. Clusters are scopes too: nodes declared
//! inside the closure given to [`Canvas::cluster`] join that cluster.
//!
//! # Examples
//!
//! ```
//! use cloudsketch_core::{catalog::NodeKind, semantic::{Canvas, Flow}};
//!
//! let mut canvas = Canvas::new("Web Service");
//! let lb = canvas.node(NodeKind::ElasticLoadBalancing, "lb");
//! let (web, db) = canvas.cluster("Private Subnet", |subnet| {
//!     (subnet.node(NodeKind::Ec2, "web"), subnet.node(NodeKind::Rds, "db"))
//! });
//! canvas.flow(Flow::start(lb).forward(web).forward(db));
//!
//! let diagram = canvas.finish();
//! assert_eq!(diagram.nodes().len(), 3);
//! assert_eq!(diagram.clusters()[0].members(), &[web, db]);
//! assert_eq!(diagram.edge_count(), 2);
//! ```

use log::{debug, info};

use crate::{
    catalog::NodeKind,
    identifier::Id,
    semantic::{
        diagram::{CurveStyle, Diagram, Direction, OutputFormat},
        element::{Cluster, ClusterOptions, Flow, Node},
    },
};

/// An open diagram scope collecting declarations.
#[derive(Debug)]
pub struct Canvas {
    diagram: Diagram,
    /// Indices into `diagram.clusters` of the clusters currently open, innermost last.
    open_clusters: Vec<usize>,
}

impl Canvas {
    /// Opens a canvas titled `title`.
    ///
    /// The output file name defaults to the title with whitespace replaced by
    /// `_`, lower-cased.
    pub fn new(title: impl Into<String>) -> Self {
        let diagram = Diagram::new(title.into());
        debug!(title = diagram.title(), filename = diagram.filename(); "Opened canvas");
        Self {
            diagram,
            open_clusters: Vec::new(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.diagram.direction = direction;
        self
    }

    pub fn with_curve_style(mut self, curve_style: CurveStyle) -> Self {
        self.diagram.curve_style = curve_style;
        self
    }

    /// Replaces the output formats. An empty list keeps the current formats.
    pub fn with_output_formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        let formats: Vec<OutputFormat> = formats.into_iter().collect();
        if !formats.is_empty() {
            self.diagram.output_formats = formats;
        }
        self
    }

    /// Overrides the output file stem derived from the title.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.diagram.filename = filename.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.diagram.strict = strict;
        self
    }

    pub fn with_autolabel(mut self, autolabel: bool) -> Self {
        self.diagram.autolabel = autolabel;
        self
    }

    pub fn with_graph_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.diagram.graph_attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_node_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.diagram.node_attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_edge_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.diagram.edge_attrs.insert(name.into(), value.into());
        self
    }

    /// Declares a node and returns its handle.
    ///
    /// The node joins the innermost open cluster, if any.
    pub fn node(&mut self, kind: NodeKind, label: impl Into<String>) -> Id {
        let id = Id::indexed("node", self.diagram.nodes.len());
        let label = label.into();

        let cluster = self.open_clusters.last().map(|&idx| {
            let cluster = &mut self.diagram.clusters[idx];
            cluster.add_member(id);
            cluster.id()
        });

        debug!(
            id:% = id,
            kind:% = kind,
            label = label.as_str(),
            cluster:? = cluster.map(|c| c.to_string());
            "Declared node"
        );
        self.diagram.nodes.push(Node::new(id, kind, label, cluster));
        id
    }

    /// Opens a cluster labeled `label` for the duration of `scope`.
    ///
    /// Returns whatever `scope` returns, typically the handles of the nodes
    /// declared inside.
    pub fn cluster<R>(
        &mut self,
        label: impl Into<String>,
        scope: impl FnOnce(&mut Canvas) -> R,
    ) -> R {
        self.cluster_with(ClusterOptions::new(label), scope)
    }

    /// Opens a cluster with explicit [`ClusterOptions`] for the duration of `scope`.
    pub fn cluster_with<R>(
        &mut self,
        options: ClusterOptions,
        scope: impl FnOnce(&mut Canvas) -> R,
    ) -> R {
        let id = Id::indexed("cluster", self.diagram.clusters.len());
        let depth = self.open_clusters.len();
        let parent = self
            .open_clusters
            .last()
            .map(|&idx| self.diagram.clusters[idx].id());

        let cluster = Cluster::new(id, options, depth, parent);
        debug!(id:% = id, label = cluster.label(), depth = depth; "Opened cluster");

        self.diagram.clusters.push(cluster);
        self.open_clusters.push(self.diagram.clusters.len() - 1);

        let result = scope(self);

        self.open_clusters.pop();
        debug!(id:% = id; "Closed cluster");
        result
    }

    /// Records an edge statement.
    pub fn flow(&mut self, flow: Flow) -> &mut Self {
        debug!(flow:% = flow; "Declared flow");
        self.diagram.flows.push(flow);
        self
    }

    /// Closes the canvas and returns the finished diagram.
    pub fn finish(self) -> Diagram {
        info!(
            title = self.diagram.title(),
            nodes = self.diagram.nodes.len(),
            clusters = self.diagram.clusters.len(),
            flows = self.diagram.flows.len();
            "Canvas finished"
        );
        self.diagram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::EdgeDirection;

    #[test]
    fn test_nodes_get_sequential_ids() {
        let mut canvas = Canvas::new("Sequential");
        let first = canvas.node(NodeKind::Client, "a");
        let second = canvas.node(NodeKind::Client, "b");
        let diagram = canvas.finish();

        assert_eq!(first, "node_0");
        assert_eq!(second, "node_1");
        assert_eq!(diagram.node(second).map(Node::label), Some("b"));
    }

    #[test]
    fn test_node_outside_cluster_has_no_cluster() {
        let mut canvas = Canvas::new("Flat");
        let client = canvas.node(NodeKind::Client, "Client");
        let diagram = canvas.finish();

        assert_eq!(diagram.node(client).and_then(Node::cluster), None);
        assert!(diagram.clusters().is_empty());
    }

    #[test]
    fn test_cluster_membership() {
        let mut canvas = Canvas::new("Clustered");
        let outside = canvas.node(NodeKind::Users, "users");
        let (inside_a, inside_b) = canvas.cluster("VPC", |vpc| {
            (vpc.node(NodeKind::Lambda, "fn"), vpc.node(NodeKind::Dynamodb, "table"))
        });
        let after = canvas.node(NodeKind::Route53, "dns");
        let diagram = canvas.finish();

        let cluster = &diagram.clusters()[0];
        assert_eq!(cluster.label(), "VPC");
        assert_eq!(cluster.depth(), 0);
        assert_eq!(cluster.parent(), None);
        assert_eq!(cluster.members(), &[inside_a, inside_b]);
        assert_eq!(diagram.node(inside_a).and_then(Node::cluster), Some(cluster.id()));
        assert_eq!(diagram.node(outside).and_then(Node::cluster), None);
        assert_eq!(diagram.node(after).and_then(Node::cluster), None);
    }

    #[test]
    fn test_nested_clusters() {
        let mut canvas = Canvas::new("Nested");
        let (outer_node, inner_node) = canvas.cluster("Region", |region| {
            let outer_node = region.node(NodeKind::ElasticLoadBalancing, "lb");
            let inner_node = region.cluster("Subnet", |subnet| subnet.node(NodeKind::Ec2, "web"));
            (outer_node, inner_node)
        });
        let diagram = canvas.finish();

        let region = &diagram.clusters()[0];
        let subnet = &diagram.clusters()[1];
        assert_eq!(region.members(), &[outer_node]);
        assert_eq!(subnet.members(), &[inner_node]);
        assert_eq!(subnet.depth(), 1);
        assert_eq!(subnet.parent(), Some(region.id()));
        assert_eq!(subnet.background(), "#EBF3E7");
    }

    #[test]
    fn test_builder_settings() {
        let diagram = Canvas::new("Settings Test")
            .with_direction(Direction::TopBottom)
            .with_curve_style(CurveStyle::Curved)
            .with_output_formats([OutputFormat::Svg, OutputFormat::Png])
            .with_filename("custom")
            .with_strict(true)
            .with_autolabel(true)
            .with_graph_attr("pad", "0.5")
            .with_node_attr("fontsize", "10")
            .with_edge_attr("color", "#000000")
            .finish();

        assert_eq!(diagram.direction(), Direction::TopBottom);
        assert_eq!(diagram.curve_style(), CurveStyle::Curved);
        assert_eq!(diagram.output_file_names(), vec!["custom.svg", "custom.png"]);
        assert!(diagram.is_strict());
        assert!(diagram.autolabel());
        assert_eq!(diagram.graph_attrs().get("pad").map(String::as_str), Some("0.5"));
        assert_eq!(diagram.node_attrs().len(), 1);
        assert_eq!(diagram.edge_attrs().len(), 1);
    }

    #[test]
    fn test_empty_output_formats_keep_default() {
        let diagram = Canvas::new("Keep")
            .with_output_formats(Vec::<OutputFormat>::new())
            .finish();
        assert_eq!(diagram.output_formats(), &[OutputFormat::Png]);
    }

    #[test]
    fn test_flows_are_recorded_in_order() {
        let mut canvas = Canvas::new("Flows");
        let a = canvas.node(NodeKind::Client, "a");
        let b = canvas.node(NodeKind::Route53, "b");
        let c = canvas.node(NodeKind::CloudFront, "c");
        canvas
            .flow(Flow::start(a).forward(b))
            .flow(Flow::start(b).backward(c).undirected(a));
        let diagram = canvas.finish();

        assert_eq!(diagram.flows().len(), 2);
        assert_eq!(diagram.edge_count(), 3);
        assert_eq!(
            diagram.flows()[1].hops()[0].0.direction(),
            EdgeDirection::Backward
        );
    }
}
