//! Graphviz source generation.
//!
//! [`DotExporter`] walks a [`TopologyGraph`] and produces a
//! [`dot_structures::Graph`], which is printed with `graphviz-rust`'s printer.
//!
//! Attribute precedence, lowest first: built-in defaults, values derived from
//! the diagram (title, direction, curve style), configured style, and finally
//! the attributes set on the canvas.

use std::path::{Path, PathBuf};

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode, NodeId, Stmt,
    Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, trace};

use cloudsketch_core::{
    catalog::Category,
    identifier::Id,
    semantic::{Attributes, Cluster, Diagram, Node},
};

use crate::{SketchError, config::StyleConfig, structure::TopologyGraph};

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";

const GRAPH_DEFAULTS: [(&str, &str); 6] = [
    ("pad", "2.0"),
    ("nodesep", "0.60"),
    ("ranksep", "0.75"),
    ("fontname", FONT_NAME),
    ("fontsize", "15"),
    ("fontcolor", FONT_COLOR),
];

const NODE_DEFAULTS: [(&str, &str); 10] = [
    ("shape", "box"),
    ("style", "rounded"),
    ("fixedsize", "true"),
    ("width", "1.4"),
    ("height", "1.4"),
    ("labelloc", "b"),
    ("imagescale", "true"),
    ("fontname", FONT_NAME),
    ("fontsize", "13"),
    ("fontcolor", FONT_COLOR),
];

const EDGE_DEFAULTS: [(&str, &str); 4] = [
    ("color", "#7B8894"),
    ("fontcolor", FONT_COLOR),
    ("fontname", FONT_NAME),
    ("fontsize", "13"),
];

const CLUSTER_DEFAULTS: [(&str, &str); 5] = [
    ("style", "rounded"),
    ("labeljust", "l"),
    ("pencolor", "#AEB6BE"),
    ("fontname", FONT_NAME),
    ("fontsize", "12"),
];

/// Height of an icon node with a single-line label; each extra line adds 0.4.
const ICON_NODE_HEIGHT: f64 = 1.9;
const LABEL_LINE_HEIGHT: f64 = 0.4;

/// Builds Graphviz source for one diagram.
pub struct DotExporter<'a> {
    diagram: &'a Diagram,
    graph: &'a TopologyGraph<'a>,
    style: &'a StyleConfig,
}

impl<'a> DotExporter<'a> {
    pub fn new(
        diagram: &'a Diagram,
        graph: &'a TopologyGraph<'a>,
        style: &'a StyleConfig,
    ) -> Self {
        Self {
            diagram,
            graph,
            style,
        }
    }

    /// Builds the Graphviz graph.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Config`] if the configured background color is invalid.
    pub fn build(&self) -> Result<Graph, SketchError> {
        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(self.graph_attributes()?)),
            Stmt::GAttribute(GraphAttributes::Node(to_attributes(&merged(
                &NODE_DEFAULTS,
                self.diagram.node_attrs(),
            )))),
            Stmt::GAttribute(GraphAttributes::Edge(to_attributes(&merged(
                &EDGE_DEFAULTS,
                self.diagram.edge_attrs(),
            )))),
        ];

        stmts.extend(
            self.graph
                .nodes()
                .filter(|node| node.cluster().is_none())
                .map(|node| self.node_stmt(node)),
        );

        stmts.extend(
            self.diagram
                .clusters()
                .iter()
                .filter(|cluster| cluster.parent().is_none())
                .map(|cluster| Stmt::Subgraph(self.cluster_subgraph(cluster))),
        );

        stmts.extend(self.graph.edges().iter().map(|edge| {
            let link = edge.link();
            let mut attrs = Attributes::new();
            attrs.insert("dir".to_string(), link.direction().dot_dir().to_string());
            if let Some(label) = link.label() {
                attrs.insert("label".to_string(), label.to_string());
            }
            if let Some(color) = link.color() {
                attrs.insert("color".to_string(), color.to_hex());
            }
            if let Some(style) = link.style() {
                attrs.insert("style".to_string(), style.as_str().to_string());
            }

            Stmt::Edge(Edge {
                ty: EdgeTy::Pair(vertex(edge.source()), vertex(edge.target())),
                attributes: to_attributes(&attrs),
            })
        }));

        debug!(statements = stmts.len(); "Graphviz graph built");

        Ok(Graph::DiGraph {
            id: quoted(self.diagram.title()),
            strict: self.diagram.is_strict(),
            stmts,
        })
    }

    /// Prints a graph as Graphviz source text.
    pub fn to_source(graph: &Graph) -> String {
        let source = graph.print(&mut PrinterContext::default());
        trace!(source = source.as_str(); "Graphviz source");
        source
    }

    fn graph_attributes(&self) -> Result<Vec<Attribute>, SketchError> {
        let mut attrs = merged(&GRAPH_DEFAULTS, &Attributes::new());
        attrs.insert("label".to_string(), self.diagram.title().to_string());
        attrs.insert(
            "rankdir".to_string(),
            self.diagram.direction().as_str().to_string(),
        );
        attrs.insert(
            "splines".to_string(),
            self.diagram.curve_style().as_str().to_string(),
        );

        if let Some(background) = self.style.background_color().map_err(SketchError::Config)? {
            attrs.insert("bgcolor".to_string(), background.to_hex());
        }

        for (name, value) in self.diagram.graph_attrs() {
            attrs.insert(name.clone(), value.clone());
        }

        Ok(to_attributes(&attrs))
    }

    fn node_stmt(&self, node: &Node) -> Stmt {
        let label = node.display_label(self.diagram.autolabel());
        let mut attrs = Attributes::new();

        match self.icon_for(node) {
            Some(icon) => {
                let extra_lines = label.matches('\n').count() as f64;
                attrs.insert("shape".to_string(), "none".to_string());
                attrs.insert("image".to_string(), icon.display().to_string());
                attrs.insert(
                    "height".to_string(),
                    format!("{:.1}", ICON_NODE_HEIGHT + LABEL_LINE_HEIGHT * extra_lines),
                );
            }
            None => {
                let category = node.kind().category();
                attrs.extend(fallback_attributes(category));
            }
        }
        attrs.insert("label".to_string(), label);

        Stmt::Node(DotNode {
            id: NodeId(plain(node.id()), None),
            attributes: to_attributes(&attrs),
        })
    }

    fn icon_for(&self, node: &Node) -> Option<PathBuf> {
        let icons_dir = self.style.icons_dir()?;
        let icon = node.kind().icon_path(icons_dir);
        if icon_exists(&icon) {
            Some(icon)
        } else {
            debug!(
                kind:% = node.kind(),
                path = icon.display().to_string();
                "Icon not found, using built-in shape"
            );
            None
        }
    }

    fn cluster_subgraph(&self, cluster: &Cluster) -> Subgraph {
        let mut attrs = Attributes::new();
        attrs.insert("label".to_string(), cluster.label().to_string());
        attrs.insert(
            "rankdir".to_string(),
            cluster.direction().as_str().to_string(),
        );
        attrs.extend(
            CLUSTER_DEFAULTS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        attrs.insert("bgcolor".to_string(), cluster.background().to_string());
        for (name, value) in cluster.attrs() {
            attrs.insert(name.clone(), value.clone());
        }

        let mut stmts = vec![Stmt::GAttribute(GraphAttributes::Graph(to_attributes(
            &attrs,
        )))];

        stmts.extend(
            cluster
                .members()
                .iter()
                .filter_map(|&member| self.graph.node(member))
                .map(|node| self.node_stmt(node)),
        );

        stmts.extend(
            self.diagram
                .clusters()
                .iter()
                .filter(|child| child.parent() == Some(cluster.id()))
                .map(|child| Stmt::Subgraph(self.cluster_subgraph(child))),
        );

        Subgraph {
            id: plain(cluster.id()),
            stmts,
        }
    }
}

fn icon_exists(path: &Path) -> bool {
    path.is_file()
}

fn fallback_attributes(category: Category) -> Attributes {
    let shape = category.fallback_shape();
    let style = if shape == "box" {
        "rounded,filled"
    } else {
        "filled"
    };

    [
        ("shape", shape),
        ("style", style),
        ("fixedsize", "false"),
        ("height", "0.9"),
        ("labelloc", "c"),
        ("fillcolor", category.fallback_fill()),
        ("fontcolor", "#FFFFFF"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

/// Defaults overlaid with `overrides`, keeping the defaults' order.
fn merged(defaults: &[(&str, &str)], overrides: &Attributes) -> Attributes {
    let mut attrs: Attributes = defaults
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    for (name, value) in overrides {
        attrs.insert(name.clone(), value.clone());
    }
    attrs
}

fn to_attributes(attrs: &Attributes) -> Vec<Attribute> {
    attrs
        .iter()
        .map(|(name, value)| Attribute(DotId::Plain(name.clone()), quoted(value)))
        .collect()
}

fn vertex(id: Id) -> Vertex {
    Vertex::N(NodeId(plain(id), None))
}

fn plain(id: Id) -> DotId {
    DotId::Plain(id.to_string())
}

/// A double-quoted Graphviz string, with quotes, backslashes, and newlines escaped.
fn quoted(value: &str) -> DotId {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    DotId::Escaped(format!("\"{escaped}\""))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use cloudsketch_core::{
        catalog::NodeKind,
        color::Color,
        semantic::{Canvas, Direction, Flow, LineStyle, Link},
    };

    use super::*;

    fn attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a str> {
        attrs.iter().find_map(|Attribute(key, value)| match (key, value) {
            (DotId::Plain(key), DotId::Escaped(value)) if key == name => Some(value.as_str()),
            _ => None,
        })
    }

    fn stmts(graph: &Graph) -> &[Stmt] {
        match graph {
            Graph::DiGraph { stmts, .. } | Graph::Graph { stmts, .. } => stmts,
        }
    }

    fn build(diagram: &Diagram, style: &StyleConfig) -> Graph {
        let topology = TopologyGraph::from_diagram(diagram).unwrap();
        DotExporter::new(diagram, &topology, style).build().unwrap()
    }

    fn sample() -> Diagram {
        let mut canvas =
            Canvas::new("Sample \"Quoted\" Title").with_direction(Direction::TopBottom);
        let client = canvas.node(NodeKind::Client, "Client");
        let store = canvas.cluster("Storage", |storage| {
            storage.node(NodeKind::SimpleStorageServiceS3, "Images\nBucket")
        });
        canvas.flow(Flow::start(client).hop(
            Link::backward()
                .with_label("download")
                .with_color(Color::new("red").unwrap())
                .with_style(LineStyle::Dotted),
            store,
        ));
        canvas.finish()
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(
            quoted("a \"b\"\nc\\d"),
            DotId::Escaped("\"a \\\"b\\\"\\nc\\\\d\"".to_string())
        );
    }

    #[test]
    fn test_graph_attributes() {
        let graph = build(&sample(), &StyleConfig::default());

        let Stmt::GAttribute(GraphAttributes::Graph(attrs)) = &stmts(&graph)[0] else {
            panic!("first statement should hold graph attributes");
        };
        assert_eq!(attr(attrs, "rankdir"), Some("\"TB\""));
        assert_eq!(attr(attrs, "splines"), Some("\"ortho\""));
        assert_eq!(attr(attrs, "pad"), Some("\"2.0\""));
        assert_eq!(attr(attrs, "label"), Some("\"Sample \\\"Quoted\\\" Title\""));
        assert_eq!(attr(attrs, "bgcolor"), None);
    }

    #[test]
    fn test_background_from_style() {
        let style = StyleConfig::new(Some("white".to_string()), None);
        let graph = build(&sample(), &style);

        let Stmt::GAttribute(GraphAttributes::Graph(attrs)) = &stmts(&graph)[0] else {
            panic!("first statement should hold graph attributes");
        };
        assert_eq!(attr(attrs, "bgcolor"), Some("\"#ffffff\""));
    }

    #[test]
    fn test_invalid_background_is_config_error() {
        let diagram = sample();
        let topology = TopologyGraph::from_diagram(&diagram).unwrap();
        let style = StyleConfig::new(Some("chartreuse-ish".to_string()), None);

        let err = DotExporter::new(&diagram, &topology, &style).build().unwrap_err();
        assert!(matches!(err, SketchError::Config(_)));
    }

    #[test]
    fn test_canvas_attributes_override_defaults() {
        let diagram = Canvas::new("Override")
            .with_graph_attr("pad", "0.2")
            .with_node_attr("fontsize", "9")
            .finish();
        let graph = build(&diagram, &StyleConfig::default());

        let Stmt::GAttribute(GraphAttributes::Graph(graph_attrs)) = &stmts(&graph)[0] else {
            panic!("expected graph attributes");
        };
        let Stmt::GAttribute(GraphAttributes::Node(node_attrs)) = &stmts(&graph)[1] else {
            panic!("expected node attributes");
        };
        assert_eq!(attr(graph_attrs, "pad"), Some("\"0.2\""));
        assert_eq!(attr(node_attrs, "fontsize"), Some("\"9\""));
        assert_eq!(attr(node_attrs, "shape"), Some("\"box\""));
    }

    #[test]
    fn test_clustered_node_lives_in_subgraph() {
        let graph = build(&sample(), &StyleConfig::default());

        let subgraph = stmts(&graph)
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Subgraph(subgraph) => Some(subgraph),
                _ => None,
            })
            .expect("cluster subgraph");
        assert_eq!(subgraph.id, DotId::Plain("cluster_0".to_string()));

        let Stmt::GAttribute(GraphAttributes::Graph(attrs)) = &subgraph.stmts[0] else {
            panic!("expected cluster attributes");
        };
        assert_eq!(attr(attrs, "label"), Some("\"Storage\""));
        assert_eq!(attr(attrs, "bgcolor"), Some("\"#E5F5FD\""));
        assert_eq!(attr(attrs, "pencolor"), Some("\"#AEB6BE\""));

        let clustered: Vec<&DotNode> = subgraph
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Node(node) => Some(node),
                _ => None,
            })
            .collect();
        assert_eq!(clustered.len(), 1);
        assert_eq!(attr(&clustered[0].attributes, "label"), Some("\"Images\\nBucket\""));

        let top_level_nodes = stmts(&graph)
            .iter()
            .filter(|stmt| matches!(stmt, Stmt::Node(_)))
            .count();
        assert_eq!(top_level_nodes, 1);
    }

    #[test]
    fn test_edge_attributes() {
        let graph = build(&sample(), &StyleConfig::default());

        let edge = stmts(&graph)
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Edge(edge) => Some(edge),
                _ => None,
            })
            .expect("edge statement");
        assert_eq!(attr(&edge.attributes, "dir"), Some("\"back\""));
        assert_eq!(attr(&edge.attributes, "label"), Some("\"download\""));
        assert_eq!(attr(&edge.attributes, "color"), Some("\"#ff0000\""));
        assert_eq!(attr(&edge.attributes, "style"), Some("\"dotted\""));
    }

    #[test]
    fn test_fallback_node_styling() {
        let graph = build(&sample(), &StyleConfig::default());

        let Some(Stmt::Node(client)) = stmts(&graph).iter().find(|s| matches!(s, Stmt::Node(_)))
        else {
            panic!("expected a top-level node");
        };
        assert_eq!(attr(&client.attributes, "shape"), Some("\"box\""));
        assert_eq!(attr(&client.attributes, "style"), Some("\"rounded,filled\""));
        assert_eq!(attr(&client.attributes, "image"), None);
    }

    #[test]
    fn test_icon_nodes_use_image() {
        let icons = tempfile::tempdir().unwrap();
        let icon: PathBuf = NodeKind::Client.icon_path(icons.path());
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();

        let style = StyleConfig::new(None, Some(icons.path().to_path_buf()));
        let graph = build(&sample(), &style);

        let Some(Stmt::Node(client)) = stmts(&graph).iter().find(|s| matches!(s, Stmt::Node(_)))
        else {
            panic!("expected a top-level node");
        };
        let expected_image = format!("\"{}\"", icon.display()).replace('\\', "\\\\");
        assert_eq!(attr(&client.attributes, "shape"), Some("\"none\""));
        assert_eq!(attr(&client.attributes, "height"), Some("\"1.9\""));
        assert_eq!(attr(&client.attributes, "image"), Some(expected_image.as_str()));
    }

    #[test]
    fn test_autolabel_grows_icon_height() {
        let icons = tempfile::tempdir().unwrap();
        let icon = NodeKind::Lambda.icon_path(icons.path());
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();

        let mut canvas = Canvas::new("Autolabel").with_autolabel(true);
        canvas.node(NodeKind::Lambda, "handler");
        let diagram = canvas.finish();
        let graph = build(&diagram, &StyleConfig::new(None, Some(icons.path().to_path_buf())));

        let Some(Stmt::Node(node)) = stmts(&graph).iter().find(|s| matches!(s, Stmt::Node(_)))
        else {
            panic!("expected a node");
        };
        assert_eq!(attr(&node.attributes, "label"), Some("\"Lambda\\nhandler\""));
        assert_eq!(attr(&node.attributes, "height"), Some("\"2.3\""));
    }

    #[test]
    fn test_source_is_parseable() {
        let mut canvas = Canvas::new("Parse Check");
        let dns = canvas.node(NodeKind::Route53, "DNS");
        let cdn = canvas.cluster("Edge", |edge| edge.node(NodeKind::CloudFront, "CDN"));
        canvas.flow(Flow::start(dns).undirected(cdn));
        let diagram = canvas.finish();

        let graph = build(&diagram, &StyleConfig::default());
        let source = DotExporter::to_source(&graph);

        assert!(source.contains("digraph"));
        assert!(source.contains("cluster_0"));
        assert!(graphviz_rust::parse(&source).is_ok(), "{source}");
    }
}
