//! Validated node/edge graph of a diagram.
//!
//! Flows are expanded into one [`TopologyEdge`] per hop, and every reference
//! a diagram makes is checked on the way in:
//! - each flow has at least one hop,
//! - every flow endpoint is a declared node,
//! - every cluster member is a declared node that belongs to that cluster only.
//!
//! Nodes keep their declaration order and edges keep statement order so the
//! exported Graphviz source is stable from run to run.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use cloudsketch_core::{
    identifier::Id,
    semantic::{Diagram, Link, Node},
};

use crate::SketchError;

/// One drawn edge: a single hop of a flow.
#[derive(Debug, Clone, Copy)]
pub struct TopologyEdge<'a> {
    source: Id,
    target: Id,
    link: &'a Link,
}

impl<'a> TopologyEdge<'a> {
    /// Node the edge is written from (left of the operator).
    pub fn source(&self) -> Id {
        self.source
    }

    /// Node the edge is written to (right of the operator).
    pub fn target(&self) -> Id {
        self.target
    }

    pub fn link(&self) -> &'a Link {
        self.link
    }
}

/// Validated graph of a diagram's nodes and expanded edges.
#[derive(Debug)]
pub struct TopologyGraph<'a> {
    nodes: IndexMap<Id, &'a Node>,
    edges: Vec<TopologyEdge<'a>>,
}

impl<'a> TopologyGraph<'a> {
    /// Builds and validates the graph for `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Graph`] when a flow is empty or references an
    /// undeclared node, or when cluster membership is inconsistent.
    pub fn from_diagram(diagram: &'a Diagram) -> Result<Self, SketchError> {
        let mut graph = Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
        };

        for node in diagram.nodes() {
            if graph.nodes.insert(node.id(), node).is_some() {
                return Err(SketchError::Graph(format!(
                    "node `{}` is declared more than once",
                    node.id()
                )));
            }
        }

        graph.check_clusters(diagram)?;

        for (statement, flow) in diagram.flows().iter().enumerate() {
            if flow.is_empty() {
                return Err(SketchError::Graph(format!(
                    "flow #{statement} starting at `{}` has no hops",
                    flow.start_node()
                )));
            }
            for (source, link, target) in flow.edges() {
                graph.check_endpoint(source, statement)?;
                graph.check_endpoint(target, statement)?;
                graph.edges.push(TopologyEdge {
                    source,
                    target,
                    link,
                });
            }
        }

        debug!(
            nodes = graph.nodes_count(),
            edges = graph.edges_count(),
            statements = diagram.flows().len();
            "Topology graph built"
        );
        Ok(graph)
    }

    fn check_endpoint(&self, id: Id, statement: usize) -> Result<(), SketchError> {
        if self.contains_node(id) {
            Ok(())
        } else {
            Err(SketchError::Graph(format!(
                "flow #{statement} references undeclared node `{id}`"
            )))
        }
    }

    fn check_clusters(&self, diagram: &Diagram) -> Result<(), SketchError> {
        let mut owners: HashMap<Id, Id> = HashMap::new();

        for cluster in diagram.clusters() {
            if let Some(parent) = cluster.parent() {
                if diagram.cluster(parent).is_none() {
                    return Err(SketchError::Graph(format!(
                        "cluster `{}` has unknown parent `{parent}`",
                        cluster.label()
                    )));
                }
            }

            for &member in cluster.members() {
                let Some(node) = self.node(member) else {
                    return Err(SketchError::Graph(format!(
                        "cluster `{}` contains undeclared node `{member}`",
                        cluster.label()
                    )));
                };
                if let Some(previous) = owners.insert(member, cluster.id()) {
                    return Err(SketchError::Graph(format!(
                        "node `{node}` belongs to clusters `{previous}` and `{}`",
                        cluster.id()
                    )));
                }
                if node.cluster() != Some(cluster.id()) {
                    return Err(SketchError::Graph(format!(
                        "node `{node}` is listed in cluster `{}` but declared elsewhere",
                        cluster.label()
                    )));
                }
            }
        }

        trace!(clustered_nodes = owners.len(); "Cluster membership checked");
        Ok(())
    }

    /// Returns the node for `id`, if declared.
    pub fn node(&self, id: Id) -> Option<&'a Node> {
        self.nodes.get(&id).copied()
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.values().copied()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Edges in statement order, hops of one statement in chain order.
    pub fn edges(&self) -> &[TopologyEdge<'a>] {
        &self.edges
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use cloudsketch_core::{
        catalog::NodeKind,
        semantic::{Canvas, EdgeDirection, Flow},
    };

    use super::*;

    fn three_tier() -> (Diagram, [Id; 3]) {
        let mut canvas = Canvas::new("Three Tier");
        let lb = canvas.node(NodeKind::ElasticLoadBalancing, "lb");
        let (web, db) = canvas.cluster("App", |app| {
            (app.node(NodeKind::Ec2, "web"), app.node(NodeKind::Rds, "db"))
        });
        canvas.flow(Flow::start(lb).forward(web).undirected(db));
        (canvas.finish(), [lb, web, db])
    }

    #[test]
    fn test_from_diagram_expands_flows() {
        let (diagram, [lb, web, db]) = three_tier();
        let graph = TopologyGraph::from_diagram(&diagram).unwrap();

        assert_eq!(graph.nodes_count(), 3);
        assert_eq!(graph.edges_count(), 2);

        let edges: Vec<(Id, Id, EdgeDirection)> = graph
            .edges()
            .iter()
            .map(|e| (e.source(), e.target(), e.link().direction()))
            .collect();
        assert_eq!(
            edges,
            vec![
                (lb, web, EdgeDirection::Forward),
                (web, db, EdgeDirection::Undirected),
            ]
        );
    }

    #[test]
    fn test_nodes_keep_declaration_order() {
        let (diagram, ids) = three_tier();
        let graph = TopologyGraph::from_diagram(&diagram).unwrap();

        let order: Vec<Id> = graph.nodes().map(Node::id).collect();
        assert_eq!(order, ids.to_vec());
    }

    #[test]
    fn test_empty_flow_is_rejected() {
        let mut canvas = Canvas::new("Empty Flow");
        let lonely = canvas.node(NodeKind::Client, "lonely");
        canvas.flow(Flow::start(lonely));
        let diagram = canvas.finish();

        let err = TopologyGraph::from_diagram(&diagram).unwrap_err();
        assert!(matches!(err, SketchError::Graph(msg) if msg.contains("has no hops")));
    }

    #[test]
    fn test_undeclared_endpoint_is_rejected() {
        let mut canvas = Canvas::new("Dangling");
        let client = canvas.node(NodeKind::Client, "client");
        canvas.flow(Flow::start(client).forward(Id::new("ghost")));
        let diagram = canvas.finish();

        let err = TopologyGraph::from_diagram(&diagram).unwrap_err();
        assert!(matches!(err, SketchError::Graph(msg) if msg.contains("`ghost`")));
    }

    #[test]
    fn test_self_loop_is_allowed() {
        let mut canvas = Canvas::new("Loop");
        let worker = canvas.node(NodeKind::Lambda, "worker");
        canvas.flow(Flow::start(worker).forward(worker));
        let diagram = canvas.finish();

        let graph = TopologyGraph::from_diagram(&diagram).unwrap();
        assert_eq!(graph.edges_count(), 1);
        assert_eq!(graph.edges()[0].source(), graph.edges()[0].target());
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut canvas = Canvas::new("Parallel");
        let a = canvas.node(NodeKind::SimpleStorageServiceS3, "a");
        let b = canvas.node(NodeKind::S3Glacier, "b");
        canvas
            .flow(Flow::start(a).forward(b))
            .flow(Flow::start(a).backward(b));
        let diagram = canvas.finish();

        let graph = TopologyGraph::from_diagram(&diagram).unwrap();
        let edges: Vec<(Id, EdgeDirection, Id)> = graph
            .edges()
            .iter()
            .map(|e| (e.source(), e.link().direction(), e.target()))
            .collect();
        assert_eq!(
            edges,
            vec![(a, EdgeDirection::Forward, b), (a, EdgeDirection::Backward, b)]
        );
    }
}
