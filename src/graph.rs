// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph store: the immutable social graph with petgraph backing

use crate::error::GraphError;
use crate::types::{AttributeKey, AttributeValue, CentralityRange, Edge, Node, Position, BASE_COLOR, EDGE_COLOR};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

/// The social graph. Built once by [`SocialGraph::load`] and never mutated.
#[derive(Debug, Clone)]
pub struct SocialGraph {
    /// Undirected graph of node IDs weighted by relationship strength
    graph: UnGraph<String, f64>,
    /// Map from node ID to node index
    node_indices: HashMap<String, NodeIndex>,
    /// Node records, aligned with the petgraph node indices
    nodes: Vec<Node>,
    /// Accepted edges in input order
    edges: Vec<Edge>,
    /// Betweenness bounds over all nodes
    centrality: CentralityRange,
}

/// Sorted, de-duplicated choices for the selection widgets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Display names
    pub names: Vec<String>,
    /// Network type tokens
    pub types: Vec<String>,
    /// Project tokens
    pub projects: Vec<String>,
}

#[derive(Serialize)]
struct ExportNode<'a> {
    #[serde(flatten)]
    node: &'a Node,
    title: String,
    color: &'static str,
}

#[derive(Serialize)]
struct ExportEdge<'a> {
    from: &'a str,
    to: &'a str,
    weight: f64,
    color: &'static str,
}

#[derive(Serialize)]
struct GraphExport<'a> {
    generated_at: DateTime<Utc>,
    centrality: CentralityRange,
    nodes: Vec<ExportNode<'a>>,
    edges: Vec<ExportEdge<'a>>,
}

impl SocialGraph {
    /// Build the graph from typed nodes and edges.
    ///
    /// Fails if an identifier repeats or an edge names an unknown node. A
    /// repeated unordered pair keeps the first edge.
    pub fn load(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
        let mut node_indices = HashMap::with_capacity(nodes.len());

        for node in &nodes {
            if node_indices.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        let mut accepted = Vec::with_capacity(edges.len());
        for edge in edges {
            let endpoint = |id: &str| {
                node_indices
                    .get(id)
                    .copied()
                    .ok_or_else(|| GraphError::DanglingEdge {
                        source_id: edge.source.clone(),
                        target_id: edge.target.clone(),
                        missing: id.to_string(),
                    })
            };
            let from = endpoint(&edge.source)?;
            let to = endpoint(&edge.target)?;

            if graph.find_edge(from, to).is_some() {
                debug!("Ignoring repeated edge {} -- {}", edge.source, edge.target);
                continue;
            }

            graph.add_edge(from, to, edge.weight);
            accepted.push(edge);
        }

        let centrality = CentralityRange::from_values(nodes.iter().map(|n| n.betweenness));

        info!(
            "Loaded graph with {} nodes and {} edges",
            nodes.len(),
            accepted.len()
        );

        Ok(Self {
            graph,
            node_indices,
            nodes,
            edges: accepted,
            centrality,
        })
    }

    /// Index of a node ID
    #[must_use]
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Node record at an index obtained from this graph
    #[must_use]
    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.index()]
    }

    /// Neighbor indices of a node index
    pub(crate) fn neighbor_indices(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Union of the neighbors of every node in `frontier`
    #[must_use]
    pub(crate) fn expand(&self, frontier: &HashSet<NodeIndex>) -> HashSet<NodeIndex> {
        frontier
            .iter()
            .flat_map(|&idx| self.neighbor_indices(idx))
            .collect()
    }

    /// Direct neighbors of a node (empty for an unknown ID)
    #[must_use]
    pub fn neighbors(&self, id: &str) -> HashSet<&str> {
        self.index_of(id)
            .map(|idx| {
                self.neighbor_indices(idx)
                    .map(|n| self.node_at(n).id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get a node by ID
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| self.node_at(idx))
    }

    /// Read one attribute of a node
    #[must_use]
    pub fn attribute(&self, id: &str, key: AttributeKey) -> Option<AttributeValue<'_>> {
        self.node(id).map(|n| n.attribute(key))
    }

    /// Layout position of a node
    #[must_use]
    pub fn position(&self, id: &str) -> Option<Position> {
        self.node(id).map(|n| n.position)
    }

    /// All node IDs in load order
    pub fn all_node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// All nodes in load order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in load order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Betweenness bounds over all nodes
    #[must_use]
    pub fn centrality_range(&self) -> CentralityRange {
        self.centrality
    }

    /// First node, in load order, carrying a display name
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Choices offered by the name, type and project selectors
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        let names: BTreeSet<&str> = self.nodes.iter().map(|n| n.name.as_str()).collect();
        let types: BTreeSet<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.types.iter().map(String::as_str))
            .collect();
        let projects: BTreeSet<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.projects.iter().map(String::as_str))
            .collect();

        FilterOptions {
            names: names.into_iter().map(String::from).collect(),
            types: types.into_iter().map(String::from).collect(),
            projects: projects.into_iter().map(String::from).collect(),
        }
    }

    /// Export to DOT format for Graphviz (pinned positions, use `neato -n`)
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph social {\n");
        dot.push_str(&format!(
            "  node [shape=circle, style=filled, fillcolor=\"{BASE_COLOR}\"];\n"
        ));
        dot.push_str(&format!("  edge [color=\"{EDGE_COLOR}\"];\n\n"));

        for node in &self.nodes {
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", pos=\"{},{}!\"];\n",
                escape(&node.id),
                escape(&node.name),
                node.position.x,
                node.position.y
            ));
        }

        dot.push('\n');

        for edge in &self.edges {
            dot.push_str(&format!(
                "  \"{}\" -- \"{}\" [weight={}];\n",
                escape(&edge.source),
                escape(&edge.target),
                edge.weight
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Export nodes (with hover text) and edges to JSON
    pub fn to_json(&self) -> Result<String> {
        let export = GraphExport {
            generated_at: Utc::now(),
            centrality: self.centrality,
            nodes: self
                .nodes
                .iter()
                .map(|node| ExportNode {
                    node,
                    title: node.tooltip(),
                    color: BASE_COLOR,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| ExportEdge {
                    from: &e.source,
                    to: &e.target,
                    weight: e.weight,
                    color: EDGE_COLOR,
                })
                .collect(),
        };
        serde_json::to_string_pretty(&export).context("Failed to serialize graph to JSON")
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
