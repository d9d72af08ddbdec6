// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Scene building - the drawable node and edge lists

use crate::filter::{visible_edges, VisibleNodes};
use crate::graph::SocialGraph;
use crate::highlight::HighlightMap;
use crate::types::{
    CentralityRange, Node, Position, BASE_COLOR, MAX_NODE_SIZE, MIN_NODE_SIZE,
    PROJECT_HIGHLIGHT_COLOR,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// A node ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    /// Node identifier, echoed back on click
    pub id: String,
    /// Layout position
    pub position: Position,
    /// Marker size
    pub size: f64,
    /// Fill color
    pub color: &'static str,
    /// Hover text
    pub tooltip: String,
}

/// An edge ready to draw as a straight line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    /// One endpoint ID
    pub source: String,
    /// The other endpoint ID
    pub target: String,
    /// Position of `source`
    pub from: Position,
    /// Position of `target`
    pub to: Position,
}

/// Everything the renderer draws, in draw order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    /// Nodes, later entries drawn on top
    pub nodes: Vec<RenderNode>,
    /// Edges
    pub edges: Vec<RenderEdge>,
    /// Position of each node ID in `nodes`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Scene {
    /// Find a rendered node
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.index.get(id).and_then(|&i| self.nodes.get(i))
    }

    /// Is this node on screen?
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

/// Map a betweenness score linearly onto the marker size range.
///
/// A degenerate range gives every node the minimum size.
#[must_use]
pub fn normalize_size(value: f64, range: CentralityRange) -> f64 {
    if range.is_degenerate() {
        return MIN_NODE_SIZE;
    }
    MIN_NODE_SIZE + (value - range.min) / (range.max - range.min) * (MAX_NODE_SIZE - MIN_NODE_SIZE)
}

/// Fill color: project highlight, then hop highlight, then the base color
#[must_use]
pub fn node_color(
    node: &Node,
    highlight: &HighlightMap,
    project_filter: &BTreeSet<String>,
) -> &'static str {
    if !node.projects.is_disjoint(project_filter) {
        return PROJECT_HIGHLIGHT_COLOR;
    }
    highlight.color(&node.id).unwrap_or(BASE_COLOR)
}

/// Build the scene from the visible set and the highlight map
#[must_use]
pub fn build_scene(
    graph: &SocialGraph,
    visible: &VisibleNodes<'_>,
    highlight: &HighlightMap,
    project_filter: &BTreeSet<String>,
) -> Scene {
    let range = graph.centrality_range();

    let nodes: Vec<RenderNode> = visible
        .ids()
        .filter_map(|id| graph.node(id))
        .map(|node| RenderNode {
            id: node.id.clone(),
            position: node.position,
            size: normalize_size(node.betweenness, range),
            color: node_color(node, highlight, project_filter),
            tooltip: node.tooltip(),
        })
        .collect();

    let edges = visible_edges(graph, visible)
        .into_iter()
        .filter_map(|edge| {
            Some(RenderEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                from: graph.position(&edge.source)?,
                to: graph.position(&edge.target)?,
            })
        })
        .collect();

    let index = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    Scene {
        nodes,
        edges,
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::visible_nodes;
    use crate::highlight::highlight;
    use crate::types::{Edge, FilterCriteria, Palette};

    fn graph(betweenness: &[f64]) -> SocialGraph {
        let nodes = betweenness
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Node::new(format!("n{i}"), format!("Person {i}"), Position::new(i as f64, 0.0))
                    .with_betweenness(*b)
            })
            .collect();
        SocialGraph::load(nodes, vec![Edge::new("n0", "n1", 1.0)]).unwrap()
    }

    fn no_projects() -> BTreeSet<String> {
        BTreeSet::new()
    }

    #[test]
    fn test_size_linear_mapping() {
        let range = CentralityRange { min: 0.0, max: 1.0 };

        assert_eq!(normalize_size(0.0, range), 8.0);
        assert_eq!(normalize_size(1.0, range), 30.0);
        assert_eq!(normalize_size(0.5, range), 19.0);
    }

    #[test]
    fn test_degenerate_range_uses_floor() {
        let graph = graph(&[0.3, 0.3, 0.3]);
        let visible = visible_nodes(&graph, &FilterCriteria::default());
        let scene = build_scene(&graph, &visible, &HighlightMap::default(), &no_projects());

        assert!(scene.nodes.iter().all(|n| n.size == 8.0));
    }

    #[test]
    fn test_default_colors_and_edges() {
        let graph = graph(&[0.0, 1.0, 0.5]);
        let visible = visible_nodes(&graph, &FilterCriteria::default());
        let scene = build_scene(&graph, &visible, &HighlightMap::default(), &no_projects());

        assert_eq!(scene.nodes.len(), 3);
        assert!(scene.nodes.iter().all(|n| n.color == BASE_COLOR));
        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.edges[0].from, Position::new(0.0, 0.0));
        assert_eq!(scene.edges[0].to, Position::new(1.0, 0.0));
    }

    #[test]
    fn test_highlight_and_project_precedence() {
        let nodes = vec![
            Node::new("a", "Ana", Position::default()),
            Node::new("b", "Bia", Position::default()).with_projects("X;Y"),
            Node::new("d", "Davi", Position::default()).with_projects("X"),
        ];
        let graph = SocialGraph::load(nodes, vec![Edge::new("a", "b", 1.0)]).unwrap();
        let visible = visible_nodes(&graph, &FilterCriteria::default());
        let map = highlight(&graph, &["a"]);
        let projects = BTreeSet::from(["X".to_string()]);

        let scene = build_scene(&graph, &visible, &map, &projects);

        assert_eq!(scene.node("a").unwrap().color, Palette::PRIMARY.levels[0]);
        assert_eq!(scene.node("b").unwrap().color, PROJECT_HIGHLIGHT_COLOR);
        assert_eq!(scene.node("d").unwrap().color, PROJECT_HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_build_is_repeatable() {
        let graph = graph(&[0.0, 1.0, 0.5]);
        let visible = visible_nodes(&graph, &FilterCriteria::default());
        let map = highlight(&graph, &["n0"]);

        let first = build_scene(&graph, &visible, &map, &no_projects());
        let second = build_scene(&graph, &visible, &map, &no_projects());
        assert_eq!(first, second);
    }

    #[test]
    fn test_tooltip_text() {
        let mut node = Node::new("p1", "Ana", Position::default()).with_betweenness(0.25);
        node.weighted_degree = 12.0;
        node.degree_rank = 4;
        node.betweenness_rank = 2;

        insta::assert_snapshot!(
            node.tooltip(),
            @"Ana<br>Code: p1<br>Degree: 12.0 (Rank 4)<br>Betweenness: 0.2500 (Rank 2)"
        );
    }

    #[test]
    fn test_scene_lookup_follows_visibility() {
        let graph = graph(&[0.1, 0.2, 0.3]);
        let criteria = FilterCriteria::default();
        let scene = build_scene(
            &graph,
            &visible_nodes(&graph, &criteria),
            &highlight(&graph, &[]),
            &BTreeSet::new(),
        );

        assert!(scene.contains("n2"));
        assert_eq!(scene.node("n1").map(|n| n.position), Some(Position::new(1.0, 0.0)));
        assert!(!scene.contains("ghost"));
        assert!(scene.node("ghost").is_none());
        assert!(!Scene::default().contains("n0"));
    }
}
