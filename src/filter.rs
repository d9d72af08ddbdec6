// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Filter evaluation - which people and relationships are eligible for rendering

use crate::graph::SocialGraph;
use crate::types::{Edge, FilterCriteria, Node};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Nodes that passed the filter, in graph order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleNodes<'g> {
    ids: Vec<&'g str>,
    members: HashSet<&'g str>,
}

impl<'g> VisibleNodes<'g> {
    /// Is this node visible?
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Is this edge visible? Both endpoints must be.
    #[must_use]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.contains(&edge.source) && self.contains(&edge.target)
    }

    /// Visible IDs in graph order
    pub fn ids(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.ids.iter().copied()
    }

    /// Number of visible nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The type condition: no type selected, or the node carries one of them
#[must_use]
pub fn matches_types(node: &Node, selected_types: &BTreeSet<String>) -> bool {
    selected_types.is_empty() || !node.types.is_disjoint(selected_types)
}

/// Compute the visible node set.
///
/// Visibility depends only on `selected_types`. Name and project selections
/// drive highlighting, not visibility, and `filter_logic` has no effect.
#[must_use]
pub fn visible_nodes<'g>(graph: &'g SocialGraph, criteria: &FilterCriteria) -> VisibleNodes<'g> {
    let ids: Vec<&str> = graph
        .nodes()
        .iter()
        .filter(|n| matches_types(n, &criteria.selected_types))
        .map(|n| n.id.as_str())
        .collect();

    debug!(
        "Filter ({} logic, {} types) keeps {}/{} nodes",
        criteria.filter_logic,
        criteria.selected_types.len(),
        ids.len(),
        graph.node_count()
    );

    let members = ids.iter().copied().collect();
    VisibleNodes { ids, members }
}

/// Edges whose endpoints are both visible, in graph order
#[must_use]
pub fn visible_edges<'g>(graph: &'g SocialGraph, visible: &VisibleNodes<'_>) -> Vec<&'g Edge> {
    graph
        .edges()
        .iter()
        .filter(|e| visible.contains_edge(e))
        .collect()
}
