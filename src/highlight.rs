// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Neighborhood highlighting - hop-distance coloring around focal people

use crate::graph::SocialGraph;
use crate::types::{HopLevel, Palette, MAX_FOCAL_NODES};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Nodes one, two and three hops away from a focal node.
///
/// The rings are disjoint and never contain the focal node, except that a
/// self-loop puts the focal node in its own first ring.
#[derive(Debug, Clone)]
pub struct HopRings<'g> {
    graph: &'g SocialGraph,
    focal: NodeIndex,
    one: HashSet<NodeIndex>,
    two: HashSet<NodeIndex>,
    three: HashSet<NodeIndex>,
}

impl<'g> HopRings<'g> {
    /// Compute the rings around a node, or `None` for an unknown ID
    #[must_use]
    pub fn around(graph: &'g SocialGraph, id: &str) -> Option<Self> {
        graph.index_of(id).map(|idx| Self::around_index(graph, idx))
    }

    fn around_index(graph: &'g SocialGraph, focal: NodeIndex) -> Self {
        let one: HashSet<NodeIndex> = graph.neighbor_indices(focal).collect();

        let mut two = graph.expand(&one);
        two.retain(|n| *n != focal && !one.contains(n));

        let mut three = graph.expand(&two);
        three.retain(|n| *n != focal && !one.contains(n) && !two.contains(n));

        Self {
            graph,
            focal,
            one,
            two,
            three,
        }
    }

    fn ring_indices(&self, level: HopLevel) -> Option<&HashSet<NodeIndex>> {
        match level {
            HopLevel::Focal => None,
            HopLevel::One => Some(&self.one),
            HopLevel::Two => Some(&self.two),
            HopLevel::Three => Some(&self.three),
        }
    }

    /// The focal node's ID
    #[must_use]
    pub fn focal_id(&self) -> &'g str {
        &self.graph.node_at(self.focal).id
    }

    /// IDs exactly `level` hops away, sorted
    #[must_use]
    pub fn ring(&self, level: HopLevel) -> BTreeSet<&'g str> {
        match self.ring_indices(level) {
            Some(ring) => ring
                .iter()
                .map(|&idx| self.graph.node_at(idx).id.as_str())
                .collect(),
            None => BTreeSet::from([self.focal_id()]),
        }
    }

    /// Size of the union of the rings up to `hops` (capped at 3)
    #[must_use]
    pub fn within(&self, hops: usize) -> usize {
        [&self.one, &self.two, &self.three]
            .into_iter()
            .take(hops)
            .map(HashSet::len)
            .sum()
    }
}

/// Highlight assigned to one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Render color
    pub color: &'static str,
    /// Distance from the focal node that claimed this node
    pub level: HopLevel,
    /// Selection slot of that focal node (0 or 1)
    pub slot: usize,
}

/// Highlight per node ID. Nodes absent from the map are not highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HighlightMap {
    entries: HashMap<String, Highlight>,
}

impl HighlightMap {
    /// Highlight of a node
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Highlight> {
        self.entries.get(id)
    }

    /// Color of a node, if highlighted
    #[must_use]
    pub fn color(&self, id: &str) -> Option<&'static str> {
        self.get(id).map(|h| h.color)
    }

    /// Number of highlighted nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is highlighted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over highlighted nodes (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Highlight)> {
        self.entries.iter().map(|(id, h)| (id.as_str(), h))
    }

    fn claim(&mut self, id: &str, highlight: Highlight) {
        self.entries.entry(id.to_string()).or_insert(highlight);
    }

    fn force(&mut self, id: &str, highlight: Highlight) {
        self.entries.insert(id.to_string(), highlight);
    }
}

/// Highlight around focal node IDs, using the palette of each position
#[must_use]
pub fn highlight(graph: &SocialGraph, focal_nodes: &[&str]) -> HighlightMap {
    let slots: Vec<Option<&str>> = focal_nodes.iter().copied().map(Some).collect();
    highlight_slots(graph, &slots)
}

/// Highlight around selection slots.
///
/// Slot `i` always uses the palette of slot `i`, so an empty first slot does
/// not shift the second focal node onto the first palette. Focal nodes take
/// their level-0 color unconditionally; every other node keeps the first
/// color it was given.
#[must_use]
pub fn highlight_slots(graph: &SocialGraph, slots: &[Option<&str>]) -> HighlightMap {
    let mut map = HighlightMap::default();

    for (slot, id) in slots.iter().take(MAX_FOCAL_NODES).enumerate() {
        let Some(id) = id else { continue };
        let Some(rings) = HopRings::around(graph, id) else {
            warn!("Focal node {} is not in the graph", id);
            continue;
        };
        let palette = Palette::for_slot(slot);
        let mark = |level: HopLevel| Highlight {
            color: palette.color(level),
            level,
            slot,
        };

        map.force(id, mark(HopLevel::Focal));

        for level in [HopLevel::One, HopLevel::Two, HopLevel::Three] {
            for member in rings.ring(level) {
                map.claim(member, mark(level));
            }
        }

        debug!(
            "Focal {} (slot {}): {} / {} / {} nodes at 1 / 2 / 3 hops",
            id,
            slot,
            rings.one.len(),
            rings.two.len(),
            rings.three.len()
        );
    }

    map
}
