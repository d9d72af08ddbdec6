// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Summary panel for a single selected person

use crate::graph::SocialGraph;
use crate::highlight::HopRings;
use serde::Serialize;

/// Neighborhood statistics shown for one focal person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelStats {
    /// Focal node ID
    pub id: String,
    /// Focal display name
    pub name: String,
    /// Project entries, counted on the raw delimited list
    pub project_count: usize,
    /// Rank by weighted degree
    pub degree_rank: u32,
    /// Rank by betweenness
    pub betweenness_rank: u32,
    /// People within one hop
    pub within_one: usize,
    /// People within two hops
    pub within_two: usize,
    /// People within three hops
    pub within_three: usize,
}

impl PanelStats {
    /// Degree rank as displayed
    #[must_use]
    pub fn degree_rank_label(&self) -> String {
        format!("#{}", self.degree_rank)
    }

    /// Betweenness rank as displayed
    #[must_use]
    pub fn betweenness_rank_label(&self) -> String {
        format!("#{}", self.betweenness_rank)
    }
}

/// Build the panel for a focal node, or `None` for an unknown ID
#[must_use]
pub fn build_panel(graph: &SocialGraph, focal_id: &str) -> Option<PanelStats> {
    let node = graph.node(focal_id)?;
    let rings = HopRings::around(graph, focal_id)?;

    Some(PanelStats {
        id: node.id.clone(),
        name: node.name.clone(),
        project_count: node.project_count(),
        degree_rank: node.degree_rank,
        betweenness_rank: node.betweenness_rank,
        within_one: rings.within(1),
        within_two: rings.within(2),
        within_three: rings.within(3),
    })
}
