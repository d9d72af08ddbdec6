// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Recomputation entry points and the interaction session
//!
//! [`recompute`] is a pure function of the graph and the criteria. The
//! [`Session`] wraps it for an interactive front end: it keeps the frame on
//! screen, leaves that frame untouched when a recomputation fails, and
//! answers clicks against what is actually displayed.

use crate::error::GraphError;
use crate::filter::visible_nodes;
use crate::graph::SocialGraph;
use crate::highlight::highlight_slots;
use crate::panel::{build_panel, PanelStats};
use crate::scene::{build_scene, Scene};
use crate::types::{FilterCriteria, MAX_FOCAL_NODES};
use serde::Serialize;
use tracing::{debug, warn};

/// Result of one recomputation
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Frame {
    /// Drawable scene
    pub scene: Scene,
    /// Summary panel, present only for a single resolved selection
    pub panel: Option<PanelStats>,
}

/// Resolve selected display names to node IDs, slot by slot.
///
/// A name that matches nobody leaves its slot empty.
#[must_use]
pub fn resolve_focal<'g>(graph: &'g SocialGraph, names: &[String]) -> Vec<Option<&'g str>> {
    names
        .iter()
        .map(|name| match graph.find_by_name(name) {
            Some(node) => Some(node.id.as_str()),
            None => {
                warn!("{}; ignoring selection", GraphError::EmptyFocalLookup(name.clone()));
                None
            }
        })
        .collect()
}

/// Derive the scene and panel for one set of criteria
pub fn recompute(graph: &SocialGraph, criteria: &FilterCriteria) -> Result<Frame, GraphError> {
    let names = &criteria.selected_names;
    if names.len() > MAX_FOCAL_NODES {
        return Err(GraphError::TooManyFocalNodes {
            given: names.len(),
            limit: MAX_FOCAL_NODES,
        });
    }

    let slots = resolve_focal(graph, names);
    let visible = visible_nodes(graph, criteria);
    let highlight = highlight_slots(graph, &slots);
    let scene = build_scene(graph, &visible, &highlight, &criteria.selected_projects);

    let panel = match slots.as_slice() {
        [Some(id)] => build_panel(graph, id),
        _ => None,
    };

    debug!(
        "Recomputed: {} nodes, {} edges, {} highlighted, panel: {}",
        scene.nodes.len(),
        scene.edges.len(),
        highlight.len(),
        panel.is_some()
    );

    Ok(Frame { scene, panel })
}

/// Selection produced by clicking a node of the displayed scene.
///
/// Returns `None` when the node is not on screen, in which case the
/// selection must stay as it is.
#[must_use]
pub fn select_from_click(graph: &SocialGraph, displayed: &Scene, clicked_id: &str) -> Option<Vec<String>> {
    if !displayed.contains(clicked_id) {
        debug!("Click on {} ignored: not displayed", clicked_id);
        return None;
    }
    graph.node(clicked_id).map(|node| vec![node.name.clone()])
}

/// Interactive session over one graph
#[derive(Debug)]
pub struct Session<'g> {
    graph: &'g SocialGraph,
    criteria: FilterCriteria,
    displayed: Frame,
    notice: Option<String>,
    computations: usize,
}

impl<'g> Session<'g> {
    /// Start a session showing the unfiltered graph
    #[must_use]
    pub fn new(graph: &'g SocialGraph) -> Self {
        let criteria = FilterCriteria::default();
        let displayed = recompute(graph, &criteria).unwrap_or_default();
        Self {
            graph,
            criteria,
            displayed,
            notice: None,
            computations: 1,
        }
    }

    /// The frame on screen
    #[must_use]
    pub fn displayed(&self) -> &Frame {
        &self.displayed
    }

    /// Criteria that produced the frame on screen
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Message about the last failed recomputation, if any
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Number of full recomputations run, including the initial frame
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Recompute for new criteria.
    ///
    /// On failure the displayed frame and criteria are kept and a notice is
    /// recorded.
    pub fn recompute(&mut self, criteria: FilterCriteria) -> Result<&Frame, GraphError> {
        if criteria == self.criteria && self.notice.is_none() {
            debug!("Criteria unchanged, reusing displayed frame");
            return Ok(&self.displayed);
        }

        self.computations += 1;
        match recompute(self.graph, &criteria) {
            Ok(frame) => {
                self.displayed = frame;
                self.criteria = criteria;
                self.notice = None;
                Ok(&self.displayed)
            }
            Err(err) => {
                warn!("Recomputation failed, keeping previous scene: {}", err);
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Selection a click on `node_id` would produce
    #[must_use]
    pub fn select_from_click(&self, node_id: &str) -> Option<Vec<String>> {
        select_from_click(self.graph, &self.displayed.scene, node_id)
    }

    /// Apply a click: select the clicked person and recompute.
    ///
    /// A click on a node that is not displayed leaves everything unchanged.
    pub fn click(&mut self, node_id: &str) -> Result<&Frame, GraphError> {
        match self.select_from_click(node_id) {
            Some(names) => {
                let criteria = self.criteria.clone().with_names(names);
                self.recompute(criteria)
            }
            None => Ok(&self.displayed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node, Palette, Position, BASE_COLOR};
    use std::collections::BTreeSet;

    fn chain() -> SocialGraph {
        SocialGraph::load(
            vec![
                Node::new("a", "Ana", Position::default()).with_types("Rede A"),
                Node::new("b", "Bia", Position::default()).with_types("Rede A"),
                Node::new("c", "Caio", Position::default()).with_types("Rede B"),
            ],
            vec![Edge::new("a", "b", 1.0), Edge::new("b", "c", 1.0)],
        )
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_single_selection_has_panel() {
        let graph = chain();
        let criteria = FilterCriteria::default().with_names(names(&["Ana"]));

        let frame = recompute(&graph, &criteria).unwrap();
        let panel = frame.panel.unwrap();

        assert_eq!(panel.id, "a");
        assert_eq!((panel.within_one, panel.within_two, panel.within_three), (1, 2, 2));
    }

    #[test]
    fn test_two_or_zero_selections_have_no_panel() {
        let graph = chain();

        let none = recompute(&graph, &FilterCriteria::default()).unwrap();
        let two = recompute(&graph, &FilterCriteria::default().with_names(names(&["Ana", "Caio"])))
            .unwrap();

        assert!(none.panel.is_none());
        assert!(two.panel.is_none());
        assert!(none.scene.nodes.iter().all(|n| n.color == BASE_COLOR));
    }

    #[test]
    fn test_unknown_name_is_no_selection() {
        let graph = chain();
        let frame = recompute(&graph, &FilterCriteria::default().with_names(names(&["Nobody"])))
            .unwrap();

        assert!(frame.panel.is_none());
        assert!(frame.scene.nodes.iter().all(|n| n.color == BASE_COLOR));
    }

    #[test]
    fn test_second_name_keeps_its_palette() {
        let graph = chain();
        let frame = recompute(
            &graph,
            &FilterCriteria::default().with_names(names(&["Nobody", "Caio"])),
        )
        .unwrap();

        assert_eq!(frame.scene.node("c").unwrap().color, Palette::SECONDARY.levels[0]);
        assert_eq!(frame.scene.node("b").unwrap().color, Palette::SECONDARY.levels[1]);
    }

    #[test]
    fn test_too_many_names_rejected() {
        let graph = chain();
        let err = recompute(
            &graph,
            &FilterCriteria::default().with_names(names(&["Ana", "Bia", "Caio"])),
        )
        .unwrap_err();

        assert_eq!(err, GraphError::TooManyFocalNodes { given: 3, limit: 2 });
    }

    #[test]
    fn test_panel_ignores_type_filter() {
        let graph = chain();
        let criteria = FilterCriteria {
            selected_types: BTreeSet::from(["Rede A".to_string()]),
            ..FilterCriteria::default().with_names(names(&["Ana"]))
        };

        let frame = recompute(&graph, &criteria).unwrap();

        assert!(!frame.scene.contains("c"));
        assert_eq!(frame.panel.unwrap().within_two, 2);
    }

    #[test]
    fn test_session_keeps_frame_on_failure() {
        let graph = chain();
        let mut session = Session::new(&graph);
        session
            .recompute(FilterCriteria::default().with_names(names(&["Ana"])))
            .unwrap();
        let before = session.displayed().clone();

        let result =
            session.recompute(FilterCriteria::default().with_names(names(&["Ana", "Bia", "Caio"])));

        assert!(result.is_err());
        assert_eq!(session.displayed(), &before);
        assert_eq!(session.criteria().selected_names, names(&["Ana"]));
        assert!(session.notice().is_some());

        session.recompute(FilterCriteria::default()).unwrap();
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_unchanged_criteria_reuse_frame() {
        let graph = chain();
        let mut session = Session::new(&graph);
        let criteria = FilterCriteria::default().with_names(names(&["Ana"]));

        let first = session.recompute(criteria.clone()).unwrap().clone();
        assert_eq!(session.computations(), 2);

        let second = session.recompute(criteria.clone()).unwrap();
        assert_eq!(second, &first);
        assert_eq!(session.computations(), 2);

        session
            .recompute(criteria.clone().with_names(names(&["Ana", "Bia", "Caio"])))
            .unwrap_err();
        assert_eq!(session.computations(), 3);

        session.recompute(criteria).unwrap();
        assert_eq!(session.computations(), 4);
        assert!(session.notice().is_none());
        assert_eq!(session.displayed(), &first);
    }

    #[test]
    fn test_click_uses_displayed_scene() {
        let graph = chain();
        let mut session = Session::new(&graph);
        session
            .recompute(FilterCriteria {
                selected_types: BTreeSet::from(["Rede A".to_string()]),
                ..FilterCriteria::default()
            })
            .unwrap();

        assert_eq!(session.select_from_click("b"), Some(names(&["Bia"])));
        assert_eq!(session.select_from_click("c"), None);
        assert_eq!(session.select_from_click("ghost"), None);

        let frame = session.click("b").unwrap();
        assert_eq!(frame.panel.as_ref().map(|p| p.id.as_str()), Some("b"));
        assert_eq!(session.criteria().selected_names, names(&["Bia"]));
        assert_eq!(session.criteria().selected_types.len(), 1);
    }
}
