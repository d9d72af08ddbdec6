// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error taxonomy for loading and recomputation

use thiserror::Error;

/// Errors raised by the graph store and the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge endpoint is not a known node (malformed graph, fatal at load)
    #[error("malformed graph: edge {source_id} -- {target_id} references unknown node {missing}")]
    DanglingEdge {
        /// Edge source
        source_id: String,
        /// Edge target
        target_id: String,
        /// The endpoint that does not exist
        missing: String,
    },

    /// A node has no layout position (malformed graph, fatal at load)
    #[error("malformed graph: node {0} has no layout position")]
    MissingPosition(String),

    /// Two nodes share an identifier (malformed graph, fatal at load)
    #[error("malformed graph: duplicate node identifier {0}")]
    DuplicateNode(String),

    /// A numeric attribute did not parse; recovered by substituting zero
    #[error("attribute {key} on {owner} is not numeric: {value}")]
    AttributeCoercion {
        /// Node identifier or edge description
        owner: String,
        /// Attribute name
        key: String,
        /// Offending raw value
        value: String,
    },

    /// A selected display name matches no node; recovered as no selection
    #[error("no node is named {0:?}")]
    EmptyFocalLookup(String),

    /// More focal names than the highlighter supports
    #[error("at most {limit} people can be selected, got {given}")]
    TooManyFocalNodes {
        /// Names supplied
        given: usize,
        /// Supported maximum
        limit: usize,
    },
}

impl GraphError {
    /// True for errors that abort a graph load
    #[must_use]
    pub fn is_malformed_graph(&self) -> bool {
        matches!(
            self,
            Self::DanglingEdge { .. } | Self::MissingPosition(_) | Self::DuplicateNode(_)
        )
    }
}
