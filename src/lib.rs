// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Socialscope library - scene engine for social network graphs
//!
//! This crate derives everything a renderer needs from an immutable social
//! graph: the visible subgraph under a type filter, hop-distance highlighting
//! around up to two focal people, centrality-scaled node sizes and the
//! neighborhood summary panel for a single selected person.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod graph;
pub mod highlight;
pub mod loader;
pub mod panel;
pub mod scene;

/// Core data types shared by every stage of the engine
pub mod types {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeSet;
    use std::fmt;
    use std::str::FromStr;

    /// Delimiter used by the multi-valued text attributes
    pub const TOKEN_DELIMITER: char = ';';

    /// Maximum number of focal people that drive highlighting
    pub const MAX_FOCAL_NODES: usize = 2;

    /// Render size of the least central node
    pub const MIN_NODE_SIZE: f64 = 8.0;
    /// Render size of the most central node
    pub const MAX_NODE_SIZE: f64 = 30.0;

    /// Color of nodes untouched by any highlight
    pub const BASE_COLOR: &str = "#73A5D5";
    /// Color of nodes taking part in a selected project
    pub const PROJECT_HIGHLIGHT_COLOR: &str = "orange";
    /// Color used for every rendered edge
    pub const EDGE_COLOR: &str = "#999999";

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position in 2D layout space
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    impl Position {
        /// Create a position from its coordinates
        #[must_use]
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }
    }

    // =========================================================================
    // Node (Person)
    // =========================================================================

    /// A person in the social graph, with typed attributes
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Node {
        /// Stable unique identifier
        pub id: String,
        /// Display name (not necessarily unique)
        pub name: String,
        /// Sum of incident edge weights
        pub weighted_degree: f64,
        /// Betweenness centrality score
        pub betweenness: f64,
        /// Rank by weighted degree
        pub degree_rank: u32,
        /// Rank by betweenness
        pub betweenness_rank: u32,
        /// Group label
        pub group: String,
        /// Raw `;`-delimited project list as supplied by the source data
        pub projects_raw: String,
        /// Trimmed, non-empty project tokens
        pub projects: BTreeSet<String>,
        /// Trimmed, non-empty network type tokens
        pub types: BTreeSet<String>,
        /// Trimmed, non-empty project code tokens
        pub project_codes: BTreeSet<String>,
        /// Precomputed layout position
        pub position: Position,
    }

    impl Node {
        /// Create a node with zeroed metrics and no memberships
        #[must_use]
        pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
            Self {
                id: id.into(),
                name: name.into(),
                weighted_degree: 0.0,
                betweenness: 0.0,
                degree_rank: 0,
                betweenness_rank: 0,
                group: String::new(),
                projects_raw: String::new(),
                projects: BTreeSet::new(),
                types: BTreeSet::new(),
                project_codes: BTreeSet::new(),
                position,
            }
        }

        /// Set the project list from its raw delimited form
        #[must_use]
        pub fn with_projects(mut self, raw: &str) -> Self {
            self.projects_raw = raw.to_string();
            self.projects = split_tokens(raw);
            self
        }

        /// Set the type list from its raw delimited form
        #[must_use]
        pub fn with_types(mut self, raw: &str) -> Self {
            self.types = split_tokens(raw);
            self
        }

        /// Set the betweenness score
        #[must_use]
        pub fn with_betweenness(mut self, betweenness: f64) -> Self {
            self.betweenness = betweenness;
            self
        }

        /// Number of project entries as the raw list counts them.
        ///
        /// Splits on the delimiter without dropping empty segments, so an
        /// empty list counts 1 and a trailing `;` adds one.
        #[must_use]
        pub fn project_count(&self) -> usize {
            self.projects_raw.split(TOKEN_DELIMITER).count()
        }

        /// Hover text shown by the renderer
        #[must_use]
        pub fn tooltip(&self) -> String {
            format!(
                "{}<br>Code: {}<br>Degree: {:.1} (Rank {})<br>Betweenness: {:.4} (Rank {})",
                self.name,
                self.id,
                self.weighted_degree,
                self.degree_rank,
                self.betweenness,
                self.betweenness_rank
            )
        }

        /// Read one attribute by key
        #[must_use]
        pub fn attribute(&self, key: AttributeKey) -> AttributeValue<'_> {
            match key {
                AttributeKey::Name => AttributeValue::Text(&self.name),
                AttributeKey::WeightedDegree => AttributeValue::Number(self.weighted_degree),
                AttributeKey::Betweenness => AttributeValue::Number(self.betweenness),
                AttributeKey::DegreeRank => AttributeValue::Rank(self.degree_rank),
                AttributeKey::BetweennessRank => AttributeValue::Rank(self.betweenness_rank),
                AttributeKey::Group => AttributeValue::Text(&self.group),
                AttributeKey::Projects => AttributeValue::Tokens(&self.projects),
                AttributeKey::Types => AttributeValue::Tokens(&self.types),
                AttributeKey::ProjectCodes => AttributeValue::Tokens(&self.project_codes),
            }
        }
    }

    /// Split a `;`-delimited attribute into trimmed, non-empty tokens
    #[must_use]
    pub fn split_tokens(raw: &str) -> BTreeSet<String> {
        raw.split(TOKEN_DELIMITER)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    // =========================================================================
    // Attribute access
    // =========================================================================

    /// Node attributes, named after the source data columns
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum AttributeKey {
        /// `nome`
        Name,
        /// `grau_ponderado`
        WeightedDegree,
        /// `intermediacao`
        Betweenness,
        /// `ranking_grau`
        DegreeRank,
        /// `ranking_intermediacao`
        BetweennessRank,
        /// `grupo`
        Group,
        /// `Projetos`
        Projects,
        /// `Tipos`
        Types,
        /// `Codigos_Projetos`
        ProjectCodes,
    }

    impl AttributeKey {
        /// Column name in the source data
        #[must_use]
        pub fn source_name(&self) -> &'static str {
            match self {
                Self::Name => "nome",
                Self::WeightedDegree => "grau_ponderado",
                Self::Betweenness => "intermediacao",
                Self::DegreeRank => "ranking_grau",
                Self::BetweennessRank => "ranking_intermediacao",
                Self::Group => "grupo",
                Self::Projects => "Projetos",
                Self::Types => "Tipos",
                Self::ProjectCodes => "Codigos_Projetos",
            }
        }

        /// Parse a source column name
        #[must_use]
        pub fn from_source_name(name: &str) -> Option<Self> {
            Self::all().into_iter().find(|k| k.source_name() == name)
        }

        /// All attribute keys
        #[must_use]
        pub fn all() -> [Self; 9] {
            [
                Self::Name,
                Self::WeightedDegree,
                Self::Betweenness,
                Self::DegreeRank,
                Self::BetweennessRank,
                Self::Group,
                Self::Projects,
                Self::Types,
                Self::ProjectCodes,
            ]
        }
    }

    /// A borrowed attribute value
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum AttributeValue<'a> {
        /// Free text
        Text(&'a str),
        /// Real-valued metric
        Number(f64),
        /// Ordinal rank
        Rank(u32),
        /// Set of delimited tokens
        Tokens(&'a BTreeSet<String>),
    }

    impl fmt::Display for AttributeValue<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Text(s) => write!(f, "{s}"),
                Self::Number(n) => write!(f, "{n}"),
                Self::Rank(r) => write!(f, "#{r}"),
                Self::Tokens(tokens) => {
                    let joined: Vec<&str> = tokens.iter().map(String::as_str).collect();
                    write!(f, "{}", joined.join("; "))
                }
            }
        }
    }

    // =========================================================================
    // Edge (Relationship)
    // =========================================================================

    /// Undirected weighted relationship between two people
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Edge {
        /// One endpoint
        pub source: String,
        /// The other endpoint
        pub target: String,
        /// Relationship strength, never negative
        pub weight: f64,
    }

    impl Edge {
        /// Create an edge
        #[must_use]
        pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
            Self {
                source: source.into(),
                target: target.into(),
                weight,
            }
        }
    }

    // =========================================================================
    // Centrality
    // =========================================================================

    /// Global betweenness bounds, fixed at load time
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct CentralityRange {
        /// Smallest betweenness over all nodes
        pub min: f64,
        /// Largest betweenness over all nodes
        pub max: f64,
    }

    impl CentralityRange {
        /// Compute the bounds of a set of scores (`0..0` when empty)
        #[must_use]
        pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
            let mut iter = values.into_iter();
            let Some(first) = iter.next() else {
                return Self::default();
            };
            iter.fold(Self { min: first, max: first }, |acc, v| Self {
                min: acc.min.min(v),
                max: acc.max.max(v),
            })
        }

        /// True when every node shares the same score
        #[must_use]
        pub fn is_degenerate(&self) -> bool {
            self.max <= self.min
        }
    }

    // =========================================================================
    // Filter criteria
    // =========================================================================

    /// How the filter criteria combine
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum FilterLogic {
        /// All criteria must hold
        #[default]
        And,
        /// Any criterion may hold
        Or,
    }

    impl FromStr for FilterLogic {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_lowercase().as_str() {
                "and" => Ok(Self::And),
                "or" => Ok(Self::Or),
                other => Err(format!("Unknown filter logic: {other}. Valid: and, or")),
            }
        }
    }

    impl fmt::Display for FilterLogic {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::And => write!(f, "AND"),
                Self::Or => write!(f, "OR"),
            }
        }
    }

    /// Per-interaction filter and selection inputs
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FilterCriteria {
        /// Display names of the focal people, in priority order
        pub selected_names: Vec<String>,
        /// Projects whose members get the project highlight
        pub selected_projects: BTreeSet<String>,
        /// Network types a node must carry to stay visible
        pub selected_types: BTreeSet<String>,
        /// Combination mode (currently has no effect on visibility)
        pub filter_logic: FilterLogic,
    }

    impl FilterCriteria {
        /// Replace the focal selection
        #[must_use]
        pub fn with_names(mut self, names: Vec<String>) -> Self {
            self.selected_names = names;
            self
        }
    }

    // =========================================================================
    // Highlight palettes
    // =========================================================================

    /// Distance from a focal node, capped at three hops
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum HopLevel {
        /// The focal node itself
        Focal,
        /// Direct neighbor
        One,
        /// Two hops away
        Two,
        /// Three hops away
        Three,
    }

    impl HopLevel {
        /// Number of hops
        #[must_use]
        pub fn hops(&self) -> usize {
            match self {
                Self::Focal => 0,
                Self::One => 1,
                Self::Two => 2,
                Self::Three => 3,
            }
        }
    }

    /// Colors for hop levels 0 through 3 around one focal node
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        /// Colors indexed by hop count
        pub levels: [&'static str; 4],
    }

    impl Palette {
        /// Palette of the first focal node (oranges)
        pub const PRIMARY: Self = Self {
            levels: ["#FF7F0E", "#FFB04D", "#FFE0B2", "#FFEDE0"],
        };

        /// Palette of the second focal node (purples)
        pub const SECONDARY: Self = Self {
            levels: ["#9467BD", "#BFA5D8", "#E5DFF1", "#F4F1F7"],
        };

        /// Palette bound to a selection slot
        #[must_use]
        pub fn for_slot(slot: usize) -> Self {
            if slot == 0 {
                Self::PRIMARY
            } else {
                Self::SECONDARY
            }
        }

        /// Color for a hop level
        #[must_use]
        pub fn color(&self, level: HopLevel) -> &'static str {
            self.levels[level.hops()]
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::GraphError;
    pub use crate::graph::SocialGraph;
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
