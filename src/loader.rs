// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph document loading and attribute coercion
//!
//! Source data arrives with loosely typed, string-keyed attributes. This
//! module is the only place that turns them into typed [`Node`] records, and
//! the only place that applies the zero-substitution fallback for numeric
//! attributes that do not parse.

use crate::error::GraphError;
use crate::graph::SocialGraph;
use crate::types::{split_tokens, AttributeKey, Edge, Node, Position};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Weight given to edges that carry none
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// A graph as supplied by the loading collaborator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDocument {
    /// Nodes with raw attributes
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    /// Edges with raw weights
    #[serde(default)]
    pub edges: Vec<RawEdge>,
    /// Precomputed layout, keyed by node ID
    #[serde(default)]
    pub positions: HashMap<String, [f64; 2]>,
}

/// A node before coercion
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Node identifier (string or integer)
    #[serde(deserialize_with = "id_from_value")]
    pub id: String,
    /// Attributes keyed by source column name
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Inline position, taking precedence over the document's `positions`
    #[serde(default)]
    pub position: Option<[f64; 2]>,
}

/// An edge before coercion
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    /// One endpoint
    #[serde(deserialize_with = "id_from_value")]
    pub source: String,
    /// The other endpoint
    #[serde(deserialize_with = "id_from_value")]
    pub target: String,
    /// Raw weight
    #[serde(default)]
    pub weight: Option<Value>,
}

fn id_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "identifier must be a string or a number, got {other}"
        ))),
    }
}

impl GraphDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse graph document")
    }

    /// Coerce every attribute and build the graph
    pub fn into_graph(self) -> Result<SocialGraph, GraphError> {
        let Self {
            nodes,
            edges,
            positions,
        } = self;

        let nodes = nodes
            .into_iter()
            .map(|raw| -> Result<Node, GraphError> {
                let [x, y] = raw
                    .position
                    .or_else(|| positions.get(&raw.id).copied())
                    .ok_or_else(|| GraphError::MissingPosition(raw.id.clone()))?;
                Ok(coerce_node(&raw, Position::new(x, y)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges = edges.iter().map(coerce_edge).collect();

        SocialGraph::load(nodes, edges)
    }
}

/// Read and build a graph from a JSON document on disk
pub fn load_path(path: &Path) -> Result<SocialGraph> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = GraphDocument::from_json(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        "Read {} nodes and {} edges from {}",
        document.nodes.len(),
        document.edges.len(),
        path.display()
    );
    document
        .into_graph()
        .with_context(|| format!("Failed to build graph from {}", path.display()))
}

/// Build a typed node from raw attributes
#[must_use]
pub fn coerce_node(raw: &RawNode, position: Position) -> Node {
    let get = |key: AttributeKey| raw.attributes.get(key.source_name());
    let tokens = |key: AttributeKey| get(key).and_then(text).unwrap_or_default();
    let number = |key: AttributeKey| coerce_f64(&raw.id, key.source_name(), get(key));
    let rank = |key: AttributeKey| coerce_rank(&raw.id, key.source_name(), get(key));

    let projects_raw = tokens(AttributeKey::Projects);

    Node {
        id: raw.id.clone(),
        name: get(AttributeKey::Name)
            .and_then(text)
            .unwrap_or_else(|| raw.id.clone()),
        weighted_degree: number(AttributeKey::WeightedDegree),
        betweenness: number(AttributeKey::Betweenness),
        degree_rank: rank(AttributeKey::DegreeRank),
        betweenness_rank: rank(AttributeKey::BetweennessRank),
        group: tokens(AttributeKey::Group),
        projects: split_tokens(&projects_raw),
        projects_raw,
        types: split_tokens(&tokens(AttributeKey::Types)),
        project_codes: split_tokens(&tokens(AttributeKey::ProjectCodes)),
        position,
    }
}

/// Build a typed edge, defaulting and clamping the weight
#[must_use]
pub fn coerce_edge(raw: &RawEdge) -> Edge {
    let weight = match &raw.weight {
        None | Some(Value::Null) => DEFAULT_EDGE_WEIGHT,
        Some(value) => {
            let owner = format!("edge {} -- {}", raw.source, raw.target);
            let weight = coerce_f64(&owner, "weight", Some(value));
            if weight < 0.0 {
                warn!("Negative weight {} on {}; using 0", weight, owner);
                0.0
            } else {
                weight
            }
        }
    };
    Edge::new(raw.source.clone(), raw.target.clone(), weight)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn report_coercion(owner: &str, key: &str, value: &Value) {
    let err = GraphError::AttributeCoercion {
        owner: owner.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    };
    warn!("{}; using 0", err);
}

/// Read a real-valued attribute, substituting 0 for anything non-numeric
fn coerce_f64(owner: &str, key: &str, value: Option<&Value>) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => return 0.0,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => v,
        _ => {
            if let Some(value) = value {
                report_coercion(owner, key, value);
            }
            0.0
        }
    }
}

/// Read a rank attribute, substituting 0 for anything that is not a whole number
fn coerce_rank(owner: &str, key: &str, value: Option<&Value>) -> u32 {
    let parsed = match value {
        None | Some(Value::Null) => return 0,
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            }),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        Some(_) => None,
    };

    parsed.unwrap_or_else(|| {
        if let Some(value) = value {
            report_coercion(owner, key, value);
        }
        0
    })
}
