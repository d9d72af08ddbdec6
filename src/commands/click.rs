// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Click command - the selection a click on a rendered node produces

use super::{load_graph, CriteriaArgs};
use crate::config::Config;
use crate::engine::{recompute, select_from_click};
use anyhow::{Context, Result};

/// Run the click command against the scene the criteria display
pub fn run(config: &Config, criteria: CriteriaArgs, node_id: &str) -> Result<()> {
    let graph = load_graph(config)?;
    let criteria = criteria.into_criteria();
    let frame = recompute(&graph, &criteria).context("Failed to compute scene")?;

    match select_from_click(&graph, &frame.scene, node_id) {
        Some(names) => println!("{}", config.to_json(&names)?),
        None => eprintln!("Node {node_id} is not displayed; selection unchanged"),
    }
    Ok(())
}
