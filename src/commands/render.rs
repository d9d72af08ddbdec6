// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Render command - one recomputation, printed as a JSON frame

use super::{load_graph, write_output, CriteriaArgs};
use crate::config::Config;
use crate::engine::recompute;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Run the render command
pub fn run(config: &Config, criteria: CriteriaArgs, output: Option<PathBuf>) -> Result<()> {
    let graph = load_graph(config)?;
    let criteria = criteria.into_criteria();

    let frame = recompute(&graph, &criteria).context("Failed to compute scene")?;
    info!(
        "Rendered {} of {} nodes",
        frame.scene.nodes.len(),
        graph.node_count()
    );

    write_output(&config.to_json(&frame)?, output)
}
