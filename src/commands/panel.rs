// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Panel command - neighborhood summary for one person

use super::load_graph;
use crate::config::Config;
use crate::error::GraphError;
use crate::panel::{build_panel, PanelStats};
use anyhow::Result;
use owo_colors::OwoColorize;

/// Run the panel command
pub fn run(config: &Config, name: &str, json: bool, color: bool) -> Result<()> {
    let graph = load_graph(config)?;

    let node = graph
        .find_by_name(name)
        .ok_or_else(|| GraphError::EmptyFocalLookup(name.to_string()))?;
    let stats = build_panel(&graph, &node.id)
        .ok_or_else(|| GraphError::EmptyFocalLookup(name.to_string()))?;

    if json {
        println!("{}", config.to_json(&stats)?);
    } else {
        print!("{}", format_panel(&stats, color));
    }
    Ok(())
}

/// Human-readable panel
#[must_use]
pub fn format_panel(stats: &PanelStats, color: bool) -> String {
    let badge = |value: String| {
        if color {
            value.bold().to_string()
        } else {
            value
        }
    };

    let title = format!("{} ({})", stats.name, stats.id);
    let mut out = String::new();
    if color {
        out.push_str(&format!("{}\n", title.bold().blue()));
    } else {
        out.push_str(&format!("{title}\n"));
    }
    out.push_str(&format!("  Projects:             {}\n", badge(stats.project_count.to_string())));
    out.push_str(&format!("  Degree centrality:    {}\n", badge(stats.degree_rank_label())));
    out.push_str(&format!("  Betweenness:          {}\n", badge(stats.betweenness_rank_label())));
    out.push_str(&format!("  Within 1 hop:         {}\n", badge(stats.within_one.to_string())));
    out.push_str(&format!("  Within 2 hops:        {}\n", badge(stats.within_two.to_string())));
    out.push_str(&format!("  Within 3 hops:        {}\n", badge(stats.within_three.to_string())));
    out
}
