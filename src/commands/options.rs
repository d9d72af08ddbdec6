// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Options command - lists the names, network types and projects to select from

use super::load_graph;
use crate::config::Config;
use anyhow::Result;

/// Run the options command
pub fn run(config: &Config, json: bool) -> Result<()> {
    let graph = load_graph(config)?;
    let options = graph.filter_options();

    if json {
        println!("{}", config.to_json(&options)?);
        return Ok(());
    }

    for (title, values) in [
        ("Names", &options.names),
        ("Types", &options.types),
        ("Projects", &options.projects),
    ] {
        println!("{} ({}):", title, values.len());
        for value in values {
            println!("  {value}");
        }
    }
    Ok(())
}
