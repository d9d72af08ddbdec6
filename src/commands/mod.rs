// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod click;
pub mod completions;
pub mod config;
pub mod export;
pub mod options;
pub mod panel;
pub mod render;
pub mod session;

use crate::config::Config;
use crate::graph::SocialGraph;
use crate::loader;
use crate::types::{FilterCriteria, FilterLogic};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Filter and selection flags shared by the recomputing commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CriteriaArgs {
    /// Select a person by display name (up to two, in priority order)
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Highlight members of a project (repeatable)
    #[arg(long = "project", value_name = "PROJECT")]
    pub projects: Vec<String>,

    /// Show only people in a network type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// How the filters combine (and, or)
    #[arg(long, default_value = "and")]
    pub logic: FilterLogic,
}

impl CriteriaArgs {
    /// Convert flags into filter criteria
    #[must_use]
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            selected_names: self.names,
            selected_projects: self.projects.into_iter().collect(),
            selected_types: self.types.into_iter().collect(),
            filter_logic: self.logic,
        }
    }
}

/// Load the configured graph document
pub fn load_graph(config: &Config) -> Result<SocialGraph> {
    let path = config.graph_path();
    info!("Loading graph from {}", path.display());
    loader::load_path(&path)
        .with_context(|| format!("Failed to load graph from {}", path.display()))
}

/// Write command output to a file, or to stdout
pub fn write_output(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
