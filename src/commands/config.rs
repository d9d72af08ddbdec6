// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - shows resolved configuration values

use crate::config::Config;
use anyhow::{Context, Result};

/// Run the config command (`all` prints the whole config as TOML)
pub fn run(config: &Config, key: &str) -> Result<()> {
    if key == "all" {
        let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
        print!("{text}");
        return Ok(());
    }

    let value = config.get(key).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown config key: {}. Valid: data_dir, graph_file, graph_path, log_level, pretty, all",
            key
        )
    })?;
    println!("{value}");
    Ok(())
}
