// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override the config file
pub const ENV_PREFIX: &str = "SOCIALSCOPE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the graph document
    pub data_dir: PathBuf,
    /// Graph document file name inside `data_dir`
    pub graph_file: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: directories::ProjectDirs::from("com", "hyperpolymath", "socialscope")
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".socialscope")),
            graph_file: "graph.json".to_string(),
            log_level: "info".to_string(),
            pretty: true,
        }
    }
}

impl Config {
    /// Full path of the graph document
    #[must_use]
    pub fn graph_path(&self) -> PathBuf {
        self.data_dir.join(&self.graph_file)
    }

    /// Look up a single key as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir.display().to_string()),
            "graph_file" => Some(self.graph_file.clone()),
            "graph_path" => Some(self.graph_path().display().to_string()),
            "log_level" => Some(self.log_level.clone()),
            "pretty" => Some(self.pretty.to_string()),
            _ => None,
        }
    }

    /// Serialize to JSON, honouring `pretty`
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value).context("Failed to serialize output")
        } else {
            serde_json::to_string(value).context("Failed to serialize output")
        }
    }
}

/// Default location of the config file
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "socialscope")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration: defaults, then the config file, then the environment.
///
/// An explicitly given file must exist; the default one is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let defaults = Config::default();

    let mut builder = ::config::Config::builder()
        .set_default("data_dir", defaults.data_dir.display().to_string())?
        .set_default("graph_file", defaults.graph_file)?
        .set_default("log_level", defaults.log_level)?
        .set_default("pretty", defaults.pretty)?;

    if let Some(file) = path.map(Path::to_path_buf).or_else(default_config_path) {
        builder = builder.add_source(::config::File::from(file).required(path.is_some()));
    }

    builder
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}
