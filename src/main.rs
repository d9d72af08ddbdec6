// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Socialscope CLI - scene engine for social network graphs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use socialscope::commands::{self, CriteriaArgs};
use socialscope::config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "socialscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "SOCIALSCOPE_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "SOCIALSCOPE_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Graph document file name override (inside the data directory)
    #[arg(long)]
    graph_file: Option<String>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the scene and panel for a selection, printed as JSON
    Render {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Show the neighborhood summary for one person
    Panel {
        /// Display name of the person
        name: String,
    },

    /// List the names, network types and projects available for selection
    Options,

    /// Show the selection produced by clicking a displayed node
    Click {
        /// Identifier of the clicked node
        node_id: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Run an interactive JSON-lines session on stdin/stdout
    Session,

    /// Export graph to various formats
    Export {
        /// Output format (dot, json)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Show configuration values
    Config {
        /// Configuration key, or `all`
        #[arg(default_value = "all")]
        key: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(file) = cli.graph_file {
        config.graph_file = file;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Render { criteria, output } => commands::render::run(&config, criteria, output),
        Commands::Panel { name } => commands::panel::run(&config, &name, cli.json, !cli.no_color),
        Commands::Options => commands::options::run(&config, cli.json),
        Commands::Click { node_id, criteria } => commands::click::run(&config, criteria, &node_id),
        Commands::Session => commands::session::run(&config),
        Commands::Export { format, output } => commands::export::run(&config, &format, output),
        Commands::Config { key } => commands::config::run(&config, &key),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
