use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vitalboard",
    version,
    about = "Agent-native health dashboard with activity-aware thresholds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Verbose logging to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Evaluate one snapshot and print the dashboard
    Dashboard {
        /// Snapshot JSON file (defaults to config, then built-in mock data)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Activity state override (Resting, Exercising, Sleeping)
        #[arg(long)]
        activity: Option<String>,

        /// Custom metric as NAME:GOOD:WARN (e.g. "Glucose:70-140:141-180")
        #[arg(long = "custom", value_name = "DEFINITION")]
        custom: Vec<String>,

        /// Remove a metric by name after merging
        #[arg(long = "remove", value_name = "NAME")]
        remove: Vec<String>,

        /// Apply one random drift cycle before printing
        #[arg(long)]
        simulate: bool,
    },

    /// Show the threshold table for an activity state
    Thresholds {
        /// Activity state (unknown values fall back to Resting)
        #[arg(long)]
        activity: Option<String>,
    },

    /// Refresh the dashboard periodically; reads commands from stdin
    Watch {
        /// Snapshot JSON file (defaults to config, then built-in mock data)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Seconds between refreshes (defaults to config)
        #[arg(long)]
        interval: Option<u64>,

        /// Drift readings randomly on every refresh
        #[arg(long)]
        simulate: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (refresh_secs, source, activity)
        key: String,
        /// Config value (empty string clears source/activity)
        value: String,
    },
}
