use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "itemresolve",
    about = "Resolve custom item ids across ItemsAdder, Nexo and Oraxen"
)]
pub struct Cli {
    /// Resolver config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Namespace applied to bare ids (overrides the config file)
    #[arg(long, global = true)]
    pub default_namespace: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize item ids and report malformed ones
    Parse {
        /// Raw item ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show which providers a fixture host exposes, in resolution order
    Providers {
        /// Fixture file describing installed plugins and their items
        #[arg(long)]
        fixture: PathBuf,
    },

    /// Resolve item ids against a fixture host
    Resolve {
        /// Fixture file describing installed plugins and their items
        #[arg(long)]
        fixture: PathBuf,

        /// Raw item ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
