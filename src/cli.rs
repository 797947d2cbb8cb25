//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Entity Catalog - List ml-git entities and their versions across repositories
#[derive(Parser, Debug)]
#[command(name = "entity-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the entities reachable from an ml-git configuration
    Entities(commands::entities::EntitiesArgs),

    /// List the tagged versions of one entity
    Versions(commands::versions::VersionsArgs),

    /// Break a version tag into its parts
    Tag(commands::tag::TagArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Entities(args) => commands::entities::execute(args),
            Commands::Versions(args) => commands::versions::execute(args),
            Commands::Tag(args) => commands::tag::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
