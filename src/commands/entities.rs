//! # Entities Command Implementation
//!
//! Lists every entity reachable from an ml-git configuration. The
//! configuration comes either from a local file (`--config`) or from
//! `.ml-git/config.yaml` inside a repository (`--repo`).
//!
//! This command is read-only; it only mirrors remotes into the cache root.

use anyhow::Result;
use clap::{ArgGroup, Args};
use serde::Serialize;
use std::path::PathBuf;

use entity_catalog::entity::Entity;
use entity_catalog::resolver::ConfigSource;
use entity_catalog::suggestions;

use super::{OutputFormat, RemoteArgs};

/// List entities declared across the configured remotes
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["config", "repo"])))]
pub struct EntitiesArgs {
    /// Path to a local ml-git config.yaml.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository holding .ml-git/config.yaml.
    #[arg(short, long, value_name = "NAME")]
    pub repo: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

/// Serialized view of one entity
#[derive(Debug, Serialize)]
struct EntityRow<'a> {
    name: Option<&'a str>,
    #[serde(rename = "type")]
    entity_type: Option<String>,
    repository: &'a str,
    path: &'a str,
    spec: &'a entity_catalog::spec::SpecBody,
}

impl<'a> From<&'a Entity> for EntityRow<'a> {
    fn from(entity: &'a Entity) -> Self {
        Self {
            name: entity.name(),
            entity_type: entity.entity_type().map(|t| t.to_string()),
            repository: entity.repository().name(),
            path: entity.path(),
            spec: entity.spec(),
        }
    }
}

/// Execute the `entities` command.
pub fn execute(args: EntitiesArgs) -> Result<()> {
    let source = match (&args.config, &args.repo) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(suggestions::config_not_found(path));
            }
            ConfigSource::path(path)
        }
        (None, Some(name)) => ConfigSource::repository(name.as_str()),
        (None, None) => anyhow::bail!("Either --config or --repo is required"),
    };

    let resolver = args.remote.build_resolver();
    let entities = resolver
        .get_entities(&source)
        .map_err(suggestions::from_error)?;

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<EntityRow> = entities.iter().map(EntityRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => print_table(&entities),
    }

    Ok(())
}

fn print_table(entities: &[Entity]) {
    if entities.is_empty() {
        println!("No entities found.");
        return;
    }

    let name_width = entities
        .iter()
        .map(|e| e.name().unwrap_or("-").len())
        .max()
        .unwrap_or(0)
        .max(4);

    for entity in entities {
        let entity_type = entity
            .entity_type()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<name_width$}  {:<7}  {}:{}",
            entity.name().unwrap_or("-"),
            entity_type,
            entity.repository(),
            entity.path(),
        );
    }

    println!();
    println!(
        "{} {}",
        entities.len(),
        if entities.len() == 1 { "entity" } else { "entities" }
    );
}
