//! # Versions Command Implementation
//!
//! Lists the tagged versions of one entity in its metadata repository,
//! in the order the repository enumerates its tags.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use entity_catalog::entity::SpecVersion;
use entity_catalog::suggestions;
use entity_catalog::tag::parse_tag;

use super::{OutputFormat, RemoteArgs};

/// List the versions of an entity
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Entity name, as in `<ENTITY>.spec`.
    #[arg(value_name = "ENTITY")]
    pub entity: String,

    /// Metadata repository holding the entity's spec and tags.
    #[arg(short, long, value_name = "NAME")]
    pub repo: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

#[derive(Debug, Serialize)]
struct VersionRow<'a> {
    tag: &'a str,
    version: Option<u64>,
    spec: &'a entity_catalog::spec::SpecBody,
}

/// Execute the `versions` command.
pub fn execute(args: VersionsArgs) -> Result<()> {
    let resolver = args.remote.build_resolver();
    let versions = resolver
        .get_entity_versions(&args.entity, &args.repo)
        .map_err(suggestions::from_error)?;

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<VersionRow> = versions
                .iter()
                .map(|v| VersionRow {
                    tag: v.tag(),
                    version: v.version(),
                    spec: v.spec(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => print_versions(&args.entity, &versions),
    }

    Ok(())
}

fn print_versions(entity: &str, versions: &[SpecVersion]) {
    if versions.is_empty() {
        println!("No versions of '{}' found.", entity);
        return;
    }

    for version in versions {
        // Prefer the version recorded in the spec, then the tag's sequence
        let number = version
            .version()
            .or_else(|| parse_tag(version.tag()).and_then(|t| t.number()));
        match number {
            Some(n) => println!("{:>6}  {}", n, version.tag()),
            None => println!("{:>6}  {}", "-", version.tag()),
        }
    }
}
