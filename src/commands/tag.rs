//! # Tag Command Implementation
//!
//! Splits a version tag into categories, entity and sequence without
//! contacting any remote.

use anyhow::Result;
use clap::Args;

use entity_catalog::tag::parse_tag;

use super::OutputFormat;

/// Show how a tag name is interpreted
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Tag name, e.g. `computer-vision__images__imagenet__3`.
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute the `tag` command.
pub fn execute(args: TagArgs) -> Result<()> {
    let Some(parsed) = parse_tag(&args.tag) else {
        anyhow::bail!(
            "'{}' is not a versioned tag\n\n\
             hint: Version tags look like <category>__<entity>__<sequence>",
            args.tag
        );
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
        OutputFormat::Text => {
            println!("entity:     {}", parsed.entity);
            println!("sequence:   {}", parsed.sequence);
            if parsed.categories.is_empty() {
                println!("categories: -");
            } else {
                println!("categories: {}", parsed.categories.join(", "));
            }
        }
    }

    Ok(())
}
