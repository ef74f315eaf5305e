//! `schemagen example` - show the expected input format for a type.

use anyhow::Result;
use colored::Colorize;
use schemagen::SchemaKind;

pub fn run(kind: &str) -> Result<()> {
    let kind: SchemaKind = kind.parse().map_err(anyhow::Error::msg)?;

    eprintln!(
        "{} {}",
        "Example input for".bold(),
        kind.as_schema_org_type().cyan().bold()
    );
    eprintln!();
    println!("{}", kind.example_input());
    Ok(())
}
