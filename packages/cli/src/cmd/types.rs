//! `schemagen types` - list the supported schema types.

use anyhow::Result;
use colored::Colorize;
use schemagen::SchemaKind;

pub fn run() -> Result<()> {
    println!("{}", "Supported schema types:".bold());
    println!();
    for kind in SchemaKind::all() {
        println!(
            "  {:<10} {} {}",
            kind.as_str().cyan().bold(),
            format!("({})", kind.as_schema_org_type()).dimmed(),
            kind.description()
        );
    }
    println!();
    println!(
        "{}",
        "Run `schemagen example <type>` to see the expected input format.".dimmed()
    );
    Ok(())
}
