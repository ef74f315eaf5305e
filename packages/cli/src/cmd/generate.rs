//! `schemagen generate` - scripted generation.
//!
//! Output goes to stdout (or `--out`); everything else goes to stderr
//! so the command stays pipe-clean.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use schemagen::{GenerateRequest, Input, OutputFormat, SchemaKind};

#[derive(Args)]
pub struct GenerateArgs {
    /// Schema type (faq, howto, article, product, event)
    #[arg(long, short = 's')]
    pub schema: String,

    /// Output format (json-ld, microdata)
    #[arg(long, short = 'f', default_value = "json-ld")]
    pub format: String,

    /// Read input from a file instead of stdin
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Fetch input from a URL instead of stdin
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Go straight to AI extraction instead of trying the prefix parser
    #[arg(long)]
    pub ai: bool,

    /// Override the AI model
    #[arg(long)]
    pub model: Option<String>,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let kind: SchemaKind = args.schema.parse().map_err(anyhow::Error::msg)?;
    let format: OutputFormat = args.format.parse().map_err(anyhow::Error::msg)?;

    let input = match (&args.input, &args.url) {
        (Some(_), Some(_)) => bail!("use either --input or --url, not both"),
        (Some(path), None) => Input::Text(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        (None, Some(url)) => Input::Url(url.clone()),
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Input::Text(buffer)
        }
    };

    let generator = super::build_generator(args.model.as_deref(), args.ai, args.ai)?;

    let generated = generator
        .generate(GenerateRequest {
            input,
            kind,
            format,
        })
        .await?;

    for warning in &generated.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning.yellow());
    }

    match &args.out {
        Some(path) => {
            std::fs::write(path, &generated.output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} {} schema written to {}",
                "✓".green().bold(),
                kind.as_schema_org_type(),
                path.display()
            );
        }
        None => {
            println!("{}", generated.output);
            eprintln!(
                "{} generated {} as {}{}",
                "✓".green().bold(),
                kind.as_schema_org_type().cyan(),
                format.to_string().cyan(),
                if generated.used_ai {
                    " (via AI)".dimmed().to_string()
                } else {
                    String::new()
                }
            );
        }
    }

    Ok(())
}
