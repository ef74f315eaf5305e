//! `schemagen interactive` - guided generation.
//!
//! Walks through type, format, and content, then prints the output and
//! offers to save it.

use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use schemagen::{GenerateRequest, Input as GeneratorInput, OutputFormat, SchemaKind};

pub async fn run() -> Result<()> {
    let term = Term::stderr();
    let theme = ColorfulTheme::default();

    eprintln!("{}", "schemagen - structured data generator".bold().cyan());
    eprintln!();

    let kinds = SchemaKind::all();
    let kind_labels: Vec<String> = kinds
        .iter()
        .map(|k| format!("{} - {}", k.as_schema_org_type(), k.description()))
        .collect();
    let kind_idx = Select::with_theme(&theme)
        .with_prompt("Schema type")
        .items(&kind_labels)
        .default(0)
        .interact_on(&term)?;
    let kind = kinds[kind_idx];

    let format_idx = Select::with_theme(&theme)
        .with_prompt("Output format")
        .items(&["JSON-LD", "HTML Microdata"])
        .default(0)
        .interact_on(&term)?;
    let format = match format_idx {
        0 => OutputFormat::JsonLd,
        _ => OutputFormat::Microdata,
    };

    let source_idx = Select::with_theme(&theme)
        .with_prompt("Input source")
        .items(&["Type or paste text", "Fetch a URL"])
        .default(0)
        .interact_on(&term)?;

    let (input, use_ai) = match source_idx {
        0 => {
            eprintln!();
            eprintln!(
                "{}",
                "Enter your content. Finish with a single '.' on its own line.".dimmed()
            );
            eprintln!(
                "{}",
                format!(
                    "(Run `schemagen example {}` to see the expected format.)",
                    kind.as_str()
                )
                .dimmed()
            );
            let content = read_multiline(&term)?;
            (GeneratorInput::Text(content), false)
        }
        _ => {
            let url: String = Input::with_theme(&theme)
                .with_prompt("URL")
                .interact_text()?;
            // Fetched pages rarely match the prefix format, so lean on AI
            let use_ai = Confirm::with_theme(&theme)
                .with_prompt("Use AI extraction?")
                .default(true)
                .interact_on(&term)?;
            (GeneratorInput::Url(url), use_ai)
        }
    };

    let generator = super::build_generator(None, use_ai, use_ai)?;

    eprintln!();
    eprintln!("{}", "Generating...".dimmed());

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

    eprintln!();
    println!("{}", generated.output);
    eprintln!();
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

    let save = Confirm::with_theme(&theme)
        .with_prompt("Save to a file?")
        .default(false)
        .interact_on(&term)?;
    if save {
        let default_name = format!("schema.{}", format.file_extension());
        let path: String = Input::with_theme(&theme)
            .with_prompt("File name")
            .default(default_name)
            .interact_text()?;
        std::fs::write(&path, &generated.output)
            .with_context(|| format!("Failed to write {}", path))?;
        eprintln!("{} saved to {}", "✓".green().bold(), path);
    }

    Ok(())
}

/// Read lines from the terminal until a lone `.`.
fn read_multiline(term: &Term) -> Result<String> {
    let mut lines = Vec::new();
    loop {
        let line = term.read_line()?;
        if line.trim() == "." {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
