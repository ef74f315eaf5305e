//! Schemagen terminal host.
//!
//! `schemagen generate` for scripted use, `schemagen interactive` for a
//! guided form, plus `types` and `example` for discovering the input
//! formats.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "schemagen", version, about = "Generate Schema.org JSON-LD and HTML Microdata from text or URLs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate structured data from text, a file, or a URL
    Generate(GenerateArgs),

    /// List supported schema types
    Types,

    /// Print the example input for a schema type
    Example {
        /// Schema type (faq, howto, article, product, event)
        kind: String,
    },

    /// Guided interactive generation
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet by default; RUST_LOG opts in
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // .env so OPENAI_API_KEY works in development
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => cmd::generate::run(args).await,
        Command::Types => cmd::types::run(),
        Command::Example { kind } => cmd::example::run(&kind),
        Command::Interactive => cmd::interactive::run().await,
    }
}
