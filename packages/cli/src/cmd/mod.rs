pub mod example;
pub mod generate;
pub mod interactive;
pub mod types;

use std::sync::Arc;

use anyhow::{bail, Result};
use schemagen::ai::OpenAI;
use schemagen::{Generator, GeneratorConfig, HttpFetcher, ValidatedFetcher};

/// Build a generator from the environment.
///
/// AI extraction is attached when `OPENAI_API_KEY` is set; `require_ai`
/// turns a missing key into an error instead of a degraded generator.
pub fn build_generator(
    model: Option<&str>,
    prefer_ai: bool,
    require_ai: bool,
) -> Result<Generator> {
    let fetcher = Arc::new(ValidatedFetcher::new(HttpFetcher::new()));
    let mut generator = Generator::new(fetcher).with_config(GeneratorConfig {
        prefer_ai,
        ..Default::default()
    });

    match OpenAI::from_env() {
        Ok(mut ai) => {
            if let Some(model) = model {
                ai = ai.with_model(model);
            }
            generator = generator.with_ai(Arc::new(ai));
        }
        Err(_) if require_ai => {
            bail!("OPENAI_API_KEY is not set; AI extraction is unavailable")
        }
        Err(_) => {}
    }

    Ok(generator)
}
