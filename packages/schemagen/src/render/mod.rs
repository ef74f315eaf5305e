//! Output rendering for JSON-LD and HTML Microdata.
//!
//! Rendering is pure: a well-formed record always renders, so these
//! functions return `String` rather than `Result`.

pub mod json_ld;
pub mod microdata;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::SchemaRecord;

/// The two supported output serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    JsonLd,
    Microdata,
}

impl OutputFormat {
    /// File extension hosts use when saving output.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::JsonLd => "json",
            OutputFormat::Microdata => "html",
        }
    }

    /// MIME type hosts use when serving output for download.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::JsonLd => "application/ld+json",
            OutputFormat::Microdata => "text/html",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::JsonLd => "json_ld",
            OutputFormat::Microdata => "microdata",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json-ld" | "jsonld" | "json_ld" | "json" => Ok(OutputFormat::JsonLd),
            "microdata" | "html" => Ok(OutputFormat::Microdata),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Render a record to the requested format.
pub fn render(record: &SchemaRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::JsonLd => json_ld::render_json_ld(record),
        OutputFormat::Microdata => microdata::render_microdata(record),
    }
}
