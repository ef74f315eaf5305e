//! Typed errors for the schema generation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while generating structured data.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Prefix parsing failed and no AI fallback was available
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    /// URL fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// AI extraction failed
    #[error("AI extraction failed: {0}")]
    Ai(#[from] AiError),

    /// Resolved input was empty
    #[error("input content is empty")]
    EmptyInput,

    /// AI-first generation was requested but no AI is configured
    #[error("AI extraction requested but no AI is configured")]
    AiNotConfigured,
}

/// Errors from the prefix-text parsers.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No complete Q/A pair was found in FAQ input
    #[error("no Q&A pairs found; format input with 'Q:' and 'A:' prefixes")]
    NoPairs,

    /// No step lines were found in HowTo input
    #[error("no steps found; start step lines with '1.', 'Step 1:', or '-'")]
    NoSteps,

    /// A required field was missing from field-line input
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors that can occur during URL fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Security validation failed
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors that can occur during AI extraction.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("AI API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response could not be parsed into the expected structure
    #[error("unparseable AI response: {0}")]
    InvalidResponse(String),

    /// Model returned a record with no usable content
    #[error("AI extraction produced no usable content")]
    EmptyExtraction,

    /// Model omitted a required field
    #[error("AI extraction missing required field: {field}")]
    MissingField { field: &'static str },

    /// Configuration error (e.g. missing API key)
    #[error("AI config error: {0}")]
    Config(String),
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, internal IPs)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Result type alias for parse operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for AI operations.
pub type AiResult<T> = std::result::Result<T, AiError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
