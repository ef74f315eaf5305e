//! POST /v1/generate

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schemagen::{
    Generated, GenerateRequest, GeneratorError, Input, OutputFormat, SchemaKind, SchemaRecord,
    SourceInfo,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    /// Free-form or prefixed text; exactly one of `content`/`url`
    pub content: Option<String>,
    /// URL to fetch and strip
    pub url: Option<String>,
    pub schema_type: String,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub output: String,
    pub format: OutputFormat,
    pub schema_type: SchemaKind,
    pub record: SchemaRecord,
    pub used_ai: bool,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
}

impl From<Generated> for GenerateResponse {
    fn from(generated: Generated) -> Self {
        Self {
            output: generated.output,
            format: generated.format,
            schema_type: generated.kind,
            record: generated.record,
            used_ai: generated.used_ai,
            warnings: generated.warnings,
            source: generated.source,
        }
    }
}

/// API error with a JSON `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        let status = match &err {
            GeneratorError::Parse(_) | GeneratorError::EmptyInput => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            GeneratorError::Fetch(_) | GeneratorError::Ai(_) => StatusCode::BAD_GATEWAY,
            GeneratorError::AiNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Validate the body into a library request.
fn into_request(body: GenerateBody) -> Result<GenerateRequest, ApiError> {
    let kind: SchemaKind = body
        .schema_type
        .parse()
        .map_err(ApiError::unprocessable)?;
    let format: OutputFormat = body.format.parse().map_err(ApiError::unprocessable)?;

    let input = match (body.content, body.url) {
        (Some(content), None) => Input::Text(content),
        (None, Some(url)) => Input::Url(url),
        (Some(_), Some(_)) => {
            return Err(ApiError::unprocessable(
                "provide either content or url, not both",
            ))
        }
        (None, None) => {
            return Err(ApiError::unprocessable("provide either content or url"))
        }
    };

    Ok(GenerateRequest {
        input,
        kind,
        format,
    })
}

pub async fn generate_handler(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = into_request(body)?;

    tracing::debug!(kind = %request.kind, format = %request.format, "generate request");

    let generated = state.generator.generate(request).await?;
    Ok(Json(generated.into()))
}
