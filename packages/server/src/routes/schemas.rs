//! GET /v1/schemas

use axum::Json;
use schemagen::SchemaKind;
use serde::Serialize;

#[derive(Serialize)]
pub struct SchemaInfo {
    pub schema_type: SchemaKind,
    pub schema_org_type: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

/// List the supported schema types with their example inputs.
pub async fn schemas_handler() -> Json<Vec<SchemaInfo>> {
    let schemas = SchemaKind::all()
        .iter()
        .map(|kind| SchemaInfo {
            schema_type: *kind,
            schema_org_type: kind.as_schema_org_type(),
            description: kind.description(),
            example: kind.example_input(),
        })
        .collect();
    Json(schemas)
}
