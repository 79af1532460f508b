use crate::config::Config;
use crate::delivery::EmailSender;
use crate::errors::{AppError, ResultExt};
use crate::estimate::{estimate, PricingTable};
use crate::models::*;
use crate::notification::{render_contact, render_quote, Mailbox};
use crate::projection::{project_costs, summarize, ProjectionParams};
use crate::storage::{Submission, SubmissionStore};
use crate::validation::{validate_contact, validate_quote};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

const CONTACT_FAILURE: &str = "Failed to process contact form submission";
const QUOTE_FAILURE: &str = "Failed to process quote request";

static OPENAPI_SPEC: &str = include_str!("../openapi.yml");

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Inbox and sender address of every notification.
    pub mailbox: Mailbox,
    /// Pricing used for quote estimates.
    pub pricing: PricingTable,
    pub email_sender: Arc<dyn EmailSender>,
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        email_sender: Arc<dyn EmailSender>,
        store: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            mailbox: config.mailbox(),
            pricing: config.pricing(),
            config,
            email_sender,
            store,
        }
    }
}

fn invalid_body(rejection: impl std::fmt::Display) -> AppError {
    tracing::warn!("Rejected request body: {}", rejection);
    AppError::bad_request("Invalid request body")
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "pvc-cabinets-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/contact
///
/// Validates a contact form submission, stores it and notifies the business
/// inbox.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - The raw JSON body, or the reason it could not be parsed.
///
/// # Returns
///
/// * `Result<Json<ContactResponse>, AppError>` - The acknowledgment or an error.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let contact = validate_contact(payload)?;
    tracing::info!(
        "POST /api/contact - subject: {}, email: {}",
        contact.subject.as_str(),
        contact.email
    );

    let notification = render_contact(&contact, &state.mailbox, Utc::now());

    let id = state
        .store
        .save(&Submission::Contact(contact))
        .await
        .or_internal(CONTACT_FAILURE)?;

    let ack = state
        .email_sender
        .send(&notification)
        .await
        .or_internal(CONTACT_FAILURE)?;

    tracing::info!(
        "✓ Contact submission {} processed (message id: {:?})",
        id,
        ack.message_id
    );

    Ok(Json(ContactResponse {
        success: true,
        message: "Contact form submitted successfully".to_string(),
    }))
}

/// POST /api/quote
///
/// Validates a quote request, computes the preliminary estimate, stores the
/// request and notifies the business inbox. The estimate is echoed back to
/// the caller.
pub async fn submit_quote(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuotePayload>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let quote = validate_quote(payload)?;
    tracing::info!(
        "POST /api/quote - project: {}, timeline: {}, email: {}",
        quote.project_type.as_str(),
        quote.timeline.as_str(),
        quote.email
    );

    let cost = estimate(
        quote.room_dimensions.as_ref(),
        &quote.features,
        &state.pricing,
    );
    tracing::debug!("Estimate: {:?}", cost);
    if !cost.within_range() {
        tracing::warn!("Estimate out of range for {}", quote.email);
        return Err(AppError::bad_request("Invalid room dimensions"));
    }

    let notification = render_quote(&quote, &cost, &state.mailbox, Utc::now());

    let id = state
        .store
        .save(&Submission::Quote {
            submission: quote,
            estimate: cost,
        })
        .await
        .or_internal(QUOTE_FAILURE)?;

    let ack = state
        .email_sender
        .send(&notification)
        .await
        .or_internal(QUOTE_FAILURE)?;

    tracing::info!(
        "✓ Quote submission {} processed, estimate {} HTG (message id: {:?})",
        id,
        cost.estimated_cost,
        ack.message_id
    );

    Ok(Json(QuoteResponse {
        success: true,
        message: "Quote request submitted successfully".to_string(),
        estimated_cost: cost.estimated_cost,
        estimated_area: cost.area,
    }))
}

/// GET /api/projection
///
/// Five-year PVC vs wood comparison. Omitted query parameters take the
/// calculator defaults.
pub async fn get_projection(
    params: Result<Query<ProjectionParams>, QueryRejection>,
) -> Result<Json<ProjectionResponse>, AppError> {
    let Query(params) = params.map_err(|e| {
        tracing::warn!("Rejected projection query: {}", e);
        AppError::bad_request("Invalid query parameters")
    })?;

    if let Some(field) = params.invalid_input() {
        return Err(AppError::InvalidField(field));
    }

    let years = project_costs(&params);
    let summary = summarize(&years);

    Ok(Json(ProjectionResponse { years, summary }))
}

/// OPTIONS on the form endpoints. CORS headers are added by the CORS layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any other method on the form endpoints.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Serves the OpenAPI specification YAML bundled at build time.
pub async fn serve_openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/yaml")],
        OPENAPI_SPEC,
    )
}

/// Serves the Swagger UI HTML page.
///
/// This endpoint returns an HTML page that embeds the Swagger UI, configured to
/// load the OpenAPI specification served by `serve_openapi_spec`.
pub async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>PVC Cabinets Haiti API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.yml",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}
