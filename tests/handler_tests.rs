/// Router-level tests for the HTTP endpoints
/// Collaborators are replaced by in-memory fakes that record every call
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pvc_cabinets_api::config::Config;
use pvc_cabinets_api::delivery::{DeliveryAck, DeliveryError, EmailSender};
use pvc_cabinets_api::handlers::AppState;
use pvc_cabinets_api::notification::Notification;
use pvc_cabinets_api::routes::router;
use pvc_cabinets_api::storage::{StorageError, Submission, SubmissionId, SubmissionStore};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, notification: &Notification) -> Result<DeliveryAck, DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Transport("connection reset".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(DeliveryAck {
            message_id: Some("test-message".to_string()),
        })
    }
}

#[derive(Default)]
struct RecordingStore {
    saved: Mutex<Vec<Submission>>,
    fail: bool,
}

#[async_trait]
impl SubmissionStore for RecordingStore {
    async fn save(&self, submission: &Submission) -> Result<SubmissionId, StorageError> {
        if self.fail {
            return Err(StorageError::Database("pool timed out".to_string()));
        }
        self.saved.lock().unwrap().push(submission.clone());
        Ok(SubmissionId(Uuid::new_v4()))
    }
}

struct TestApp {
    app: Router,
    sender: Arc<RecordingSender>,
    store: Arc<RecordingStore>,
}

fn test_app_with(sender: RecordingSender, store: RecordingStore) -> TestApp {
    let sender = Arc::new(sender);
    let store = Arc::new(store);
    let state = AppState::new(Config::default(), sender.clone(), store.clone());

    TestApp {
        app: router(Arc::new(state)),
        sender,
        store,
    }
}

fn test_app() -> TestApp {
    test_app_with(RecordingSender::default(), RecordingStore::default())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn contact_body() -> Value {
    json!({
        "name": "Jean Baptiste",
        "email": "jean@example.ht",
        "phone": "+509 3212 3456",
        "subject": "general",
        "message": "Mwen bezwen kabinè pou kwizin mwen."
    })
}

fn quote_body() -> Value {
    json!({
        "name": "Marie Joseph",
        "email": "marie@example.ht",
        "phone": "3712-4567",
        "address": "Pétion-Ville, Haiti",
        "projectType": "kitchen",
        "roomDimensions": { "length": 12, "width": 10, "height": 8 },
        "cabinetStyle": "modern",
        "finish": "white",
        "features": ["soft-close-hinges", "glass-doors"],
        "budget": "50000-75000",
        "timeline": "1-month"
    })
}

// ============ Contact ============

#[tokio::test]
async fn test_contact_success() {
    let t = test_app();
    let (status, body) = send(&t.app, post_json("/api/contact", &contact_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Contact form submitted successfully" })
    );

    let sent = t.sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "info@pvchaiti.com");
    assert_eq!(sent[0].subject, "PVC Cabinets Haiti - general: Jean Baptiste");
    assert!(sent[0].html.contains("Mwen bezwen kabinè pou kwizin mwen."));
    assert_eq!(t.store.saved.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_contact_missing_fields_never_sends() {
    let t = test_app();
    let body = json!({ "name": "Jean", "email": "", "phone": "   " });
    let (status, body) = send(&t.app, post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(
        body["missingFields"],
        json!(["email", "phone", "subject", "message"])
    );
    assert!(t.sender.sent.lock().unwrap().is_empty());
    assert!(t.store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_invalid_email() {
    let t = test_app();
    let mut body = contact_body();
    body["email"] = json!("jean@localhost");
    let (status, body) = send(&t.app, post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid email format" }));
    assert!(t.sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_invalid_subject() {
    let t = test_app();
    let mut body = contact_body();
    body["subject"] = json!("sales");
    let (status, body) = send(&t.app, post_json("/api/contact", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "subject");
}

#[tokio::test]
async fn test_malformed_body() {
    let t = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&t.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request body" }));
}

#[tokio::test]
async fn test_contact_delivery_failure_is_opaque_500() {
    let t = test_app_with(
        RecordingSender {
            fail: true,
            ..Default::default()
        },
        RecordingStore::default(),
    );
    let (status, body) = send(&t.app, post_json("/api/contact", &contact_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "Internal server error",
            "message": "Failed to process contact form submission"
        })
    );
}

#[tokio::test]
async fn test_quote_store_failure_is_opaque_500() {
    let t = test_app_with(
        RecordingSender::default(),
        RecordingStore {
            fail: true,
            ..Default::default()
        },
    );
    let (status, body) = send(&t.app, post_json("/api/quote", &quote_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to process quote request");
    assert!(t.sender.sent.lock().unwrap().is_empty());
}

// ============ Method handling ============

#[tokio::test]
async fn test_get_on_form_endpoints_is_405() {
    let t = test_app();
    for uri in ["/api/contact", "/api/quote"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(&t.app, request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn test_options_returns_empty_200() {
    let t = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/quote")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_cors_headers_on_response() {
    let t = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::ORIGIN, "https://pvchaiti.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(contact_body().to_string()))
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let t = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header(header::ORIGIN, "https://pvchaiti.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
}

// ============ Quote ============

#[tokio::test]
async fn test_quote_success_returns_estimate() {
    let t = test_app();
    let (status, body) = send(&t.app, post_json("/api/quote", &quote_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Quote request submitted successfully");
    assert_eq!(body["estimatedCost"], 65_340);
    assert_eq!(body["estimatedArea"], 120.0);

    let sent = t.sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "PVC Cabinets Haiti - Quote Request: Marie Joseph (kitchen)"
    );
    assert!(sent[0].html.contains("65,340 HTG"));

    let saved = t.store.saved.lock().unwrap();
    match &saved[0] {
        Submission::Quote { estimate, .. } => assert_eq!(estimate.estimated_cost, 65_340),
        other => panic!("unexpected submission {:?}", other),
    }
}

#[tokio::test]
async fn test_quote_without_dimensions_estimates_zero() {
    let t = test_app();
    let mut body = quote_body();
    body.as_object_mut().unwrap().remove("roomDimensions");
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimatedCost"], 0);
    assert_eq!(body["estimatedArea"], 0.0);

    let sent = t.sender.sent.lock().unwrap();
    assert!(!sent[0].html.contains("Preliminary Estimate"));
}

#[tokio::test]
async fn test_quote_missing_fields_in_order() {
    let t = test_app();
    let body = json!({ "name": "Marie", "email": "marie@example.ht", "phone": "3712-4567" });
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["missingFields"],
        json!(["address", "projectType", "cabinetStyle", "finish", "budget", "timeline"])
    );
    assert!(t.sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote_incomplete_dimensions() {
    let t = test_app();
    let mut body = quote_body();
    body["roomDimensions"] = json!({ "length": 12, "width": 10 });
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Incomplete room dimensions" }));
}

#[tokio::test]
async fn test_quote_invalid_email() {
    let t = test_app();
    let mut body = quote_body();
    body["email"] = json!("marie at example.ht");
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid email format" }));
    assert!(t.sender.sent.lock().unwrap().is_empty());
    assert!(t.store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote_overflowing_dimensions_rejected() {
    let t = test_app();
    let mut body = quote_body();
    body["roomDimensions"] = json!({ "length": 1e200, "width": 1e200, "height": 1 });
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid room dimensions" }));

    let mut body = quote_body();
    body["roomDimensions"] = json!({ "length": 1e9, "width": 1e9, "height": 8 });
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid room dimensions" }));
    assert!(t.sender.sent.lock().unwrap().is_empty());
    assert!(t.store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote_invalid_budget() {
    let t = test_app();
    let mut body = quote_body();
    body["budget"] = json!("cheap");
    let (status, body) = send(&t.app, post_json("/api/quote", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Invalid value for field", "field": "budget" })
    );
}

// ============ Projection & misc ============

#[tokio::test]
async fn test_projection_defaults() {
    let t = test_app();
    let request = Request::builder()
        .uri("/api/projection")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["years"].as_array().unwrap().len(), 5);
    assert_eq!(body["years"][0], json!({ "year": 1, "pvcCost": 55_080, "woodCost": 47_040 }));
    assert_eq!(body["pvcTotal"], 59_400);
    assert_eq!(body["woodTotal"], 98_700);
    assert_eq!(body["totalSavings"], 39_300);
}

#[tokio::test]
async fn test_projection_query_overrides() {
    let t = test_app();
    let request = Request::builder()
        .uri("/api/projection?kitchenSize=0")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSavings"], 0);
}

#[tokio::test]
async fn test_projection_rejects_negative_and_garbage() {
    let t = test_app();

    let request = Request::builder()
        .uri("/api/projection?humidityMultiplier=-2")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "humidityMultiplier");

    let request = Request::builder()
        .uri("/api/projection?kitchenSize=big")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid query parameters" }));
}

#[tokio::test]
async fn test_projection_rejects_overflowing_inputs() {
    let t = test_app();
    let request = Request::builder()
        .uri("/api/projection?kitchenSize=1e300&woodPricePerSqFt=1e300&woodMaintenancePercent=0")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Invalid value for field", "field": "kitchenSize" })
    );
}

#[tokio::test]
async fn test_health_and_openapi() {
    let t = test_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "pvc-cabinets-api");

    let request = Request::builder()
        .uri("/api-docs/openapi.yml")
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("/api/quote"));
}
