use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use blik_studio::contact::{ContactForm, ValidationError};
use futures_util::StreamExt;
use serde::Serialize;
use thiserror::Error;

use super::{resolve_request_id, response_with_request_id, AppState, REQUEST_ID_HEADER};

/// Webhook responses are only read for logging.
const WEBHOOK_RESPONSE_MAX_BYTES: usize = 4 * 1024;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ContactResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ContactResponse {
    fn accepted() -> Self {
        Self { ok: true, error: None }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    #[serde(flatten)]
    form: &'a ContactForm,
    submitted_at: String,
    request_id: &'a str,
}

#[derive(Debug, Error)]
enum WebhookError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook answered with status {status}")]
    Status { status: u16, body: String },
}

pub(super) async fn post_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let request_id = resolve_request_id(&headers);

    let form = match parse_submission(&body) {
        Ok(form) => form,
        Err(message) => {
            tracing::info!(request_id = %request_id, reason = %message, "contact submission rejected");
            return response_with_request_id(
                StatusCode::UNPROCESSABLE_ENTITY,
                HeaderMap::new(),
                Json(ContactResponse::failed(message)),
                &request_id,
            );
        }
    };

    let Some(webhook_url) = state.config.contact_webhook_url.as_ref() else {
        tracing::warn!(
            request_id = %request_id,
            name = %form.name,
            email = %form.email,
            message_chars = form.message.chars().count(),
            "contact webhook not configured; submission logged only"
        );
        return response_with_request_id(
            StatusCode::OK,
            HeaderMap::new(),
            Json(ContactResponse::accepted()),
            &request_id,
        );
    };

    match forward_submission(&state, webhook_url, &form, &request_id).await {
        Ok(()) => {
            tracing::info!(request_id = %request_id, "contact submission forwarded");
            response_with_request_id(
                StatusCode::OK,
                HeaderMap::new(),
                Json(ContactResponse::accepted()),
                &request_id,
            )
        }
        Err(error) => {
            match &error {
                WebhookError::Status { status, body } => tracing::error!(
                    request_id = %request_id,
                    status,
                    body = %body,
                    "contact webhook rejected submission"
                ),
                WebhookError::Request(source) => tracing::error!(
                    request_id = %request_id,
                    timeout = source.is_timeout(),
                    error = %source,
                    "contact webhook unreachable"
                ),
            }
            response_with_request_id(
                StatusCode::BAD_GATEWAY,
                HeaderMap::new(),
                Json(ContactResponse::failed("delivery failed")),
                &request_id,
            )
        }
    }
}

fn parse_submission(body: &[u8]) -> Result<ContactForm, String> {
    let form: ContactForm =
        serde_json::from_slice(body).map_err(|_| "invalid request body".to_string())?;
    let form = form.trimmed();
    form.validate().map_err(|error: ValidationError| error.to_string())?;
    Ok(form)
}

async fn forward_submission(
    state: &AppState,
    webhook_url: &url::Url,
    form: &ContactForm,
    request_id: &str,
) -> Result<(), WebhookError> {
    let payload = WebhookPayload {
        form,
        submitted_at: chrono::Utc::now().to_rfc3339(),
        request_id,
    };

    let mut request = state
        .client
        .post(webhook_url.clone())
        .header(REQUEST_ID_HEADER, request_id)
        .json(&payload);
    if let Some(token) = state.config.contact_webhook_token.as_ref() {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = read_limited_body(response, WEBHOOK_RESPONSE_MAX_BYTES)
        .await
        .unwrap_or_else(|reason| reason.to_string());
    Err(WebhookError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_limited_body(
    response: reqwest::Response,
    max_response_bytes: usize,
) -> Result<String, &'static str> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(1024);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|_| "failed reading response body")?;

        if body.len() + chunk.len() > max_response_bytes {
            return Err("response body too large");
        }

        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).to_string())
}

#[cfg(test)]
mod tests {
    use super::super::{router, SiteConfig};
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        routing::post,
        Router,
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Debug, Clone)]
    struct Delivered {
        authorization: Option<String>,
        request_id: Option<String>,
        body: serde_json::Value,
    }

    /// Local webhook that records deliveries and answers with `status`.
    async fn spawn_webhook(status: StatusCode) -> (url::Url, Arc<Mutex<Vec<Delivered>>>) {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = delivered.clone();
        let app = Router::new().route(
            "/hook",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let sink = sink.clone();
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|value| value.to_str().ok())
                            .map(ToString::to_string)
                    };
                    sink.lock().await.push(Delivered {
                        authorization: header("authorization"),
                        request_id: header(REQUEST_ID_HEADER),
                        body,
                    });
                    (status, "recorded")
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = url::Url::parse(&format!("http://{address}/hook")).expect("url");
        (url, delivered)
    }

    fn app(config: SiteConfig) -> Router {
        router(AppState::new(config).expect("state"))
    }

    fn submission(body: serde_json::Value) -> Request<Body> {
        Request::post("/api/contact")
            .header("content-type", "application/json")
            .header(REQUEST_ID_HEADER, "req-test")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "name": " Jana ",
            "email": "jana@example.cz",
            "message": "New website for our pension."
        })
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 16 * 1024).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn submission_without_webhook_is_accepted() {
        let response = app(SiteConfig::default())
            .oneshot(submission(valid_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-test")
        );
        assert_eq!(json_body(response).await, serde_json::json!({ "ok": true }));
    }

    #[tokio::test]
    async fn invalid_submission_is_unprocessable() {
        let response = app(SiteConfig::default())
            .oneshot(submission(serde_json::json!({
                "name": "Jana",
                "email": "not-an-email",
                "message": "Hello"
            })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "email address is not valid");
    }

    #[tokio::test]
    async fn malformed_json_is_unprocessable() {
        let request = Request::post("/api/contact")
            .body(Body::from("{not json"))
            .expect("request");
        let response = app(SiteConfig::default()).oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = SiteConfig {
            contact_max_body_bytes: 1_024,
            ..SiteConfig::default()
        };
        let response = app(config)
            .oneshot(submission(serde_json::json!({
                "name": "Jana",
                "email": "jana@example.cz",
                "message": "x".repeat(4_096)
            })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn submission_is_forwarded_with_token() {
        let (url, delivered) = spawn_webhook(StatusCode::NO_CONTENT).await;
        let config = SiteConfig {
            contact_webhook_url: Some(url),
            contact_webhook_token: Some("secret".to_string()),
            ..SiteConfig::default()
        };

        let response = app(config)
            .oneshot(submission(valid_body()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let delivered = delivered.lock().await;
        assert_eq!(delivered.len(), 1);
        let delivery = &delivered[0];
        assert_eq!(delivery.authorization.as_deref(), Some("Bearer secret"));
        assert_eq!(delivery.request_id.as_deref(), Some("req-test"));
        assert_eq!(delivery.body["name"], "Jana");
        assert_eq!(delivery.body["requestId"], "req-test");
        assert!(delivery.body["submittedAt"].is_string());
    }

    #[tokio::test]
    async fn webhook_failure_is_bad_gateway() {
        let (url, delivered) = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
        let config = SiteConfig {
            contact_webhook_url: Some(url),
            ..SiteConfig::default()
        };

        let response = app(config)
            .oneshot(submission(valid_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["ok"], false);
        assert!(delivered.lock().await[0].authorization.is_none());
    }

    #[tokio::test]
    async fn unreachable_webhook_is_bad_gateway() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("address");
        drop(listener);

        let config = SiteConfig {
            contact_webhook_url: Some(url::Url::parse(&format!("http://{address}/hook")).expect("url")),
            ..SiteConfig::default()
        };
        let response = app(config)
            .oneshot(submission(valid_body()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
