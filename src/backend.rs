mod contact;
mod sitemap;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use reqwest::redirect::Policy;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_URL: &str = "https://blik-studio.cz";
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_CONTACT_WEBHOOK_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_CONTACT_MAX_BODY_BYTES: usize = 16 * 1024;
const DEFAULT_LOG_LEVEL: &str = "info";

const CONTACT_WEBHOOK_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 60_000);
const CONTACT_MAX_BODY_BYTES_BOUNDS: (usize, usize) = (1_024, 1024 * 1024);
const WEBHOOK_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const USER_AGENT: &str = "blik-studio-contact/1.0";
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug)]
pub(crate) struct SiteConfig {
    port: u16,
    site_url: String,
    static_dir: PathBuf,
    contact_webhook_url: Option<Url>,
    contact_webhook_token: Option<String>,
    contact_webhook_timeout: Duration,
    contact_max_body_bytes: usize,
    log_level: &'static str,
}

impl SiteConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let site_url = parse_env_http_url("SITE_URL")
            .map(|url| url.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let static_dir = parse_env_non_empty_string("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let contact_webhook_url = parse_env_http_url("CONTACT_WEBHOOK_URL");
        let contact_webhook_token = parse_env_non_empty_string("CONTACT_WEBHOOK_TOKEN");
        let contact_webhook_timeout_ms = parse_env_u64_with_bounds(
            "CONTACT_WEBHOOK_TIMEOUT_MS",
            DEFAULT_CONTACT_WEBHOOK_TIMEOUT_MS,
            CONTACT_WEBHOOK_TIMEOUT_MS_BOUNDS,
        );
        let contact_max_body_bytes = parse_env_usize_with_bounds(
            "CONTACT_MAX_BODY_BYTES",
            DEFAULT_CONTACT_MAX_BODY_BYTES,
            CONTACT_MAX_BODY_BYTES_BOUNDS,
        );
        let log_level = parse_log_level("LOG_LEVEL");

        Self {
            port,
            site_url,
            static_dir,
            contact_webhook_url,
            contact_webhook_token,
            contact_webhook_timeout: Duration::from_millis(contact_webhook_timeout_ms),
            contact_max_body_bytes,
            log_level,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            site_url: DEFAULT_SITE_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            contact_webhook_url: None,
            contact_webhook_token: None,
            contact_webhook_timeout: Duration::from_millis(DEFAULT_CONTACT_WEBHOOK_TIMEOUT_MS),
            contact_max_body_bytes: DEFAULT_CONTACT_MAX_BODY_BYTES,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    config: Arc<SiteConfig>,
    client: reqwest::Client,
}

impl AppState {
    fn new(config: SiteConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.contact_webhook_timeout)
            .connect_timeout(WEBHOOK_CONNECT_TIMEOUT.min(config.contact_webhook_timeout))
            .redirect(Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build webhook client")?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub async fn run() -> anyhow::Result<()> {
    let config = SiteConfig::from_env();
    init_tracing(config.log_level)?;

    let bind_address = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        site_url = %config.site_url,
        static_dir = %config.static_dir.display(),
        webhook_configured = config.contact_webhook_url.is_some(),
        "starting server"
    );

    let app = router(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!(address = %bind_address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{default_level},tower_http=warn").into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to install tracing subscriber")
}

pub(crate) fn router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let static_service =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    let body_limit = state.config.contact_max_body_bytes;

    Router::new()
        .route(
            "/api/contact",
            post(contact::post_contact).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/sitemap.xml", get(sitemap::get_sitemap))
        .route("/healthz", get(healthz))
        .fallback_service(static_service)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_usize_with_bounds(name: &str, default: usize, bounds: (usize, usize)) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env_http_url(name: &str) -> Option<Url> {
    let value = parse_env_non_empty_string(name)?;
    parse_http_url(&value)
}

fn parse_http_url(value: &str) -> Option<Url> {
    let parsed = Url::parse(value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

fn parse_log_level(name: &str) -> &'static str {
    let value = parse_env_non_empty_string(name).map(|value| value.to_ascii_lowercase());
    match value.as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => DEFAULT_LOG_LEVEL,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn response_with_request_id(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: impl IntoResponse,
    request_id: &str,
) -> axum::response::Response {
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, payload).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let static_dir = std::env::temp_dir().join(format!("blik-studio-static-{}", generate_request_id()));
        std::fs::create_dir_all(&static_dir).expect("static dir");
        std::fs::write(static_dir.join("index.html"), "<!doctype html><div id=\"app\"></div>")
            .expect("index.html");

        AppState::new(SiteConfig {
            static_dir,
            ..SiteConfig::default()
        })
        .expect("state")
    }

    #[test]
    fn request_id_is_propagated_or_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
        assert_ne!(generated, resolve_request_id(&HeaderMap::new()));
    }

    #[test]
    fn only_http_urls_are_accepted() {
        assert!(parse_http_url("https://hooks.example.com/contact").is_some());
        assert!(parse_http_url("ftp://example.com").is_none());
        assert!(parse_http_url("not a url").is_none());
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let name = "BLIK_STUDIO_TEST_TIMEOUT_MS";
        std::env::set_var(name, "5");
        assert_eq!(
            parse_env_u64_with_bounds(name, DEFAULT_CONTACT_WEBHOOK_TIMEOUT_MS, CONTACT_WEBHOOK_TIMEOUT_MS_BOUNDS),
            DEFAULT_CONTACT_WEBHOOK_TIMEOUT_MS
        );
        std::env::set_var(name, " 750 ");
        assert_eq!(
            parse_env_u64_with_bounds(name, DEFAULT_CONTACT_WEBHOOK_TIMEOUT_MS, CONTACT_WEBHOOK_TIMEOUT_MS_BOUNDS),
            750
        );
        std::env::remove_var(name);
    }

    #[test]
    fn unknown_log_level_uses_default() {
        let name = "BLIK_STUDIO_TEST_LOG_LEVEL";
        std::env::set_var(name, "LOUD");
        assert_eq!(parse_log_level(name), DEFAULT_LOG_LEVEL);
        std::env::set_var(name, "Debug");
        assert_eq!(parse_log_level(name), "debug");
        std::env::remove_var(name);
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let response = router(test_state())
            .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_index() {
        let response = router(test_state())
            .oneshot(
                Request::get("/projects/fitconnect-ios")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 4096).await.expect("body");
        assert!(String::from_utf8_lossy(&body).contains("id=\"app\""));
    }
}
