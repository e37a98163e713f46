use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Redirect, Response},
    routing::get,
    Router,
};
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_BASE_PATH: &str = "/My-portfolio/";
const DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const ASSET_CACHE_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";
const HTML_CACHE_CONTROL: &str = "no-cache";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Ordered by verbosity: a configured level lets through itself and
/// everything after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

/// Where the built site lives and how it is exposed.
#[derive(Clone, Debug)]
struct ServeConfig {
    port: u16,
    dist_dir: PathBuf,
    /// Normalized URL prefix: empty for the root, otherwise `/a/b`.
    base_path: String,
    asset_cache_max_age_seconds: u64,
    log_level: LogLevel,
}

impl ServeConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let dist_dir = parse_env_non_empty_string("SITE_DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let base_path = normalize_base_path(
            &parse_env_non_empty_string("SITE_BASE_PATH")
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        );
        let asset_cache_max_age_seconds = parse_env_u64_with_bounds(
            "ASSET_CACHE_MAX_AGE_SECONDS",
            DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS,
            ASSET_CACHE_MAX_AGE_SECONDS_BOUNDS,
        );
        let log_level = parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL);

        Self {
            port,
            dist_dir,
            base_path,
            asset_cache_max_age_seconds,
            log_level,
        }
    }

    fn asset_cache_control(&self) -> String {
        format!(
            "public, max-age={}, immutable",
            self.asset_cache_max_age_seconds
        )
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(ServeConfig::from_env());
    let bind_address = format!("0.0.0.0:{}", config.port);
    let app = build_router(Arc::clone(&config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        config.log_level,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({
            "url": format!("http://127.0.0.1:{}{}/", config.port, config.base_path),
            "dist_dir": config.dist_dir.display().to_string(),
        }),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_event(
        config.log_level,
        LogLevel::Info,
        "server_stopped",
        serde_json::json!({}),
    );
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn build_router(config: Arc<ServeConfig>) -> Router {
    let static_service = ServeDir::new(&config.dist_dir)
        .fallback(ServeFile::new(config.dist_dir.join("index.html")));

    let router = if config.base_path.is_empty() {
        Router::new().fallback_service(static_service)
    } else {
        let site_root = format!("{}/", config.base_path);
        Router::new()
            .route(
                "/",
                get(move || {
                    let site_root = site_root.clone();
                    async move { Redirect::permanent(&site_root) }
                }),
            )
            .nest_service(&config.base_path, static_service)
    };

    router.layer(middleware::from_fn_with_state(config, track_request))
}

/// Stamps caching and request-id headers onto every response and logs it.
async fn track_request(
    State(config): State<Arc<ServeConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    if let Some(value) = cache_control_for(&config, status, response.headers()) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    if let Ok(request_id_header) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, request_id_header);
    }

    let level = if status.is_success() || status.is_redirection() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log_event(
        config.log_level,
        level,
        "request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method,
            "path": path,
            "status": status.as_u16(),
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );

    response
}

fn is_html_response(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

/// Documents always revalidate so a deploy is picked up immediately; every
/// other file carries a content hash and may be cached for good.
fn cache_control_for(
    config: &ServeConfig,
    status: StatusCode,
    headers: &HeaderMap,
) -> Option<HeaderValue> {
    if !(status.is_success() || status == StatusCode::NOT_MODIFIED) {
        return None;
    }

    if is_html_response(headers) {
        return Some(HeaderValue::from_static(HTML_CACHE_CONTROL));
    }

    HeaderValue::from_str(&config.asset_cache_control()).ok()
}

/// `My-portfolio`, `/My-portfolio/` and `//My-portfolio//` all become
/// `/My-portfolio`; the root becomes the empty string.
fn normalize_base_path(raw: &str) -> String {
    let segments: Vec<&str> = raw
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(name: &str, default: LogLevel) -> LogLevel {
    match parse_env_non_empty_string(name)
        .map(|value| value.to_ascii_lowercase())
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", since_epoch().as_millis())
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

fn event_line(level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut line = serde_json::json!({
        "ts": since_epoch().as_secs(),
        "level": level.as_str(),
        "event": event,
    });
    if let (Some(line), serde_json::Value::Object(extra)) = (line.as_object_mut(), fields) {
        line.extend(extra);
    }
    line
}

/// One JSON object per line on stdout, dropped when `level` is below the
/// configured `threshold`.
fn log_event(threshold: LogLevel, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level >= threshold {
        println!("{}", event_line(level, event, fields));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_config(dist_dir: PathBuf, base_path: &str) -> ServeConfig {
        ServeConfig {
            port: 0,
            dist_dir,
            base_path: normalize_base_path(base_path),
            asset_cache_max_age_seconds: DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    fn write_site(name: &str) -> PathBuf {
        let dist_dir = std::env::temp_dir().join(format!(
            "portfolio-serve-{name}-{}",
            std::process::id()
        ));
        fs::create_dir_all(dist_dir.join("assets")).expect("create dist dir");
        fs::write(dist_dir.join("index.html"), "<!doctype html><title>home</title>")
            .expect("write index");
        fs::write(dist_dir.join("assets/app-3f2a.js"), "console.log('hi');")
            .expect("write asset");
        dist_dir
    }

    async fn get(config: ServeConfig, path: &str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("local addr");
        let app = build_router(Arc::new(config));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let mut stream = tokio::net::TcpStream::connect(address)
            .await
            .expect("connect to test server");
        let request =
            format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream
            .write_all(request.as_bytes())
            .await
            .expect("send request");

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.expect("read response");
        String::from_utf8_lossy(&raw).to_ascii_lowercase()
    }

    fn cleanup(dist_dir: &Path) {
        let _ = fs::remove_dir_all(dist_dir);
    }

    #[test]
    fn base_path_normalizes_slashes() {
        assert_eq!(normalize_base_path("/My-portfolio/"), "/My-portfolio");
        assert_eq!(normalize_base_path("My-portfolio"), "/My-portfolio");
        assert_eq!(normalize_base_path(" //site//nested/ "), "/site/nested");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn html_revalidates_and_assets_are_immutable() {
        let config = test_config(PathBuf::from("dist"), DEFAULT_BASE_PATH);

        let mut html = HeaderMap::new();
        html.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        assert_eq!(
            cache_control_for(&config, StatusCode::OK, &html),
            Some(HeaderValue::from_static("no-cache"))
        );

        let mut script = HeaderMap::new();
        script.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/javascript"));
        assert_eq!(
            cache_control_for(&config, StatusCode::OK, &script),
            Some(HeaderValue::from_static("public, max-age=31536000, immutable"))
        );

        assert_eq!(cache_control_for(&config, StatusCode::NOT_FOUND, &script), None);
    }

    #[test]
    fn request_id_header_is_reused_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
    }

    #[test]
    fn unset_env_falls_back_to_defaults() {
        assert_eq!(
            parse_env_u64_with_bounds("PORTFOLIO_TEST_UNSET_U64", 42, (0, 100)),
            42
        );
        assert_eq!(
            parse_log_level("PORTFOLIO_TEST_UNSET_LEVEL", LogLevel::Debug),
            LogLevel::Debug
        );
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn event_line_merges_fields_after_envelope() {
        let line = event_line(
            LogLevel::Debug,
            "request_complete",
            serde_json::json!({ "status": 200, "path": "/My-portfolio/" }),
        );

        assert_eq!(line["level"], "debug");
        assert_eq!(line["event"], "request_complete");
        assert_eq!(line["status"], 200);
        assert_eq!(line["path"], "/My-portfolio/");
        assert!(line["ts"].is_u64());
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[tokio::test]
    async fn hashed_asset_is_served_with_long_cache() {
        let dist_dir = write_site("asset");
        let response = get(
            test_config(dist_dir.clone(), DEFAULT_BASE_PATH),
            "/My-portfolio/assets/app-3f2a.js",
        )
        .await;
        cleanup(&dist_dir);

        assert!(response.starts_with("http/1.1 200"), "{response}");
        assert!(response.contains("cache-control: public, max-age=31536000, immutable"));
        assert!(response.contains("x-request-id: req-"));
        assert!(response.contains("console.log('hi');"));
    }

    #[tokio::test]
    async fn unknown_route_falls_back_to_index() {
        let dist_dir = write_site("fallback");
        let response = get(
            test_config(dist_dir.clone(), DEFAULT_BASE_PATH),
            "/My-portfolio/projects/unknown",
        )
        .await;
        cleanup(&dist_dir);

        assert!(response.starts_with("http/1.1 200"), "{response}");
        assert!(!response.contains("404"), "{response}");
        assert!(response.contains("cache-control: no-cache"));
        assert!(response.contains("<title>home</title>"));
    }

    #[tokio::test]
    async fn root_redirects_to_base_path() {
        let dist_dir = write_site("redirect");
        let response = get(test_config(dist_dir.clone(), DEFAULT_BASE_PATH), "/").await;
        cleanup(&dist_dir);

        assert!(response.starts_with("http/1.1 308"), "{response}");
        assert!(response.contains("location: /my-portfolio/"));
    }

    #[tokio::test]
    async fn root_base_path_serves_from_top_level() {
        let dist_dir = write_site("root");
        let response = get(test_config(dist_dir.clone(), "/"), "/assets/app-3f2a.js").await;
        cleanup(&dist_dir);

        assert!(response.starts_with("http/1.1 200"), "{response}");
        assert!(response.contains("console.log('hi');"));
    }
}
