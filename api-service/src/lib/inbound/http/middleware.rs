use std::any::Any;
use std::net::SocketAddr;
use std::time::Duration;
use std::time::Instant;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

/// Wraps every request in a span carrying a fresh time-ordered `req_id`
/// and logs its outcome.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let req_id = Uuid::now_v7();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let client_ip = client_ip(&req);

    let span = tracing::info_span!(
        "request",
        req_id = %req_id,
        ip = %client_ip,
        method = %method,
        path = %path,
    );

    async move {
        let started = Instant::now();
        let mut response = next.run(req).await;
        let elapsed = started.elapsed();

        let status = response.status().as_u16();
        let elapsed_ms = elapsed.as_millis() as u64;
        if is_slow(elapsed) {
            tracing::warn!(elapsed_ms, "Slow request");
        }
        tracing::info!(status, elapsed_ms, "Request completed");

        if let Ok(value) = HeaderValue::from_str(&req_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

fn is_slow(elapsed: Duration) -> bool {
    elapsed > SLOW_REQUEST_THRESHOLD
}

/// First `x-forwarded-for` entry, else the peer address when the server was
/// started with connect info.
fn client_ip(req: &Request) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = message, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal Server Error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;
    use std::sync::Mutex;

    use axum::http;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn logged_request(handler_delay: Duration) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = Router::new()
            .route(
                "/",
                get(move || async move {
                    tokio::time::sleep(handler_delay).await;
                    StatusCode::OK
                }),
            )
            .layer(axum::middleware::from_fn(log_requests));

        let response = app
            .oneshot(http::Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        logs.contents()
    }

    #[tokio::test]
    async fn test_slow_request_logs_warning_and_completion() {
        let output = logged_request(Duration::from_millis(1100)).await;

        assert!(output.contains("Slow request"), "{output}");
        assert!(output.contains("Request completed"), "{output}");
    }

    #[tokio::test]
    async fn test_fast_request_logs_completion_only() {
        let output = logged_request(Duration::ZERO).await;

        assert!(!output.contains("Slow request"), "{output}");
        assert!(output.contains("Request completed"), "{output}");
    }

    #[test]
    fn test_slow_threshold() {
        assert!(!is_slow(Duration::from_millis(999)));
        assert!(!is_slow(Duration::from_secs(1)));
        assert!(is_slow(Duration::from_millis(1001)));
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let req = http::Request::builder()
            .header("x-forwarded-for", " 203.0.113.7 , 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_socket() {
        let mut req = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&req), "unknown");

        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_ip(&req), "192.0.2.1");
    }

    #[test]
    fn test_panic_becomes_internal_server_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
