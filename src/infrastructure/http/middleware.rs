//! HTTP Middleware
//!
//! 访问日志中间件：记录每个请求的耗时，慢请求与非 2xx 状态单独告警

use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

/// 超过该耗时的请求按慢请求告警（语言模型与 TTS 调用通常在数秒内）
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(10);

/// 访问日志中间件
///
/// 业务错误走 200 + errno，在 ApiError::into_response() 中记录；
/// 这里只关心耗时和传输层状态码（如路由不存在、请求体过大）
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else if started.elapsed() >= SLOW_REQUEST_THRESHOLD {
        tracing::warn!(method = %method, uri = %uri, elapsed_ms, "Slow request");
    } else {
        tracing::debug!(method = %method, uri = %uri, elapsed_ms, "Request completed");
    }

    response
}
