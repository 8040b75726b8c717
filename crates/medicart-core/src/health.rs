use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness only.
///
/// Readiness depends on each service's backing stores, so services provide
/// their own `GET /readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
