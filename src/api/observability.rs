use crate::api::AppState;
use crate::api::error::ErrorKind;
use crate::domain::FlavorId;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, field, info, info_span, warn};
use uuid::Uuid;

/// `GET /api/metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Tags the current request event with the flavor it touched.
pub fn record_flavor_id(id: FlavorId) {
    Span::current().record("flavor_id", id.value());
}

/// One event per flavor request: route, flavor id, status and, on failure,
/// the [`ErrorKind`] the handler returned. Also feeds the HTTP metrics.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_string();

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        %method,
        %route,
        flavor_id = field::Empty,
        error_kind = field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let status = response.status();
        let elapsed = start.elapsed();

        let labels = [
            ("method", method.to_string()),
            ("path", route),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match response.extensions().get::<ErrorKind>() {
            Some(ErrorKind(kind)) => {
                Span::current().record("error_kind", *kind);
                warn!(status = status.as_u16(), duration_ms, "Flavor request failed");
            }
            None => info!(status = status.as_u16(), duration_ms, "Flavor request served"),
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    async fn fails() -> ApiError {
        ApiError::validation("Flavor name is required")
    }

    async fn tagged() -> StatusCode {
        record_flavor_id(FlavorId::new(7).unwrap());
        StatusCode::NO_CONTENT
    }

    #[tokio::test]
    async fn test_middleware_passes_responses_through() {
        let app = Router::new()
            .route("/fails", get(fails))
            .route("/tagged/{id}", get(tagged))
            .route_layer(middleware::from_fn(logging_middleware));

        let response = app
            .clone()
            .oneshot(Request::get("/fails").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.extensions().get::<ErrorKind>(),
            Some(&ErrorKind("validation"))
        );

        let response = app
            .oneshot(Request::get("/tagged/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.extensions().get::<ErrorKind>().is_none());
    }
}
