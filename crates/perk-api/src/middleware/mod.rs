//! Middleware stack for the API server
//!
//! Request IDs, tracing spans, timeouts, a global rate limit and CORS.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use perk_common::{CorsConfig, RateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::extractors::ADMIN_KEY_HEADER;
use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// HTTP span carrying method, URI and the generated request id.
fn make_http_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Basic stack shared by every route: request id generation/propagation,
/// trace span, timeout answered with 503. Health probes run only this, so
/// they are never shed by the rate limiter.
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    // ServiceBuilder runs layers top-down for requests, so the id is set
    // before the span tries to read it.
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_http_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            )),
    )
}

/// Full stack for the public API: the basic stack plus a global rate limit
/// and CORS.
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    // GlobalKeyExtractor limits the whole deployment rather than per-IP;
    // a single-store kiosk sits behind one NAT anyway.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(rate_limit_config.requests_per_second.into())
            .burst_size(rate_limit_config.burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("Failed to create rate limiter configuration"),
    );

    apply_middleware(router.layer(create_cors_layer(cors_config, is_production))).layer(
        GovernorLayer {
            config: governor_conf,
        },
    )
}

/// CORS policy from configuration
///
/// Production requires an explicit origin allow-list; development falls
/// back to `Any` when none is configured.
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(ADMIN_KEY_HEADER),
            request_id_header(),
        ])
        .expose_headers([request_id_header()]);

    if config.allowed_origins.is_empty() {
        if is_production {
            tracing::warn!(
                "CORS: no allowed origins configured in production; browser requests will be blocked"
            );
            base.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            tracing::warn!("CORS: allowing any origin (development mode)");
            base.allow_origin(Any)
        }
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                let parsed = origin.parse::<HeaderValue>().ok();
                if parsed.is_none() {
                    tracing::warn!("CORS: skipping invalid origin {origin}");
                }
                parsed
            })
            .collect();
        tracing::info!("CORS: allowing {} configured origins", origins.len());
        base.allow_origin(AllowOrigin::list(origins))
    }
}
