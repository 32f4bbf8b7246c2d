//! CORS layer built from [`CorsConfig`].

use crate::domain::config::CorsConfig;
use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Create CORS layer from service config.
///
/// A `*` origin with credentials mirrors the caller's origin, methods and
/// headers instead of sending literal wildcards, which browsers refuse
/// alongside `Access-Control-Allow-Credentials`.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = CorsLayer::new().max_age(Duration::from_secs(config.max_age));

    if wildcard && config.allow_credentials {
        return cors
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);
    }

    if wildcard {
        cors = cors.allow_origin(AllowOrigin::any());
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors = cors
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Credentials with an explicit list only
    if config.allow_credentials && !wildcard {
        cors = cors.allow_credentials(true);
    }

    cors
}
