use axum::http::{HeaderName, HeaderValue, Method};
use pixelpress_config::CorsConfig;
use tower_http::cors::{Any, CorsLayer};

/// Build a CORS layer from the server configuration.
///
/// A `*` origin allows any origin (credentials are then never allowed).
/// Unparseable entries are skipped with a warning.
pub fn cors_layer_with_config(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();
    let wildcard = config.allowed_origins.iter().any(|o| o == "*");

    if wildcard {
        cors = cors.allow_origin(Any);
        tracing::warn!("CORS configured to allow any origin");
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();
    cors = cors.allow_headers(headers);

    if config.allow_credentials && !wildcard {
        cors = cors.allow_credentials(true);
    }

    cors.max_age(config.max_age)
}
