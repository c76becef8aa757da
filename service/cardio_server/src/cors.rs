use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Browser access for the configured origins, with credentials.
///
/// Trailing slashes are stripped since browsers never send them in `Origin`.
/// A lone `*` switches to any-origin mode, which cannot carry credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let mut allowed = Vec::new();
    for raw in origins {
        let origin = raw.trim().trim_end_matches('/');
        if origin.is_empty() {
            continue;
        }
        match origin.parse::<HeaderValue>() {
            Ok(v) => allowed.push(v),
            Err(e) => log::warn!("skipping invalid CORS origin {origin:?}: {e}"),
        }
    }
    log::debug!("CORS origins: {allowed:?}");

    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}
