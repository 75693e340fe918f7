//! HTTP layers shared by every route.
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// The browser front end is served from another origin.
pub fn cors() -> CorsLayer {
    CorsLayer::permissive().max_age(Duration::from_secs(3600))
}
