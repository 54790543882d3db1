//! Front-end asset delivery.
//!
//! The admin dashboard is always served fresh; every other path is a static
//! file from the front-end directory, falling back to `index.html` so the
//! single-page app can handle its own routing.

use std::path::Path;

use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;

pub const ADMIN_PAGE: &str = "admin.html";
pub const INDEX_PAGE: &str = "index.html";

const NO_CACHE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// `/admin` and `/admin.html` with caching disabled.
pub fn admin_router(frontend_dir: &Path) -> Router<AppState> {
    let admin_page = ServeFile::new(frontend_dir.join(ADMIN_PAGE));

    Router::new()
        .route_service("/admin", admin_page.clone())
        .route_service("/admin.html", admin_page)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(NO_CACHE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("surrogate-control"),
            HeaderValue::from_static("no-store"),
        ))
}

/// Static files with the SPA fallback; mounted as the router's fallback.
pub fn static_assets(frontend_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(frontend_dir).fallback(ServeFile::new(frontend_dir.join(INDEX_PAGE)))
}
