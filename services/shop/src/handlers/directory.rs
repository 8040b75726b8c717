//! Public lookups over the fixed division/district/city hierarchy.

use axum::{Json, Router, extract::Path, routing::get};

use medicart_domain::directory;

// ── GET /users/divisions ─────────────────────────────────────────────────────

pub async fn list_divisions() -> Json<Vec<&'static str>> {
    Json(directory::list_divisions())
}

// ── GET /users/districts/{division} ──────────────────────────────────────────

pub async fn list_districts(Path(division): Path<String>) -> Json<Vec<&'static str>> {
    Json(directory::list_districts(&division))
}

// ── GET /users/cities/{division}/{district} ──────────────────────────────────

pub async fn list_cities(
    Path((division, district)): Path<(String, String)>,
) -> Json<Vec<&'static str>> {
    Json(directory::list_cities(&division, &district))
}

/// Directory routes. Stateless, so they merge into any router.
pub fn directory_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/users/divisions", get(list_divisions))
        .route("/users/districts/{division}", get(list_districts))
        .route("/users/cities/{division}/{district}", get(list_cities))
}
