//! folio-web library - personal portfolio site with visitor recommendations
//!
//! Serves the embedded single-page portfolio UI and the recommendations
//! API. Persistence lives in a remote document store behind the
//! `RecommendationStore` trait; handlers only see the trait object, so
//! tests run against the in-process store.

use std::sync::Arc;

use axum::Router;

pub mod api;
pub mod config;
pub mod error;
pub mod page;
pub mod store;
pub mod validate;
pub mod workflow;

pub use error::{Error, Result};

use store::RecommendationStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Recommendation store (remote document database or in-process)
    pub store: Arc<dyn RecommendationStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        Self { store }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/style.css", get(api::serve_style_css))
        .route(
            "/api/recommendations",
            get(api::list_recommendations).post(api::submit_recommendation),
        )
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
