//! HTTP API handlers for folio-web

pub mod health;
pub mod recommendations;
pub mod ui;

pub use health::health_routes;
pub use recommendations::{list_recommendations, submit_recommendation};
pub use ui::{serve_app_js, serve_index, serve_style_css};
