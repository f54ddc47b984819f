//! UI serving routes
//!
//! Serves the embedded single-page portfolio UI. The index template is
//! rendered against the section model in `page` so the nav always
//! matches the section anchors.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::page;

const INDEX_HTML: &str = include_str!("../ui/index.html");
const APP_JS: &str = include_str!("../ui/app.js");
const STYLE_CSS: &str = include_str!("../ui/style.css");

/// GET /
///
/// Serves the portfolio page with the nav rendered from the section model
pub async fn serve_index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    INDEX_HTML.replace("{{NAV_LINKS}}", &page::nav_links_html())
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /static/style.css
pub async fn serve_style_css() -> Response {
    (StatusCode::OK, [("content-type", "text/css")], STYLE_CSS).into_response()
}
