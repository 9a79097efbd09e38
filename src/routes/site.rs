// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Crawler files.

use crate::services::sitemap::{generate_sitemap, robots_txt};
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
}

async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let xml = generate_sitemap(&state.config.site_url, chrono::Utc::now());
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}

async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = robots_txt(state.config.site_env, &state.config.site_url);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}
