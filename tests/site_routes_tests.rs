// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Crawler file and health route tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use f3rva_site::config::{Config, SiteEnv};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{body_json, body_text, FakeArchive};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn app_for(env: SiteEnv) -> axum::Router {
    let config = Config {
        site_env: env,
        ..Config::test_default()
    };
    common::create_test_app_with(config, Arc::new(FakeArchive::with_listing(Vec::new()))).0
}

#[tokio::test]
async fn test_health() {
    let response = app_for(SiteEnv::Dev).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_sitemap() {
    let response = app_for(SiteEnv::Prod)
        .oneshot(get("/sitemap.xml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/xml"));

    let xml = body_text(response).await;
    assert_eq!(xml.matches("<url>").count(), 5);
    assert!(xml.contains("<loc>https://f3rva.org/schedule</loc>"));
    assert!(xml.contains("<loc>https://f3rva.org/archives</loc>"));
}

#[tokio::test]
async fn test_robots_dev_blocks_crawlers() {
    let response = app_for(SiteEnv::Dev)
        .oneshot(get("/robots.txt"))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Disallow: /"));
    assert!(!body.contains("Sitemap:"));
}

#[tokio::test]
async fn test_robots_prod_advertises_sitemap() {
    let response = app_for(SiteEnv::Prod)
        .oneshot(get("/robots.txt"))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Allow: /"));
    assert!(body.contains("Sitemap: https://f3rva.org/sitemap.xml"));
}

#[tokio::test]
async fn test_security_headers_on_routes() {
    let response = app_for(SiteEnv::Dev).oneshot(get("/health")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert!(headers.get("Content-Security-Policy").is_some());
}
