// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Archive API client tests against a local stand-in API server.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use f3rva_site::services::{
    ArchiveApiClient, ArchiveScope, ArchiveSource, FetchError, ListingRequest, PageSize, PostKey,
};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

type Params = Query<HashMap<String, String>>;

fn listing_item(id: u64) -> serde_json::Value {
    json!({
        "workoutId": id,
        "title": format!("Beatdown {id}"),
        "author": "Shocker",
        "slug": format!("beatdown-{id}"),
        "workoutDate": "2024-03-15",
        "backblastUrl": "http://example.com",
        "content": "<p>Great workout!</p>",
        "ao": [{ "id": 1, "description": "Innsbrook", "slug": "innsbrook" }],
        "q": [{ "memberId": 1, "f3Name": "Shocker" }],
        "paxCount": 12
    })
}

/// Echo the query back in the titles so tests can see what was sent.
async fn workouts(Query(params): Params) -> Json<serde_json::Value> {
    let results: u64 = params
        .get("results")
        .and_then(|r| r.parse().ok())
        .unwrap_or(0);
    let page = params.get("page").cloned().unwrap_or_default();
    let items: Vec<_> = (1..=results)
        .map(|i| {
            let mut item = listing_item(i);
            item["title"] = json!(format!("page {page}"));
            item
        })
        .collect();
    Json(json!(items))
}

fn sorted_query(params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    pairs.join("&")
}

async fn workouts_by_date(Query(params): Params) -> Json<serde_json::Value> {
    let mut item = listing_item(1);
    item["title"] = json!(sorted_query(&params));
    Json(json!([item]))
}

async fn workouts_by_ao(Query(params): Params) -> Json<serde_json::Value> {
    let mut item = listing_item(1);
    item["title"] = json!(sorted_query(&params));
    Json(json!([item]))
}

async fn workout_by_date_slug(Query(params): Params) -> Response {
    match params.get("slug").map(String::as_str) {
        Some("crushing-the-pyramid") => {
            let mut item = listing_item(1);
            item["pax"] = json!([{ "memberId": 1, "f3Name": "Shocker" }]);
            Json(item).into_response()
        }
        Some("empty-object") => Json(json!({})).into_response(),
        Some("server-error") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("garbled") => "not json".into_response(),
        _ => Json(serde_json::Value::Null).into_response(),
    }
}

/// Start the stand-in API and return its base URL.
async fn spawn_api() -> String {
    let app = Router::new()
        .route("/api/v2/getWorkouts", get(workouts))
        .route("/api/v2/getWorkoutsByDate", get(workouts_by_date))
        .route("/api/v2/getWorkoutsByAO", get(workouts_by_ao))
        .route("/api/v2/getWorkoutByDateSlug", get(workout_by_date_slug));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> ArchiveApiClient {
    ArchiveApiClient::new(base_url, Some(Duration::from_secs(5))).unwrap()
}

fn key(slug: &str) -> PostKey {
    PostKey {
        year: "2024".into(),
        month: "03".into(),
        day: "15".into(),
        slug: slug.into(),
    }
}

#[tokio::test]
async fn test_list_all_sends_pagination() {
    let base = spawn_api().await;
    let request = ListingRequest {
        scope: ArchiveScope::All,
        page: 2,
        page_size: PageSize::try_from(20).unwrap(),
    };

    let posts = client(&base).list_workouts(&request).await.unwrap();
    assert_eq!(posts.len(), 20);
    assert_eq!(posts[0].title, "page 2");
    assert_eq!(posts[0].pax_count, Some(12));
}

#[tokio::test]
async fn test_list_by_date_sends_components() {
    let base = spawn_api().await;
    let request = ListingRequest {
        scope: ArchiveScope::Month {
            year: "2024".into(),
            month: "03".into(),
        },
        page: 1,
        page_size: PageSize::default(),
    };

    let posts = client(&base).list_workouts(&request).await.unwrap();
    assert_eq!(posts[0].title, "month=03&page=1&results=10&year=2024");
}

#[tokio::test]
async fn test_list_by_ao_sends_slug_only() {
    let base = spawn_api().await;
    let request = ListingRequest {
        scope: ArchiveScope::Ao {
            slug: "innsbrook".into(),
        },
        page: 1,
        page_size: PageSize::default(),
    };

    let posts = client(&base).list_workouts(&request).await.unwrap();
    assert_eq!(posts[0].title, "slug=innsbrook");
}

#[tokio::test]
async fn test_base_url_trailing_slash() {
    let base = spawn_api().await;
    let request = ListingRequest {
        scope: ArchiveScope::All,
        page: 1,
        page_size: PageSize::default(),
    };

    let posts = client(&format!("{base}/"))
        .list_workouts(&request)
        .await
        .unwrap();
    assert_eq!(posts.len(), 10);
}

#[tokio::test]
async fn test_get_workout_found() {
    let base = spawn_api().await;
    let post = client(&base)
        .get_workout(&key("crushing-the-pyramid"))
        .await
        .unwrap()
        .expect("post should exist");
    assert_eq!(post.workout_id, 1);
    assert_eq!(post.participants().count(), 1);
}

#[tokio::test]
async fn test_get_workout_null_is_none() {
    let base = spawn_api().await;
    let api = client(&base);
    assert_eq!(api.get_workout(&key("missing")).await.unwrap(), None);
    assert_eq!(api.get_workout(&key("empty-object")).await.unwrap(), None);
}

#[tokio::test]
async fn test_http_error_status() {
    let base = spawn_api().await;
    let err = client(&base)
        .get_workout(&key("server-error"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Status(500));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_undecodable_body() {
    let base = spawn_api().await;
    let err = client(&base)
        .get_workout(&key("garbled"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = ListingRequest {
        scope: ArchiveScope::All,
        page: 1,
        page_size: PageSize::default(),
    };
    let err = client(&format!("http://{addr}"))
        .list_workouts(&request)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
