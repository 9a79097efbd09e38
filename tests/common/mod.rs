// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use f3rva_site::config::Config;
use f3rva_site::models::{WorkoutAo, WorkoutMember, WorkoutPost};
use f3rva_site::routes::create_router;
use f3rva_site::services::{ArchiveSource, FetchError, ListingRequest, PostKey};
use f3rva_site::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory archive source with canned answers.
pub struct FakeArchive {
    pub listing: Result<Vec<WorkoutPost>, FetchError>,
    pub post: Result<Option<WorkoutPost>, FetchError>,
    pub requests: Mutex<Vec<ListingRequest>>,
    pub lookups: Mutex<Vec<PostKey>>,
    calls: AtomicUsize,
}

impl FakeArchive {
    #[allow(dead_code)]
    pub fn with_listing(listing: Vec<WorkoutPost>) -> Self {
        Self {
            listing: Ok(listing),
            post: Ok(None),
            requests: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn with_post(post: Option<WorkoutPost>) -> Self {
        Self {
            post: Ok(post),
            ..Self::with_listing(Vec::new())
        }
    }

    #[allow(dead_code)]
    pub fn failing(error: FetchError) -> Self {
        Self {
            listing: Err(error.clone()),
            post: Err(error),
            ..Self::with_listing(Vec::new())
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArchiveSource for FakeArchive {
    async fn list_workouts(
        &self,
        request: &ListingRequest,
    ) -> Result<Vec<WorkoutPost>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.listing.clone()
    }

    async fn get_workout(&self, key: &PostKey) -> Result<Option<WorkoutPost>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookups.lock().unwrap().push(key.clone());
        self.post.clone()
    }
}

/// A listing-shaped post dated `date`.
#[allow(dead_code)]
pub fn sample_post(id: u64, date: &str) -> WorkoutPost {
    WorkoutPost {
        workout_id: id,
        backblast_url: format!("https://f3rva.org/backblast/{id}"),
        title: format!("Beatdown {id}"),
        author: "Shocker".to_string(),
        slug: format!("beatdown-{id}"),
        workout_date: date.to_string(),
        content: "<p>Great workout!</p>".to_string(),
        ao: vec![WorkoutAo {
            id: 5,
            description: "The Zoo".to_string(),
            slug: "thezoo".to_string(),
        }],
        q: vec![WorkoutMember {
            member_id: 1,
            f3_name: "Shocker".to_string(),
        }],
        pax: None,
        pax_count: Some(9),
    }
}

/// Create a test app around `archive`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
    archive: Arc<FakeArchive>,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        archive,
    });
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn create_test_app(archive: Arc<FakeArchive>) -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), archive)
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
