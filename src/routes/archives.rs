// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Workout archive routes.
//!
//! Listings go through an [`ArchiveView`] so validation, pagination and
//! error states behave the same here as in the site shell. Post bodies are
//! sanitized before they leave the server.

use crate::error::{AppError, Result};
use crate::models::post::{excerpt, CARD_EXCERPT_CHARS};
use crate::models::WorkoutPost;
use crate::sanitizer::sanitize_html;
use crate::services::archive_view::ListingStatus;
use crate::services::seo::PageMeta;
use crate::services::{ArchiveScope, ArchiveView, PageSize, PostKey};
use crate::time_utils::{
    format_for_display, format_for_url, format_full_display, format_month_year,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Heading of the unscoped archive listing.
pub const ALL_ARCHIVES_HEADING: &str = "Workout Archives";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/archives", get(list_all))
        .route("/api/archives/ao/{slug}", get(list_by_ao))
        .route("/api/archives/{year}", get(list_by_year))
        .route("/api/archives/{year}/{month}", get(list_by_month))
        .route("/api/archives/{year}/{month}/{day}", get(list_by_day))
        .route("/api/archives/{year}/{month}/{day}/{slug}", get(get_post))
}

// ─── Query parameters ────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct PaginationParams {
    /// 1-indexed
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,
    /// One of 10, 20 or 50
    #[serde(default = "default_results")]
    #[validate(range(min = 10, max = 50, message = "results must be 10, 20 or 50"))]
    pub results: u32,
}

fn default_page() -> u32 {
    1
}

fn default_results() -> u32 {
    PageSize::default().get()
}

impl PaginationParams {
    fn parse(&self) -> Result<(u32, PageSize)> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let page_size = PageSize::try_from(self.results).map_err(|n| {
            AppError::BadRequest(format!("results must be 10, 20 or 50, got {n}"))
        })?;
        Ok((self.page, page_size))
    }
}

// ─── Response types ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AoLink {
    pub name: String,
    pub slug: String,
    /// Site-relative AO listing link, absent when the API gave no slug
    pub href: Option<String>,
}

/// One post on a listing page.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    pub title: String,
    pub display_date: String,
    pub permalink: Option<String>,
    pub qic_names: Vec<String>,
    pub aos: Vec<AoLink>,
    pub participant_count: u32,
    pub participants: String,
    pub author: String,
    pub excerpt: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub status: ListingStatus,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub posts: Vec<PostCard>,
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

/// A single post, with sanitized content.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub title: String,
    pub display_date: String,
    pub author: String,
    pub qic_names: Vec<String>,
    pub aos: Vec<AoLink>,
    pub pax: Vec<String>,
    pub participant_count: u32,
    pub backblast_url: String,
    /// Safe to insert as HTML
    pub content: String,
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub meta: PageMeta,
}

fn ao_links(post: &WorkoutPost) -> Vec<AoLink> {
    post.ao
        .iter()
        .map(|ao| AoLink {
            name: ao.description.clone(),
            slug: ao.slug.clone(),
            href: (!ao.slug.is_empty()).then(|| format!("/archives/ao/{}", ao.slug)),
        })
        .collect()
}

fn to_names(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

impl From<&WorkoutPost> for PostCard {
    fn from(post: &WorkoutPost) -> Self {
        let participants = post.participants();
        let permalink = post
            .permalink()
            .map_err(|e| {
                tracing::warn!(
                    workout_id = post.workout_id,
                    error = %e,
                    "Post has unusable date"
                );
            })
            .ok();

        Self {
            title: post.title.clone(),
            display_date: format_for_display(&post.workout_date)
                .unwrap_or_else(|_| post.workout_date.clone()),
            permalink,
            qic_names: to_names(post.qic_names()),
            aos: ao_links(post),
            participant_count: participants.count(),
            participants: participants.summary(),
            author: post.author.clone(),
            excerpt: excerpt(&post.content, CARD_EXCERPT_CHARS),
        }
    }
}

/// Listing heading for a scope that already passed validation.
fn heading(scope: &ArchiveScope) -> String {
    match scope {
        ArchiveScope::All => ALL_ARCHIVES_HEADING.to_string(),
        ArchiveScope::Year { year } => year.clone(),
        ArchiveScope::Month { year, month } => {
            format_month_year(year, month).unwrap_or_else(|_| format!("{month}/{year}"))
        }
        ArchiveScope::Day { year, month, day } => format_full_display(year, month, day)
            .unwrap_or_else(|_| format!("{month}/{day}/{year}")),
        ArchiveScope::Ao { slug } => slug.clone(),
    }
}

// ─── Handlers ────────────────────────────────────────────────

async fn run_listing(
    state: &AppState,
    scope: ArchiveScope,
    page: u32,
    page_size: PageSize,
) -> Response {
    let mut view = ArchiveView::new(scope, page_size).with_page(page);
    view.load(state.archive.as_ref()).await;
    let snapshot = view.state();
    let scope = view.scope();

    let status = match snapshot.status {
        ListingStatus::Ready => StatusCode::OK,
        _ if scope.validate().is_err() => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };

    // Invalid parameters have no meaningful heading or canonical page.
    let (heading, meta) = if status == StatusCode::BAD_REQUEST {
        (None, None)
    } else {
        let heading = heading(scope);
        let label = (*scope != ArchiveScope::All).then_some(heading.as_str());
        let meta = PageMeta::for_listing(label, &state.config.site_url, &scope.client_path());
        (Some(heading), Some(meta))
    };

    let body = ListingResponse {
        heading,
        page: snapshot.page,
        page_size: snapshot.page_size.get(),
        status: snapshot.status,
        has_more: snapshot.has_more,
        error: snapshot.error.clone(),
        posts: snapshot.items.iter().map(PostCard::from).collect(),
        meta,
    };

    (status, Json(body)).into_response()
}

async fn list_all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Response> {
    let (page, page_size) = params.parse()?;
    Ok(run_listing(&state, ArchiveScope::All, page, page_size).await)
}

async fn list_by_year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Response> {
    let (page, page_size) = params.parse()?;
    Ok(run_listing(&state, ArchiveScope::Year { year }, page, page_size).await)
}

async fn list_by_month(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(String, String)>,
    Query(params): Query<PaginationParams>,
) -> Result<Response> {
    let (page, page_size) = params.parse()?;
    Ok(run_listing(&state, ArchiveScope::Month { year, month }, page, page_size).await)
}

async fn list_by_day(
    State(state): State<Arc<AppState>>,
    Path((year, month, day)): Path<(String, String, String)>,
    Query(params): Query<PaginationParams>,
) -> Result<Response> {
    let (page, page_size) = params.parse()?;
    let scope = ArchiveScope::Day { year, month, day };
    Ok(run_listing(&state, scope, page, page_size).await)
}

/// AO listings are not paginated; the whole set comes back at once.
async fn list_by_ao(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    run_listing(&state, ArchiveScope::Ao { slug }, 1, PageSize::default()).await
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path((year, month, day, slug)): Path<(String, String, String, String)>,
) -> Result<Json<PostResponse>> {
    let key = PostKey {
        year,
        month,
        day,
        slug,
    };
    key.validate()?;

    let post = state
        .archive
        .get_workout(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", key.permalink())))?;

    let display_date = format_for_url(&post.workout_date)
        .and_then(|parts| format_full_display(&parts.year, &parts.month, &parts.day))
        .unwrap_or_else(|_| post.workout_date.clone());

    let meta = PageMeta::for_post(&post, &state.config.site_url, &key.permalink())
        .map_err(|e| AppError::Internal(e.into()))?;

    let participants = post.participants();

    Ok(Json(PostResponse {
        title: post.title.clone(),
        display_date,
        author: post.author.clone(),
        qic_names: to_names(post.qic_names()),
        aos: ao_links(&post),
        pax: post
            .pax
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|m| m.f3_name.clone())
            .collect(),
        participant_count: participants.count(),
        backblast_url: post.backblast_url.clone(),
        content: sanitize_html(&post.content),
        meta,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> WorkoutPost {
        serde_json::from_value(serde_json::json!({
            "workoutId": 1,
            "title": "Crushing the Pyramid",
            "author": "Shocker",
            "slug": "crushing-the-pyramid",
            "workoutDate": "2024-03-15",
            "content": "<p>Great workout!</p>",
            "ao": [
                { "id": 1, "description": "Innsbrook", "slug": "innsbrook" },
                { "id": 2, "description": "Pop-up" }
            ],
            "q": [{ "memberId": 1, "f3Name": "Shocker" }],
            "paxCount": 12
        }))
        .unwrap()
    }

    #[test]
    fn test_post_card() {
        let card = PostCard::from(&post());
        assert_eq!(card.display_date, "Fri, Mar 15, 2024");
        assert_eq!(card.permalink.as_deref(), Some("/2024/03/15/crushing-the-pyramid"));
        assert_eq!(card.participants, "12 participants");
        assert_eq!(card.excerpt, "Great workout!");
        assert_eq!(card.aos[0].href.as_deref(), Some("/archives/ao/innsbrook"));
        assert_eq!(card.aos[1].href, None);
    }

    #[test]
    fn test_headings() {
        assert_eq!(heading(&ArchiveScope::All), "Workout Archives");
        assert_eq!(
            heading(&ArchiveScope::Year {
                year: "2024".into()
            }),
            "2024"
        );
        assert_eq!(
            heading(&ArchiveScope::Month {
                year: "2024".into(),
                month: "01".into()
            }),
            "January 2024"
        );
        assert_eq!(
            heading(&ArchiveScope::Day {
                year: "2024".into(),
                month: "01".into(),
                day: "15".into()
            }),
            "Monday, January 15, 2024"
        );
        assert_eq!(
            heading(&ArchiveScope::Ao {
                slug: "thezoo".into()
            }),
            "thezoo"
        );
    }

    #[test]
    fn test_pagination_params() {
        let ok = PaginationParams {
            page: 2,
            results: 20,
        };
        assert_eq!(ok.parse().unwrap().1.get(), 20);

        let zero = PaginationParams {
            page: 0,
            results: 10,
        };
        assert!(zero.parse().is_err());

        let odd = PaginationParams {
            page: 1,
            results: 15,
        };
        assert!(odd.parse().is_err());
    }
}
