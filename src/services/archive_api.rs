// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Workout archive API client.
//!
//! Handles:
//! - Composing validated scope and pagination into endpoint requests
//! - Listing fetches (all, by date, by AO)
//! - Single post lookup by permalink, where `null` means not found
//! - Mapping transport and HTTP failures to [`FetchError`]

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::models::WorkoutPost;
use crate::validation::{
    is_valid_day, is_valid_month, is_valid_slug, is_valid_year, INVALID_AO_MESSAGE,
    INVALID_URL_MESSAGE,
};

pub const WORKOUTS_PATH: &str = "/api/v2/getWorkouts";
pub const WORKOUTS_BY_DATE_PATH: &str = "/api/v2/getWorkoutsByDate";
pub const WORKOUTS_BY_AO_PATH: &str = "/api/v2/getWorkoutsByAO";
pub const WORKOUT_BY_DATE_SLUG_PATH: &str = "/api/v2/getWorkoutByDateSlug";

/// A route parameter failed validation. No request may be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidParams {
    #[error("{}", INVALID_URL_MESSAGE)]
    Url,

    #[error("{}", INVALID_AO_MESSAGE)]
    Ao,
}

/// Which slice of the archive a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveScope {
    All,
    Year {
        year: String,
    },
    Month {
        year: String,
        month: String,
    },
    Day {
        year: String,
        month: String,
        day: String,
    },
    Ao {
        slug: String,
    },
}

impl ArchiveScope {
    /// Check every parameter this scope carries.
    pub fn validate(&self) -> Result<(), InvalidParams> {
        let ok = match self {
            ArchiveScope::All => true,
            ArchiveScope::Year { year } => is_valid_year(year),
            ArchiveScope::Month { year, month } => is_valid_year(year) && is_valid_month(month),
            ArchiveScope::Day { year, month, day } => {
                is_valid_year(year) && is_valid_month(month) && is_valid_day(day)
            }
            ArchiveScope::Ao { slug } => {
                return if is_valid_slug(slug) {
                    Ok(())
                } else {
                    Err(InvalidParams::Ao)
                };
            }
        };
        if ok {
            Ok(())
        } else {
            Err(InvalidParams::Url)
        }
    }

    /// Site-relative path of the page showing this listing.
    pub fn client_path(&self) -> String {
        match self {
            ArchiveScope::All => "/archives".to_string(),
            ArchiveScope::Year { year } => format!("/{year}"),
            ArchiveScope::Month { year, month } => format!("/{year}/{month}"),
            ArchiveScope::Day { year, month, day } => format!("/{year}/{month}/{day}"),
            ArchiveScope::Ao { slug } => format!("/archives/ao/{slug}"),
        }
    }

    /// The AO endpoint returns every matching post in one response.
    pub fn is_paginated(&self) -> bool {
        !matches!(self, ArchiveScope::Ao { .. })
    }
}

/// Allowed results-per-page values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(u32);

impl PageSize {
    pub const ALLOWED: [u32; 3] = [10, 20, 50];

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(Self::ALLOWED[0])
    }
}

impl TryFrom<u32> for PageSize {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}

/// One listing fetch: scope plus pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub scope: ArchiveScope,
    /// 1-based
    pub page: u32,
    pub page_size: PageSize,
}

impl ListingRequest {
    /// Endpoint path and query parameters for this request.
    pub fn endpoint(&self) -> (&'static str, Vec<(&'static str, String)>) {
        let page = ("page", self.page.to_string());
        let results = ("results", self.page_size.get().to_string());

        match &self.scope {
            ArchiveScope::All => (WORKOUTS_PATH, vec![page, results]),
            ArchiveScope::Year { year } => {
                (WORKOUTS_BY_DATE_PATH, vec![("year", year.clone()), page, results])
            }
            ArchiveScope::Month { year, month } => (
                WORKOUTS_BY_DATE_PATH,
                vec![("year", year.clone()), ("month", month.clone()), page, results],
            ),
            ArchiveScope::Day { year, month, day } => (
                WORKOUTS_BY_DATE_PATH,
                vec![
                    ("year", year.clone()),
                    ("month", month.clone()),
                    ("day", day.clone()),
                    page,
                    results,
                ],
            ),
            ArchiveScope::Ao { slug } => (WORKOUTS_BY_AO_PATH, vec![("slug", slug.clone())]),
        }
    }
}

/// Permalink key of a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostKey {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

impl PostKey {
    pub fn validate(&self) -> Result<(), InvalidParams> {
        if is_valid_year(&self.year)
            && is_valid_month(&self.month)
            && is_valid_day(&self.day)
            && is_valid_slug(&self.slug)
        {
            Ok(())
        } else {
            Err(InvalidParams::Url)
        }
    }

    pub fn endpoint(&self) -> (&'static str, Vec<(&'static str, String)>) {
        (
            WORKOUT_BY_DATE_SLUG_PATH,
            vec![
                ("year", self.year.clone()),
                ("month", self.month.clone()),
                ("day", self.day.clone()),
                ("slug", self.slug.clone()),
            ],
        )
    }

    /// Site-relative permalink `/{YYYY}/{MM}/{DD}/{slug}`.
    pub fn permalink(&self) -> String {
        format!("/{}/{}/{}/{}", self.year, self.month, self.day, self.slug)
    }
}

/// Failures talking to the archive API. Messages are surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Source of archived workout posts.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Fetch one page of a listing.
    async fn list_workouts(&self, request: &ListingRequest)
        -> Result<Vec<WorkoutPost>, FetchError>;

    /// Look up a single post. `Ok(None)` means the API answered with no post.
    async fn get_workout(&self, key: &PostKey) -> Result<Option<WorkoutPost>, FetchError>;
}

/// Archive API client over HTTP.
#[derive(Clone)]
pub struct ArchiveApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArchiveApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// With `timeout` of `None` the transport's own defaults apply.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `query` and return the decoded JSON body.
    async fn get_json(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<serde_json::Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, ?query, "Fetching from archive API");

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "Archive API returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ArchiveSource for ArchiveApiClient {
    async fn list_workouts(
        &self,
        request: &ListingRequest,
    ) -> Result<Vec<WorkoutPost>, FetchError> {
        let (path, query) = request.endpoint();
        let body = self.get_json(path, &query).await?;
        if body.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn get_workout(&self, key: &PostKey) -> Result<Option<WorkoutPost>, FetchError> {
        let (path, query) = key.endpoint();
        let body = self.get_json(path, &query).await?;
        if is_empty_payload(&body) {
            return Ok(None);
        }
        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// `null`, `{}` and `[]` all mean "no such post".
fn is_empty_payload(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
