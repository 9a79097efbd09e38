// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Paginated archive listing state.
//!
//! [`ArchiveView`] owns one listing: its scope, page and page size, plus the
//! observable [`ArchiveQueryState`]. Every change that alters the request
//! returns a [`PendingFetch`]. The caller runs it against an
//! [`ArchiveSource`] and feeds the [`FetchOutcome`] back through
//! [`ArchiveView::apply`].
//!
//! Only the newest fetch may update state. Starting a new fetch aborts the
//! previous one and bumps the generation, so a late response is dropped.

use futures_util::future::{AbortHandle, AbortRegistration, Abortable};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::archive_api::{ArchiveScope, ArchiveSource, FetchError, ListingRequest, PageSize};
use crate::models::WorkoutPost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// What a listing page currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveQueryState {
    pub page: u32,
    pub page_size: PageSize,
    pub items: Vec<WorkoutPost>,
    pub status: ListingStatus,
    /// True only when the last page came back full.
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A fetch that has been started but not yet run.
#[derive(Debug)]
pub struct PendingFetch {
    generation: u64,
    request: ListingRequest,
    registration: AbortRegistration,
}

/// Result of running a [`PendingFetch`].
#[derive(Debug)]
pub enum FetchOutcome {
    Completed {
        generation: u64,
        result: Result<Vec<WorkoutPost>, FetchError>,
    },
    /// Aborted before the source answered.
    Cancelled { generation: u64 },
}

impl PendingFetch {
    pub fn request(&self) -> &ListingRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn run(self, source: &dyn ArchiveSource) -> FetchOutcome {
        let PendingFetch {
            generation,
            request,
            registration,
        } = self;

        match Abortable::new(source.list_workouts(&request), registration).await {
            Ok(result) => FetchOutcome::Completed { generation, result },
            Err(_aborted) => FetchOutcome::Cancelled { generation },
        }
    }
}

/// State machine for one paginated listing.
#[derive(Debug)]
pub struct ArchiveView {
    scope: ArchiveScope,
    state: ArchiveQueryState,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl ArchiveView {
    /// An idle view on page 1.
    pub fn new(scope: ArchiveScope, page_size: PageSize) -> Self {
        Self {
            scope,
            state: ArchiveQueryState {
                page: 1,
                page_size,
                items: Vec::new(),
                status: ListingStatus::Idle,
                has_more: false,
                error: None,
            },
            generation: 0,
            in_flight: None,
        }
    }

    /// Start on `page` instead of page 1. Zero is treated as 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.state.page = page.max(1);
        self
    }

    pub fn state(&self) -> &ArchiveQueryState {
        &self.state
    }

    pub fn scope(&self) -> &ArchiveScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.state.status == ListingStatus::Loading
    }

    /// Start a fetch for the current scope, page and page size.
    ///
    /// Returns `None` when the scope is invalid. The state then holds the
    /// validation error and no request is made.
    pub fn trigger(&mut self) -> Option<PendingFetch> {
        self.cancel();

        if let Err(invalid) = self.scope.validate() {
            tracing::debug!(scope = ?self.scope, "Rejected archive scope");
            self.state.items.clear();
            self.state.has_more = false;
            self.state.status = ListingStatus::Error;
            self.state.error = Some(invalid.to_string());
            return None;
        }

        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);

        self.state.items.clear();
        self.state.has_more = false;
        self.state.status = ListingStatus::Loading;
        self.state.error = None;

        let request = ListingRequest {
            scope: self.scope.clone(),
            page: self.state.page,
            page_size: self.state.page_size,
        };
        tracing::debug!(
            generation = self.generation,
            page = request.page,
            results = request.page_size.get(),
            "Starting archive fetch"
        );

        Some(PendingFetch {
            generation: self.generation,
            request,
            registration,
        })
    }

    /// Fold a fetch outcome into state. Returns false if it was stale.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let (generation, result) = match outcome {
            FetchOutcome::Cancelled { generation } => {
                tracing::debug!(generation, "Archive fetch cancelled");
                return false;
            }
            FetchOutcome::Completed { generation, result } => (generation, result),
        };

        if generation != self.generation || self.in_flight.is_none() {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale archive response"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(items) => {
                self.state.has_more = self.scope.is_paginated()
                    && items.len() == self.state.page_size.get() as usize;
                self.state.items = items;
                self.state.status = ListingStatus::Ready;
                self.state.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching workouts");
                self.state.items.clear();
                self.state.has_more = false;
                self.state.status = ListingStatus::Error;
                self.state.error = Some(e.to_string());
            }
        }
        true
    }

    /// Trigger, run and apply in one step.
    pub async fn load(&mut self, source: &dyn ArchiveSource) -> &ArchiveQueryState {
        if let Some(pending) = self.trigger() {
            let outcome = pending.run(source).await;
            self.apply(outcome);
        }
        &self.state
    }

    /// Switch to a different scope, back on page 1.
    pub fn set_scope(&mut self, scope: ArchiveScope) -> Option<PendingFetch> {
        if scope == self.scope {
            return None;
        }
        self.scope = scope;
        self.state.page = 1;
        self.trigger()
    }

    pub fn set_page(&mut self, page: u32) -> Option<PendingFetch> {
        if page == 0 || page == self.state.page {
            return None;
        }
        self.state.page = page;
        self.trigger()
    }

    /// Change the page size. Page resets to 1 in the same update, so only
    /// one request goes out.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Option<PendingFetch> {
        if page_size == self.state.page_size {
            return None;
        }
        self.state.page_size = page_size;
        self.state.page = 1;
        self.trigger()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_loading() && self.state.has_more && self.state.page < u32::MAX
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_loading() && self.state.page > 1
    }

    pub fn next_page(&mut self) -> Option<PendingFetch> {
        if !self.can_go_next() {
            return None;
        }
        self.state.page = self.state.page.checked_add(1)?;
        self.trigger()
    }

    pub fn previous_page(&mut self) -> Option<PendingFetch> {
        if !self.can_go_previous() {
            return None;
        }
        self.state.page -= 1;
        self.trigger()
    }

    /// Abort any in-flight fetch. Its outcome will be ignored.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Drop for ArchiveView {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
