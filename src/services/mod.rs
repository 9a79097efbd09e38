// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Services module - business logic layer.

pub mod archive_api;
pub mod archive_view;
pub mod consent;
pub mod seo;
pub mod sitemap;

pub use archive_api::{
    ArchiveApiClient, ArchiveScope, ArchiveSource, FetchError, InvalidParams, ListingRequest,
    PageSize, PostKey,
};
pub use archive_view::{ArchiveQueryState, ArchiveView, FetchOutcome, ListingStatus, PendingFetch};
pub use consent::{AnalyticsGate, ConsentStatus};
pub use seo::PageMeta;
