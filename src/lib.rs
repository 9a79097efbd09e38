// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! F3RVA site: archive, consent and SEO backend for the F3RVA website.
//!
//! This crate serves sanitized workout backblasts from the remote archive
//! API, along with page metadata, the analytics consent slot, and crawler
//! files.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod sanitizer;
pub mod services;
pub mod time_utils;
pub mod validation;

use config::Config;
use services::ArchiveSource;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub archive: Arc<dyn ArchiveSource>,
}
