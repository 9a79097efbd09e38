// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Cookie consent routes.
//!
//! The consent record is kept in one cookie. Reading it never modifies it,
//! and a new choice simply overwrites the previous one.

use crate::error::{AppError, Result};
use crate::models::consent::CONSENT_KEY;
use crate::models::ConsentRecord;
use crate::services::consent::{consent_status, current_record, encode_record};
use crate::services::{AnalyticsGate, ConsentStatus};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Consent cookies live for a year.
const CONSENT_MAX_AGE_DAYS: i64 = 365;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/consent", get(get_consent).post(set_consent))
}

#[derive(Debug, Deserialize)]
pub struct ConsentRequest {
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ConsentResponse {
    pub status: ConsentStatus,
    pub record: Option<ConsentRecord>,
    pub analytics_enabled: bool,
    /// Only present while analytics may load
    pub tracking_id: Option<String>,
}

fn consent_response(state: &AppState, stored: Option<&str>) -> ConsentResponse {
    let mut gate = AnalyticsGate::new(state.config.google_analytics_id.clone());
    let analytics_enabled = gate.evaluate(stored);

    ConsentResponse {
        status: consent_status(stored),
        record: current_record(stored),
        analytics_enabled,
        tracking_id: gate.active_tracking_id().map(str::to_string),
    }
}

async fn get_consent(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Json<ConsentResponse> {
    let stored = jar.get(CONSENT_KEY).map(|c| c.value().to_string());
    Json(consent_response(&state, stored.as_deref()))
}

async fn set_consent(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<ConsentRequest>,
) -> Result<(CookieJar, Json<ConsentResponse>)> {
    let record = ConsentRecord::new(request.accepted, chrono::Utc::now());
    let value = encode_record(&record).map_err(|e| AppError::Internal(e.into()))?;

    tracing::info!(accepted = record.accepted, version = %record.version, "Consent recorded");

    let cookie = Cookie::build((CONSENT_KEY, value.clone()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(CONSENT_MAX_AGE_DAYS));

    let body = consent_response(&state, Some(&value));
    Ok((jar.add(cookie), Json(body)))
}
