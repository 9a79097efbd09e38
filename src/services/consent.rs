// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Consent queries and the analytics gate.
//!
//! The consent record lives in a single key-value slot (the
//! [`CONSENT_KEY`](crate::models::consent::CONSENT_KEY) cookie), stored as
//! base64url-encoded JSON. Writes are last-writer-wins. A record from an
//! older schema version, or one that cannot be decoded, counts as no choice.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::ConsentRecord;

/// Outcome of reading the consent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ConsentStatus {
    Accepted,
    Declined,
    /// No choice, or a choice made under an older version. Re-prompt.
    Undecided,
}

/// Encode a record for the storage slot.
pub fn encode_record(record: &ConsentRecord) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(record)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// The stored record if it exists, decodes, and matches the current version.
pub fn current_record(stored: Option<&str>) -> Option<ConsentRecord> {
    let raw = stored?;
    let decoded = match URL_SAFE_NO_PAD.decode(raw) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Error reading cookie consent");
            return None;
        }
    };
    let record: ConsentRecord = match serde_json::from_slice(&decoded) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "Error reading cookie consent");
            return None;
        }
    };

    if record.is_current() {
        Some(record)
    } else {
        tracing::warn!(version = %record.version, "Ignoring consent from older version");
        None
    }
}

pub fn consent_status(stored: Option<&str>) -> ConsentStatus {
    match current_record(stored) {
        Some(record) if record.accepted => ConsentStatus::Accepted,
        Some(_) => ConsentStatus::Declined,
        None => ConsentStatus::Undecided,
    }
}

pub fn has_accepted_cookies(stored: Option<&str>) -> bool {
    consent_status(stored) == ConsentStatus::Accepted
}

pub fn has_declined_cookies(stored: Option<&str>) -> bool {
    consent_status(stored) == ConsentStatus::Declined
}

/// Whether the visitor made any choice under the current version.
pub fn has_consent_choice(stored: Option<&str>) -> bool {
    consent_status(stored) != ConsentStatus::Undecided
}

/// Decides whether the analytics loader may run.
///
/// Owned by whoever performs the analytics side effect. `enabled` is
/// recomputed from the consent slot on every [`evaluate`](Self::evaluate)
/// call and is never cached across triggers.
#[derive(Debug, Clone)]
pub struct AnalyticsGate {
    tracking_id: Option<String>,
    enabled: bool,
}

impl AnalyticsGate {
    /// `tracking_id` of `None` disables analytics permanently.
    pub fn new(tracking_id: Option<String>) -> Self {
        Self {
            tracking_id,
            enabled: false,
        }
    }

    /// Re-derive the gate from the current consent slot contents.
    pub fn evaluate(&mut self, stored: Option<&str>) -> bool {
        self.enabled = self.tracking_id.is_some() && has_accepted_cookies(stored);
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The tracking id, only while the gate is open.
    pub fn active_tracking_id(&self) -> Option<&str> {
        if self.enabled {
            self.tracking_id.as_deref()
        } else {
            None
        }
    }
}
