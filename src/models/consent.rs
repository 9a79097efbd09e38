// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Persisted analytics-cookie consent choice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::format_utc_rfc3339;

/// Key of the single slot the consent record is stored under.
pub const CONSENT_KEY: &str = "f3rva-cookie-consent";

/// Current consent schema version. Bump to re-prompt every visitor.
pub const CONSENT_VERSION: &str = "1.0";

/// A visitor's explicit accept/decline choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ConsentRecord {
    pub accepted: bool,
    /// When the choice was made (RFC3339, UTC)
    pub timestamp: String,
    pub version: String,
}

impl ConsentRecord {
    /// A fresh record for the current schema version.
    pub fn new(accepted: bool, at: DateTime<Utc>) -> Self {
        Self {
            accepted,
            timestamp: format_utc_rfc3339(at),
            version: CONSENT_VERSION.to_string(),
        }
    }

    pub fn is_current(&self) -> bool {
        self.version == CONSENT_VERSION
    }
}
