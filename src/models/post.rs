// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Workout post (backblast) model as served by the archive API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::{self, DateError};

/// An Area of Operations where a workout took place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutAo {
    pub id: u64,
    /// Display name (e.g., "The Zoo")
    pub description: String,
    /// URL-safe identifier used in `/archives/ao/{slug}`
    #[serde(default)]
    pub slug: String,
}

/// A member who led or attended a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutMember {
    pub member_id: u64,
    pub f3_name: String,
}

/// A single archived workout record.
///
/// Listing endpoints populate `pax_count`; the single-post endpoint
/// populates the full `pax` list. Use [`WorkoutPost::participants`] rather
/// than reading either field directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPost {
    pub workout_id: u64,
    #[serde(default)]
    pub backblast_url: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Unique together with `workout_date`
    pub slug: String,
    /// Calendar date, `YYYY-MM-DD`
    pub workout_date: String,
    /// Untrusted HTML. Must go through `sanitize_html` before rendering.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub ao: Vec<WorkoutAo>,
    #[serde(default)]
    pub q: Vec<WorkoutMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pax: Option<Vec<WorkoutMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pax_count: Option<u32>,
}

/// Who attended, in whichever form the endpoint provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Participants<'a> {
    Members(&'a [WorkoutMember]),
    Count(u32),
}

impl Participants<'_> {
    pub fn count(&self) -> u32 {
        match self {
            Participants::Members(members) => members.len() as u32,
            Participants::Count(count) => *count,
        }
    }

    /// Card summary: the member names, or `"N participant(s)"`.
    pub fn summary(&self) -> String {
        match self {
            Participants::Members(members) => members
                .iter()
                .map(|m| m.f3_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Participants::Count(1) => "1 participant".to_string(),
            Participants::Count(count) => format!("{count} participants"),
        }
    }
}

impl WorkoutPost {
    /// Full member list when present, otherwise the bare count.
    pub fn participants(&self) -> Participants<'_> {
        match &self.pax {
            Some(members) => Participants::Members(members),
            None => Participants::Count(self.pax_count.unwrap_or(0)),
        }
    }

    /// Site-relative permalink `/{YYYY}/{MM}/{DD}/{slug}`.
    pub fn permalink(&self) -> Result<String, DateError> {
        let parts = time_utils::format_for_url(&self.workout_date)?;
        Ok(format!("{}/{}", parts.path(), self.slug))
    }

    pub fn qic_names(&self) -> Vec<&str> {
        self.q.iter().map(|m| m.f3_name.as_str()).collect()
    }

    pub fn ao_names(&self) -> Vec<&str> {
        self.ao.iter().map(|a| a.description.as_str()).collect()
    }
}

/// Plain-text excerpt of HTML content.
///
/// Anything between `<` and the next `>` is dropped. If the remaining text
/// is longer than `max_chars` characters it is cut, trimmed and suffixed
/// with `...`.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                // Unterminated tag: keep the remainder as text.
                rest = &rest[open..];
                break;
            }
        }
    }
    text.push_str(rest);

    if text.chars().count() <= max_chars {
        return text;
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Excerpt length used on listing cards.
pub const CARD_EXCERPT_CHARS: usize = 200;

/// Excerpt length used for meta descriptions.
pub const SEO_EXCERPT_CHARS: usize = 160;
