// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Route parameter guards.
//!
//! Every archive route parameter passes through one of these predicates
//! before it is used to build an API request or a URL. They never panic and
//! never allocate.

/// Message shown when a date or post slug route parameter is malformed.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";

/// Message shown when an AO slug route parameter is malformed.
pub const INVALID_AO_MESSAGE: &str = "Invalid AO format";

/// Exactly four ASCII digits.
pub fn is_valid_year(year: &str) -> bool {
    year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly two ASCII digits forming 01-12.
pub fn is_valid_month(month: &str) -> bool {
    two_digit_value(month).is_some_and(|m| (1..=12).contains(&m))
}

/// Exactly two ASCII digits forming 01-31.
///
/// The day is not checked against the length of any particular month, so
/// `30` passes even for February. Callers that need a real calendar date
/// should go through [`crate::time_utils::parse_calendar_date`].
pub fn is_valid_day(day: &str) -> bool {
    two_digit_value(day).is_some_and(|d| (1..=31).contains(&d))
}

/// Non-empty and made only of ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn two_digit_value(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some((tens - b'0') * 10 + (ones - b'0'))
        }
        _ => None,
    }
}
