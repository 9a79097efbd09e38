// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Sanitization of untrusted backblast HTML and of JSON embedded in
//! `<script>` blocks.
//!
//! [`sanitize_html`] runs content through ammonia's allow-list cleaner and
//! then rewrites anchors that open a new browsing context so their `rel`
//! carries `noopener` and `noreferrer`. [`sanitize_json`] is for
//! structured data only; it is not a substitute for HTML sanitization.

use serde::Serialize;
use std::borrow::Cow;

/// `rel` tokens forced onto every `target="_blank"` anchor.
const BLANK_TARGET_REL: [&str; 2] = ["noopener", "noreferrer"];

/// Sanitize externally authored HTML for direct insertion into a page.
///
/// - Script-executing constructs (`<script>` with its content, `on*`
///   handlers, `javascript:` URLs) are removed.
/// - Structural and formatting markup and `class` attributes are kept.
/// - Anchors with `target="_blank"` gain `noopener noreferrer` in `rel`,
///   appended to existing tokens without duplicates. Other anchors keep
///   their `rel` untouched, including having none.
///
/// The function is idempotent.
pub fn sanitize_html(html: &str) -> String {
    let cleaned = cleaner().clean(html).to_string();
    enforce_blank_target_rel(&cleaned).into_owned()
}

fn cleaner() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder
        .link_rel(None)
        .add_generic_attributes(["class"])
        .add_tag_attributes("a", ["target", "rel"]);
    builder
}

/// Serialize `data` as JSON that is safe to place inside a `<script>` block.
///
/// Every `<` and `>` is replaced by its `\u003c` / `\u003e` escape. Both only
/// ever appear inside JSON string literals, where the escape decodes to the
/// same character, so the payload is unchanged for a JSON parser while an
/// HTML parser never sees a closing `</script`.
pub fn sanitize_json<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(data)?;
    Ok(escape_angle_brackets(&json))
}

fn escape_angle_brackets(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            c => out.push(c),
        }
    }
    out
}

/// Rewrite the start tags of `<a>` elements in ammonia's serialized output.
///
/// The serializer always double-quotes attribute values and escapes `"`,
/// `&`, `<` and `>` inside them, and text content never contains a raw `<`
/// either. A raw `<a` followed by whitespace or `>` can therefore only start
/// an anchor tag, never appear inside an attribute value or text.
fn enforce_blank_target_rel(html: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut copied_up_to = 0;
    let mut search_from = 0;

    while let Some(offset) = html[search_from..].find("<a") {
        let start = search_from + offset;
        let after_name = start + 2;
        search_from = after_name;

        let is_anchor = matches!(
            html.as_bytes().get(after_name),
            Some(b' ' | b'\t' | b'\n' | b'>')
        );
        if !is_anchor {
            continue;
        }

        let Some(end) = find_tag_end(html, after_name) else {
            break;
        };
        search_from = end + 1;

        let attrs = parse_attributes(&html[after_name..end]);
        let targets_blank = attrs
            .iter()
            .any(|(name, value)| *name == "target" && *value == Some("_blank"));
        if !targets_blank {
            continue;
        }

        out.push_str(&html[copied_up_to..start]);
        out.push_str(&rebuild_anchor(&attrs));
        copied_up_to = end + 1;
    }

    if copied_up_to == 0 {
        return Cow::Borrowed(html);
    }
    out.push_str(&html[copied_up_to..]);
    Cow::Owned(out)
}

/// Index of the `>` closing the tag, skipping over quoted values.
fn find_tag_end(html: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in html.as_bytes().iter().enumerate().skip(from) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

fn parse_attributes(raw: &str) -> Vec<(&str, Option<&str>)> {
    let mut attrs = Vec::new();
    let mut rest = raw.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(q) {
                        Some(close) => (&body[..close], &body[close + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(char::is_whitespace)
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            attrs.push((name, Some(value)));
            rest = remaining.trim_start();
        } else {
            attrs.push((name, None));
        }
    }

    attrs
}

fn rebuild_anchor(attrs: &[(&str, Option<&str>)]) -> String {
    let mut tag = String::from("<a");
    let mut saw_rel = false;

    for (name, value) in attrs {
        if name.is_empty() {
            continue;
        }
        let value = if *name == "rel" {
            saw_rel = true;
            Some(merge_rel(value.unwrap_or("")))
        } else {
            value.map(str::to_string)
        };

        tag.push(' ');
        tag.push_str(name);
        if let Some(value) = value {
            tag.push_str("=\"");
            tag.push_str(&value);
            tag.push('"');
        }
    }

    if !saw_rel {
        tag.push_str(" rel=\"");
        tag.push_str(&merge_rel(""));
        tag.push('"');
    }

    tag.push('>');
    tag
}

/// Existing tokens first in their original order, then the forced ones,
/// each appearing once.
fn merge_rel(existing: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    for token in existing
        .split_ascii_whitespace()
        .chain(BLANK_TARGET_REL.iter().copied())
    {
        if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}
