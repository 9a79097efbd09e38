// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! XML sitemap and robots.txt generation.

use chrono::{DateTime, Utc};

use crate::config::SiteEnv;
use crate::time_utils::format_utc_rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SitemapRoute {
    pub path: &'static str,
    pub priority: &'static str,
    pub changefreq: ChangeFreq,
}

/// Pages listed in the sitemap.
pub const SITEMAP_ROUTES: [SitemapRoute; 5] = [
    SitemapRoute {
        path: "/",
        priority: "1.0",
        changefreq: ChangeFreq::Weekly,
    },
    SitemapRoute {
        path: "/about",
        priority: "0.8",
        changefreq: ChangeFreq::Monthly,
    },
    SitemapRoute {
        path: "/schedule",
        priority: "0.9",
        changefreq: ChangeFreq::Weekly,
    },
    SitemapRoute {
        path: "/new-guy",
        priority: "0.7",
        changefreq: ChangeFreq::Monthly,
    },
    SitemapRoute {
        path: "/archives",
        priority: "0.6",
        changefreq: ChangeFreq::Daily,
    },
];

const SITEMAP_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9 http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">"#;

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the sitemap with absolute URLs under `site_url`.
pub fn generate_sitemap(site_url: &str, lastmod: DateTime<Utc>) -> String {
    let base = site_url.trim_end_matches('/');
    let lastmod = format_utc_rfc3339(lastmod);

    let entries = SITEMAP_ROUTES
        .iter()
        .map(|route| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <priority>{}</priority>\n    <changefreq>{}</changefreq>\n  </url>",
                escape_xml(&format!("{base}{}", route.path)),
                lastmod,
                route.priority,
                route.changefreq.as_str(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{SITEMAP_HEADER}\n{entries}\n</urlset>\n")
}

/// robots.txt for the environment. Only production is crawlable.
pub fn robots_txt(env: SiteEnv, site_url: &str) -> String {
    match env {
        SiteEnv::Dev => "User-agent: *\nDisallow: /\n".to_string(),
        SiteEnv::Prod => format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
            site_url.trim_end_matches('/')
        ),
    }
}
