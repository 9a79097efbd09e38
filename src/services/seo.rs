// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Page metadata and schema.org structured data.
//!
//! Every JSON-LD block leaves this module through [`json_ld_script`], which
//! serializes with [`sanitize_json`] so string data can never close the
//! surrounding script element.

use serde::Serialize;

use crate::models::post::{excerpt, SEO_EXCERPT_CHARS};
use crate::models::WorkoutPost;
use crate::sanitizer::sanitize_json;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const SITE_NAME: &str = "F3RVA";
pub const DEFAULT_TITLE: &str = "F3RVA - Always 70 and Sunny";
pub const DEFAULT_DESCRIPTION: &str = "F3RVA - Fitness, Fellowship, Faith in Richmond, Virginia. Building stronger men through community workouts and leadership development.";

const BASE_KEYWORDS: [&str; 6] = ["f3", "workout", "backblast", "fitness", "richmond", "virginia"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    pub address_locality: String,
    pub address_region: String,
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    pub contact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationData {
    pub name: String,
    pub url: String,
    pub logo: String,
    pub description: String,
    pub same_as: Vec<String>,
    pub address: Option<PostalAddress>,
    pub contact_point: Option<ContactPoint>,
}

impl OrganizationData {
    pub fn f3rva() -> Self {
        Self {
            name: SITE_NAME.to_string(),
            url: "https://f3rva.org".to_string(),
            logo: "https://f3rva.org/images/f3-logo.webp".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            same_as: vec![
                "https://facebook.com/F3Richmond".to_string(),
                "https://instagram.com/F3Richmond".to_string(),
                "https://x.com/F3Richmond".to_string(),
            ],
            address: Some(PostalAddress {
                street_address: None,
                address_locality: "Richmond".to_string(),
                address_region: "Virginia".to_string(),
                address_country: "US".to_string(),
            }),
            contact_point: Some(ContactPoint {
                telephone: None,
                contact_type: "Information".to_string(),
                email: Some("admin@f3rva.org".to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// An organization that is also a physical place people show up to.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBusinessData {
    pub organization: OrganizationData,
    /// schema.org type, e.g. `SportsActivityLocation`
    pub business_type: String,
    pub geo: GeoCoordinates,
    pub area_served: String,
    pub price_range: String,
}

impl LocalBusinessData {
    pub fn f3rva() -> Self {
        Self {
            organization: OrganizationData::f3rva(),
            business_type: "SportsActivityLocation".to_string(),
            geo: GeoCoordinates {
                latitude: 37.541102,
                longitude: -77.482440,
            },
            area_served: "Richmond Metropolitan Area, Virginia".to_string(),
            price_range: "Free".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAction {
    #[serde(rename = "@type")]
    pub kind: String,
    pub target: String,
    #[serde(rename = "query-input")]
    pub query_input: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebsiteData {
    pub url: String,
    pub name: String,
    pub description: String,
    pub publisher: String,
    pub potential_action: Option<SearchAction>,
}

impl WebsiteData {
    /// No search action: the site has no search yet.
    pub fn f3rva() -> Self {
        Self {
            url: "https://f3rva.org".to_string(),
            name: SITE_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            publisher: SITE_NAME.to_string(),
            potential_action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbItem {
    pub name: String,
    /// Absolute URL
    pub item: String,
}

/// Adds a schema.org `@type` to a nested value.
#[derive(Debug, Serialize)]
pub struct Typed<'a, T> {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(flatten)]
    inner: &'a T,
}

#[derive(Debug, Serialize)]
pub struct ImageObject<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFields<'a> {
    geo: Typed<'a, GeoCoordinates>,
    area_served: &'a str,
    price_range: &'a str,
}

/// Organization or LocalBusiness JSON-LD.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSchema<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'a str,
    name: &'a str,
    url: &'a str,
    logo: ImageObject<'a>,
    description: &'a str,
    same_as: &'a [String],
    #[serde(flatten)]
    business: Option<BusinessFields<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Typed<'a, PostalAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_point: Option<Typed<'a, ContactPoint>>,
}

#[derive(Debug, Serialize)]
pub struct PublisherRef<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSchema<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    url: &'a str,
    description: &'a str,
    publisher: PublisherRef<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    potential_action: Option<&'a SearchAction>,
}

#[derive(Debug, Serialize)]
pub struct ListItem<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: usize,
    name: &'a str,
    item: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbSchema<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    item_list_element: Vec<ListItem<'a>>,
}

fn organization_fields<'a>(
    data: &'a OrganizationData,
    kind: &'a str,
    business: Option<BusinessFields<'a>>,
) -> OrganizationSchema<'a> {
    OrganizationSchema {
        context: SCHEMA_CONTEXT,
        kind,
        name: &data.name,
        url: &data.url,
        logo: ImageObject {
            kind: "ImageObject",
            url: &data.logo,
        },
        description: &data.description,
        same_as: &data.same_as,
        business,
        address: data.address.as_ref().map(|inner| Typed {
            kind: "PostalAddress",
            inner,
        }),
        contact_point: data.contact_point.as_ref().map(|inner| Typed {
            kind: "ContactPoint",
            inner,
        }),
    }
}

pub fn organization_schema(data: &OrganizationData) -> OrganizationSchema<'_> {
    organization_fields(data, "Organization", None)
}

pub fn local_business_schema(data: &LocalBusinessData) -> OrganizationSchema<'_> {
    organization_fields(
        &data.organization,
        &data.business_type,
        Some(BusinessFields {
            geo: Typed {
                kind: "GeoCoordinates",
                inner: &data.geo,
            },
            area_served: &data.area_served,
            price_range: &data.price_range,
        }),
    )
}

pub fn website_schema(data: &WebsiteData) -> WebsiteSchema<'_> {
    WebsiteSchema {
        context: SCHEMA_CONTEXT,
        kind: "WebSite",
        name: &data.name,
        url: &data.url,
        description: &data.description,
        publisher: PublisherRef {
            kind: "Organization",
            name: &data.publisher,
        },
        potential_action: data.potential_action.as_ref(),
    }
}

/// Positions are 1-based, in slice order.
pub fn breadcrumb_schema(items: &[BreadcrumbItem]) -> BreadcrumbSchema<'_> {
    BreadcrumbSchema {
        context: SCHEMA_CONTEXT,
        kind: "BreadcrumbList",
        item_list_element: items
            .iter()
            .enumerate()
            .map(|(i, crumb)| ListItem {
                kind: "ListItem",
                position: i + 1,
                name: &crumb.name,
                item: &crumb.item,
            })
            .collect(),
    }
}

/// Wrap structured data in a JSON-LD script element.
pub fn json_ld_script<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    Ok(format!(
        r#"<script type="application/ld+json">{}</script>"#,
        sanitize_json(data)?
    ))
}

/// `"{title} | F3RVA"`, except the site default title is used as is.
pub fn full_title(title: &str) -> String {
    if title == DEFAULT_TITLE {
        title.to_string()
    } else {
        format!("{title} | {SITE_NAME}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    Website,
    Article,
}

/// Head metadata for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_type: OgType,
    pub keywords: Vec<String>,
    /// Ready-to-insert `<script type="application/ld+json">` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<String>,
}

impl PageMeta {
    pub fn website(title: &str, description: Option<&str>, canonical: String) -> Self {
        Self {
            title: full_title(title),
            description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            canonical,
            og_type: OgType::Website,
            keywords: Vec::new(),
            structured_data: None,
        }
    }

    /// Metadata for an archive listing. `label` is the listing heading for
    /// scoped listings and `None` for the full archive.
    pub fn for_listing(label: Option<&str>, site_url: &str, path: &str) -> Self {
        let canonical = format!("{}{path}", site_url.trim_end_matches('/'));
        let (title, description) = match label {
            None => (
                "Archives - F3RVA Workout Backblasts".to_string(),
                "Browse archived workout backblasts from F3RVA. Read detailed accounts of past workouts, QICs, PAX attendance, and workout locations across the Richmond region.".to_string(),
            ),
            Some(label) => (
                format!("{label} Archives - F3RVA Workout Backblasts"),
                format!("Browse {label} workout backblasts from F3RVA. Read detailed accounts of workouts, QICs, PAX attendance, and workout locations from {label}."),
            ),
        };

        Self {
            title: full_title(&title),
            description,
            canonical,
            og_type: OgType::Website,
            keywords: ["f3", "archives", "backblasts", "workouts", "richmond", "virginia", "fitness"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            structured_data: None,
        }
    }

    /// Article metadata for a post, with a Home > Archives > post breadcrumb.
    pub fn for_post(
        post: &WorkoutPost,
        site_url: &str,
        permalink: &str,
    ) -> serde_json::Result<Self> {
        let site_url = site_url.trim_end_matches('/');
        let canonical = format!("{site_url}{permalink}");

        let crumbs = [
            BreadcrumbItem {
                name: "Home".to_string(),
                item: site_url.to_string(),
            },
            BreadcrumbItem {
                name: "Archives".to_string(),
                item: format!("{site_url}/archives"),
            },
            BreadcrumbItem {
                name: post.title.clone(),
                item: canonical.clone(),
            },
        ];

        let keywords = BASE_KEYWORDS
            .iter()
            .copied()
            .chain(post.qic_names())
            .chain(post.ao_names())
            .map(str::to_string)
            .collect();

        Ok(Self {
            title: full_title(&format!("{} - F3RVA Archives", post.title)),
            description: excerpt(&post.content, SEO_EXCERPT_CHARS),
            canonical,
            og_type: OgType::Article,
            keywords,
            structured_data: Some(json_ld_script(&breadcrumb_schema(&crumbs))?),
        })
    }
}
