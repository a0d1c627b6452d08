//! Enumerated client options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content version requested from the delivery API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// Unpublished working copy
    Draft,
    /// Live content
    #[default]
    Published,
}

/// Hosting region of the content space.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Europe
    #[default]
    Eu,
    /// United States
    Us,
    /// Asia Pacific
    Ap,
    /// Canada
    Ca,
    /// China
    Cn,
}

impl Region {
    /// API host serving this region.
    pub fn host(&self) -> &'static str {
        match self {
            Region::Eu => "api.storyblok.com",
            Region::Us => "api-us.storyblok.com",
            Region::Ap => "api-ap.storyblok.com",
            Region::Ca => "api-ca.storyblok.com",
            Region::Cn => "app.storyblokchina.cn",
        }
    }
}

/// Policy for flushing cached reads when the content version changes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CacheClear {
    /// Entries survive until explicitly flushed
    #[default]
    Manual,
    /// Version changes and writes invalidate entries
    Auto,
    /// Version changes invalidate entries only for draft reads
    OnPreview,
}

impl CacheClear {
    /// Whether a version change observed on a read of `version` flushes the scope.
    pub fn flushes_on_version_change(&self, version: Version) -> bool {
        match self {
            CacheClear::Manual => false,
            CacheClear::Auto => true,
            CacheClear::OnPreview => version == Version::Draft,
        }
    }
}

/// Requested link resolution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResolveLinks {
    /// Embed the full story
    Story,
    /// Embed the url only
    Url,
    /// Embed the link object
    Link,
}

impl ResolveLinks {
    /// Interpret a `resolve_links` parameter value.
    ///
    /// `"1"` and `1` are accepted as aliases for [`ResolveLinks::Story`].
    ///
    /// ```
    /// use folio_core::ResolveLinks;
    /// use serde_json::json;
    ///
    /// assert_eq!(ResolveLinks::from_param(&json!("url")), Some(ResolveLinks::Url));
    /// assert_eq!(ResolveLinks::from_param(&json!(1)), Some(ResolveLinks::Story));
    /// assert_eq!(ResolveLinks::from_param(&json!("0")), None);
    /// ```
    pub fn from_param(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.as_str() {
                "1" | "story" => Some(ResolveLinks::Story),
                "url" => Some(ResolveLinks::Url),
                "link" => Some(ResolveLinks::Link),
                _ => None,
            },
            Value::Number(n) if n.as_u64() == Some(1) => Some(ResolveLinks::Story),
            _ => None,
        }
    }
}
