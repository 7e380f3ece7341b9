//! Discogs record types
//!
//! Mirrors the subset of the Discogs `/releases/{id}` and `/masters/{id}`
//! JSON documents that the caption engine reads. Every field is optional:
//! Discogs omits or nulls fields freely, and a missing field must degrade to
//! an omitted caption line rather than a parse failure. Unknown fields are
//! ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Discogs release (`GET /releases/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReleaseRecord {
    #[serde(default)]
    pub id: Option<u64>,
    /// Display form of the credited artists, e.g. "Miles Davis Quintet, The"
    #[serde(default)]
    pub artists_sort: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<Artist>>,
    #[serde(default)]
    pub title: Option<String>,
    /// Release year, normalized to text (Discogs sends an integer, 0 when unknown)
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub tracklist: Option<Vec<Track>>,
    /// Release-level credits (producers, engineers, ...)
    #[serde(default)]
    pub extraartists: Option<Vec<CreditEntry>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
}

impl ReleaseRecord {
    pub fn artists(&self) -> &[Artist] {
        self.artists.as_deref().unwrap_or_default()
    }

    pub fn tracklist(&self) -> &[Track] {
        self.tracklist.as_deref().unwrap_or_default()
    }

    pub fn extraartists(&self) -> &[CreditEntry] {
        self.extraartists.as_deref().unwrap_or_default()
    }

    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or_default()
    }

    pub fn styles(&self) -> &[String] {
        self.styles.as_deref().unwrap_or_default()
    }

    /// URI of the first listed image (the primary cover on Discogs)
    ///
    /// Only the first image is considered; if it carries no URI there is no
    /// cover.
    pub fn cover_image_uri(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|images| images.first())
            .and_then(|image| image.uri.as_deref())
            .filter(|uri| !uri.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Artist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Image {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Tracklist entry
///
/// Discogs mixes real tracks with headings ("Side A") and index tracks;
/// `type_` tells them apart and defaults to "track" when absent. An explicit
/// `null` is kept as `None` and is not addressable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Track {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_track_type", rename = "type_")]
    pub type_tag: Option<String>,
}

fn default_track_type() -> Option<String> {
    Some(Track::TRACK_TYPE.to_string())
}

impl Default for Track {
    fn default() -> Self {
        Self {
            title: None,
            type_tag: default_track_type(),
        }
    }
}

impl Track {
    pub const TRACK_TYPE: &'static str = "track";

    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            type_tag: default_track_type(),
        }
    }

    pub fn with_type(title: &str, type_tag: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            type_tag: Some(type_tag.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Whether this entry is addressable by position or name
    pub fn is_track(&self) -> bool {
        self.type_tag.as_deref() == Some(Self::TRACK_TYPE)
    }
}

/// Contributor credit (`extraartists` entry)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CreditEntry {
    /// Free-text role, may list several roles ("Producer, Mixed By")
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CreditEntry {
    pub fn new(role: &str, name: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            name: Some(name.to_string()),
        }
    }
}

/// Discogs master release (`GET /masters/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MasterRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub main_release: Option<u64>,
    #[serde(default)]
    pub main_release_id: Option<u64>,
}

/// Accept the year as integer, string or null
///
/// Integer 0 is Discogs' "unknown" marker and maps to `None`. Strings are
/// kept verbatim; blank handling happens in the caption composer. Any other
/// JSON type is treated as absent.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) if n.as_i64() == Some(0) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}
