//! Discogs URL identification
//!
//! Finds a `discogs.com/.../release/<id>` or `discogs.com/.../master/<id>`
//! reference anywhere in a chat message. Release links win when both are
//! present.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static RELEASE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)discogs\.com/(?:.*?/)?release/([0-9]+)").expect("valid release pattern")
});

static MASTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)discogs\.com/(?:.*?/)?master/([0-9]+)").expect("valid master pattern")
});

/// Kind of Discogs entity a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Release,
    Master,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Release => "release",
            EntityKind::Master => "master",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized Discogs reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscogsRef {
    pub kind: EntityKind,
    pub id: u64,
}

impl fmt::Display for DiscogsRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Identify the Discogs entity referenced in `text`
///
/// Returns `None` when the text holds no recognizable link; the caller
/// answers with the usage text. An id too large for `u64` cannot name a real
/// Discogs entity and is treated as unrecognized.
pub fn identify(text: &str) -> Option<DiscogsRef> {
    if let Some(caps) = RELEASE_PATTERN.captures(text) {
        return caps[1].parse().ok().map(|id| DiscogsRef {
            kind: EntityKind::Release,
            id,
        });
    }

    MASTER_PATTERN.captures(text).and_then(|caps| {
        caps[1].parse().ok().map(|id| DiscogsRef {
            kind: EntityKind::Master,
            id,
        })
    })
}
