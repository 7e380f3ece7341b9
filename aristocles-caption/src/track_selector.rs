//! Track selection from the message hint
//!
//! A message may carry a hint after the first `|`:
//! - `| track:2` picks the second addressable track (1-based)
//! - `| Moonlight` picks the first track whose title contains "moonlight"
//!
//! The two grammars are tried in that order. An index hint that is out of
//! range resolves to nothing; it does not fall back to name matching.
//! Only tracklist entries of type "track" are addressable, so headings and
//! index tracks never count towards positions or match by name.

use crate::models::{ReleaseRecord, Track};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static INDEX_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^track\s*:\s*([0-9]+)").expect("valid index hint pattern"));

/// Result of parsing a hint segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackHint<'a> {
    /// 1-based position among addressable tracks
    Index(usize),
    /// Case-insensitive title fragment
    Name(&'a str),
}

/// Text after the first `|`, trimmed; `None` when the message has no `|`
pub fn hint_segment(user_text: &str) -> Option<&str> {
    user_text.split_once('|').map(|(_, hint)| hint.trim())
}

/// Classify a hint segment
///
/// Anything starting with `track:<digits>` is an index hint, even with
/// trailing text. A position too large to represent is kept as
/// `usize::MAX` so it resolves as out of range.
pub fn parse_hint(hint: &str) -> TrackHint<'_> {
    match INDEX_HINT.captures(hint) {
        Some(caps) => TrackHint::Index(caps[1].parse().unwrap_or(usize::MAX)),
        None => TrackHint::Name(hint),
    }
}

/// Tracklist entries addressable by a hint, in listing order
pub fn addressable_tracks(release: &ReleaseRecord) -> Vec<&Track> {
    release.tracklist().iter().filter(|t| t.is_track()).collect()
}

fn select_by_index<'r>(tracks: &[&'r Track], position: usize) -> Option<&'r str> {
    position
        .checked_sub(1)
        .and_then(|idx| tracks.get(idx).copied())
        .map(Track::title)
}

fn select_by_name<'r>(tracks: &[&'r Track], fragment: &str) -> Option<&'r str> {
    let needle = fragment.to_lowercase();
    tracks
        .iter()
        .copied()
        .map(Track::title)
        .find(|title| title.to_lowercase().contains(&needle))
}

/// Pick the track title the user asked for, if any
pub fn select_track<'r>(release: &'r ReleaseRecord, user_text: &str) -> Option<&'r str> {
    let hint = hint_segment(user_text)?;
    let tracks = addressable_tracks(release);

    let selected = match parse_hint(hint) {
        TrackHint::Index(position) => select_by_index(&tracks, position),
        TrackHint::Name(fragment) => select_by_name(&tracks, fragment),
    };

    debug!(
        hint = %hint,
        addressable = tracks.len(),
        selected = ?selected,
        "Track hint evaluated"
    );

    selected
}
