//! Caption composition
//!
//! Builds the post caption from a release record and the raw message:
//!
//! ```text
//! 🎧 Artist : <artists>
//! 🎵 Track Title : <track>          (only with a matching hint)
//! 💿 Album : <title>
//! 🎚 Producer : <names>             (only when credited)
//! 🎛 Sound Engineer : <names>       (only when credited)
//! 📅 Date : <year> [#<decade>s]     (only with a year)
//! #Genre #Style                     (only with genres/styles)
//! ```
//!
//! Artist and Album lines are always present, possibly with an empty value.

use crate::credits;
use crate::models::ReleaseRecord;
use crate::tags::build_hashtags;
use crate::track_selector::select_track;
use std::fmt;

pub const ARTIST_LABEL: &str = "🎧 Artist : ";
pub const TRACK_LABEL: &str = "🎵 Track Title : ";
pub const ALBUM_LABEL: &str = "💿 Album : ";
pub const PRODUCER_LABEL: &str = "🎚 Producer : ";
pub const ENGINEER_LABEL: &str = "🎛 Sound Engineer : ";
pub const DATE_LABEL: &str = "📅 Date : ";

const NAME_SEPARATOR: &str = ", ";

/// Ordered caption lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    lines: Vec<String>,
}

impl Caption {
    /// Compose the caption for `release` given the raw message text
    pub fn compose(release: &ReleaseRecord, user_text: &str) -> Self {
        let mut lines = Vec::with_capacity(7);

        lines.push(format!("{}{}", ARTIST_LABEL, artist_line(release)));

        if let Some(track) = select_track(release, user_text).filter(|t| !t.is_empty()) {
            lines.push(format!("{}{}", TRACK_LABEL, track));
        }

        lines.push(format!(
            "{}{}",
            ALBUM_LABEL,
            release.title.as_deref().unwrap_or_default()
        ));

        let producers = credits::producers(release.extraartists());
        if !producers.is_empty() {
            lines.push(format!("{}{}", PRODUCER_LABEL, producers.join(NAME_SEPARATOR)));
        }

        let engineers = credits::engineers(release.extraartists());
        if !engineers.is_empty() {
            lines.push(format!("{}{}", ENGINEER_LABEL, engineers.join(NAME_SEPARATOR)));
        }

        let year = release.year.as_deref().unwrap_or_default().trim();
        if !year.is_empty() {
            let decade = decade_tag(year)
                .map(|tag| format!(" {}", tag))
                .unwrap_or_default();
            lines.push(format!("{}{}{}", DATE_LABEL, year, decade));
        }

        let tags = build_hashtags(release.genres(), release.styles());
        if !tags.is_empty() {
            lines.push(tags);
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Caption text for `release` given the raw message text
pub fn compose_caption(release: &ReleaseRecord, user_text: &str) -> String {
    Caption::compose(release, user_text).into_text()
}

/// `artists_sort` when present, otherwise the artist names joined
fn artist_line(release: &ReleaseRecord) -> String {
    match release.artists_sort.as_deref() {
        Some(sorted) if !sorted.is_empty() => sorted.to_string(),
        _ => release
            .artists()
            .iter()
            .map(|artist| artist.name.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(NAME_SEPARATOR),
    }
}

/// Decade hashtag for a four-digit year: "1987" → "#80s", "2001" → "#00s"
///
/// Any other shape ("94", "19xx", "10000") gets no decade tag.
pub fn decade_tag(year: &str) -> Option<String> {
    let bytes = year.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(format!("#{}0s", bytes[2] as char))
}
