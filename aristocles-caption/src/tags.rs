//! Genre/style hashtags

/// Hashtag line from genres then styles, e.g. `#HipHop #JazzFunk`
///
/// Blank entries are skipped. Every character other than an ASCII letter or
/// digit is stripped (not escaped), so "Hip Hop" becomes `#HipHop` and
/// "Drum n Bass" becomes `#DrumnBass`. Returns an empty string when there is
/// nothing to tag.
pub fn build_hashtags(genres: &[String], styles: &[String]) -> String {
    genres
        .iter()
        .chain(styles)
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| hashtag(entry))
        .collect::<Vec<_>>()
        .join(" ")
}

fn hashtag(entry: &str) -> String {
    let mut tag = String::with_capacity(entry.len() + 1);
    tag.push('#');
    tag.extend(entry.chars().filter(char::is_ascii_alphanumeric));
    tag
}
