//! User-facing reply texts

use crate::services::discogs_client::DiscogsError;

/// Reply to `/start`
pub const HELP_TEXT: &str =
    "Send a Discogs release/master URL. Optionally add `| track:2` or `| Track Title`.";

/// Reply when the message holds no Discogs release/master link
pub const INVALID_URL_TEXT: &str = "Send a valid Discogs release/master URL.";

/// Reply when a master has no main release to show
pub const NO_DATA_TEXT: &str = "Couldn't get data from Discogs.";

/// Reply when a Discogs lookup fails
pub fn discogs_error_text(error: &DiscogsError) -> String {
    format!("Discogs error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discogs_error_text() {
        let text = discogs_error_text(&DiscogsError::NotFound("release 42".to_string()));
        assert_eq!(text, "Discogs error: Not found: release 42");
    }
}
