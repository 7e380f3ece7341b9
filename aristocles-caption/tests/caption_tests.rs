//! End-to-end tests for the caption engine
//!
//! Drives the public API with Discogs-shaped JSON, from link identification
//! through master resolution to the final caption text.

use aristocles_caption::credits::{engineers, producers};
use aristocles_caption::master::main_release_id;
use aristocles_caption::tags::build_hashtags;
use aristocles_caption::track_selector::select_track;
use aristocles_caption::{compose_caption, identify, EntityKind, MasterRecord, ReleaseRecord};
use serde_json::json;

/// Trimmed-down copy of a real `/releases/{id}` response
fn sample_release() -> ReleaseRecord {
    serde_json::from_value(json!({
        "id": 1_369_186,
        "status": "Accepted",
        "year": 1994,
        "resource_url": "https://api.discogs.com/releases/1369186",
        "artists": [
            { "name": "Nas", "anv": "", "join": "", "role": "", "id": 20_838 }
        ],
        "artists_sort": "Nas",
        "title": "Illmatic",
        "genres": ["Hip Hop"],
        "styles": ["Boom Bap", "Conscious"],
        "images": [
            { "type": "primary", "uri": "https://i.discogs.com/illmatic.jpg", "width": 600 },
            { "type": "secondary", "uri": "https://i.discogs.com/back.jpg", "width": 600 }
        ],
        "tracklist": [
            { "position": "", "type_": "heading", "title": "40th Side North" },
            { "position": "A1", "type_": "track", "title": "The Genesis", "duration": "1:45" },
            { "position": "A2", "type_": "track", "title": "N.Y. State Of Mind", "duration": "4:54" },
            { "position": "A3", "type_": "track", "title": "Life's A Bitch", "duration": "3:30" },
            { "position": "", "type_": "heading", "title": "41st Side South" },
            { "position": "B1", "title": "Halftime", "duration": "4:20" }
        ],
        "extraartists": [
            { "name": "DJ Premier", "role": "Producer", "tracks": "A2" },
            { "name": "Large Professor", "role": "Producer", "tracks": "A1" },
            { "name": "Pete Rock", "role": "Producer, Mixed By", "tracks": "A4" },
            { "name": "DJ Premier", "role": "Mixed By" },
            { "name": "Tony Dawsey", "role": "Mastered By" },
            { "name": "Jack Hersca", "role": "Recorded By" },
            { "name": "Tony Dawsey", "role": "Lacquer Cut By, Mastered By" }
        ]
    }))
    .expect("sample release should deserialize")
}

// =============================================================================
// URL identification
// =============================================================================

#[test]
fn test_release_urls_resolve_regardless_of_path_and_case() {
    for url in [
        "https://www.discogs.com/release/1369186",
        "https://www.discogs.com/release/1369186-Nas-Illmatic",
        "https://www.discogs.com/Nas-Illmatic/Release/1369186",
        "check this https://www.discogs.com/de/RELEASE/1369186 out",
    ] {
        let reference = identify(url).expect("release URL should be recognized");
        assert_eq!(reference.kind, EntityKind::Release, "{}", url);
        assert_eq!(reference.id, 1_369_186, "{}", url);
    }
}

#[test]
fn test_master_urls_and_rejections() {
    let reference = identify("https://www.discogs.com/master/16063-Nas-Illmatic").unwrap();
    assert_eq!(reference.kind, EntityKind::Master);
    assert_eq!(reference.id, 16063);

    assert!(identify("https://www.discogs.com/artist/20838-Nas").is_none());
    assert!(identify("just some chatter").is_none());
}

// =============================================================================
// Master resolution
// =============================================================================

#[test]
fn test_master_payload_points_at_main_release() {
    let master: MasterRecord = serde_json::from_value(json!({
        "id": 16063,
        "main_release": 1_369_186,
        "most_recent_release": 28_000_000,
        "title": "Illmatic"
    }))
    .unwrap();
    assert_eq!(main_release_id(&master), Some(1_369_186));

    let empty: MasterRecord = serde_json::from_value(json!({ "id": 1 })).unwrap();
    assert_eq!(main_release_id(&empty), None);
}

// =============================================================================
// Credits
// =============================================================================

#[test]
fn test_credit_buckets_are_deduplicated_in_order() {
    let release = sample_release();

    assert_eq!(
        producers(release.extraartists()),
        vec!["DJ Premier", "Large Professor", "Pete Rock"]
    );
    assert_eq!(
        engineers(release.extraartists()),
        vec!["Pete Rock", "DJ Premier", "Tony Dawsey", "Jack Hersca"]
    );
}

// =============================================================================
// Track selection
// =============================================================================

#[test]
fn test_index_hint_skips_headings() {
    let release = sample_release();
    assert_eq!(select_track(&release, "url | track:2"), Some("N.Y. State Of Mind"));
    assert_eq!(select_track(&release, "url | track:4"), Some("Halftime"));
    assert_eq!(select_track(&release, "url | track:9"), None);
}

#[test]
fn test_name_hint_is_case_insensitive_substring() {
    let release = sample_release();
    assert_eq!(select_track(&release, "url | state of MIND"), Some("N.Y. State Of Mind"));
    assert_eq!(select_track(&release, "url | side"), None);
    assert_eq!(select_track(&release, "url state of mind"), None);
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn test_hashtags_from_genres_and_styles() {
    let genres = vec!["Hip Hop".to_string(), "Jazz-Funk".to_string()];
    let styles = vec![String::new()];
    assert_eq!(build_hashtags(&genres, &styles), "#HipHop #JazzFunk");
}

// =============================================================================
// Caption composition
// =============================================================================

#[test]
fn test_minimal_record_caption() {
    let release: ReleaseRecord = serde_json::from_value(json!({
        "artists": [ { "name": "A" } ],
        "title": "B",
        "year": 2001,
        "genres": ["Soul"]
    }))
    .unwrap();

    assert_eq!(
        compose_caption(&release, "https://www.discogs.com/release/1"),
        "🎧 Artist : A\n💿 Album : B\n📅 Date : 2001 #00s\n#Soul"
    );
}

#[test]
fn test_full_caption_with_track_hint() {
    let release = sample_release();
    let caption = compose_caption(
        &release,
        "https://www.discogs.com/release/1369186 | N.Y. State",
    );

    assert_eq!(
        caption,
        "🎧 Artist : Nas\n\
         🎵 Track Title : N.Y. State Of Mind\n\
         💿 Album : Illmatic\n\
         🎚 Producer : DJ Premier, Large Professor, Pete Rock\n\
         🎛 Sound Engineer : Pete Rock, DJ Premier, Tony Dawsey, Jack Hersca\n\
         📅 Date : 1994 #90s\n\
         #HipHop #BoomBap #Conscious"
    );
}

#[test]
fn test_unmatched_hint_omits_track_line() {
    let release = sample_release();
    let caption = compose_caption(&release, "url | Represent");
    assert!(!caption.contains("Track Title"));
}

#[test]
fn test_two_digit_year_has_no_decade_tag() {
    let release: ReleaseRecord = serde_json::from_value(json!({ "year": "94" })).unwrap();
    assert_eq!(compose_caption(&release, ""), "🎧 Artist : \n💿 Album : \n📅 Date : 94");
}

#[test]
fn test_unknown_year_omits_date_line() {
    let release: ReleaseRecord =
        serde_json::from_value(json!({ "title": "B", "year": 0 })).unwrap();
    assert_eq!(compose_caption(&release, ""), "🎧 Artist : \n💿 Album : B");
}
