//! Caption derivation engine
//!
//! Turns a Discogs release record plus the raw chat message into the caption
//! posted by the bot. Everything here is pure and synchronous: no I/O, no
//! shared state. Fetching records and delivering captions is the service
//! layer's job (see `aristocles-bot`).
//!
//! Pipeline:
//! 1. [`reference::identify`] finds a release/master reference in the text
//! 2. [`master::main_release_id`] follows a master to its main release
//! 3. [`caption::compose_caption`] builds the caption, using
//!    [`track_selector`], [`credits`] and [`tags`]

pub mod caption;
pub mod credits;
pub mod master;
pub mod models;
pub mod reference;
pub mod tags;
pub mod track_selector;

pub use caption::{compose_caption, Caption};
pub use models::{Artist, CreditEntry, Image, MasterRecord, ReleaseRecord, Track};
pub use reference::{identify, DiscogsRef, EntityKind};
