//! # Kugou Lyrics Module
//!
//! Synced-lyrics retrieval from the Kugou music service. Kugou indexes
//! lyrics by audio fingerprint hash, which makes it possible to find lyrics
//! timed against a specific recording rather than just a song title — the
//! fingerprint search is duration-gated for precision, with a plain keyword
//! search as the recall fallback when the fingerprint index lacks the track.
//!
//! The API surface used here is small and unauthenticated:
//!
//! - `mobileservice.kugou.com/api/v3/search/song` — song search returning
//!   fingerprint hashes with durations
//! - `lyrics.kugou.com/search` — lyrics candidates by `hash=` or `keyword=`
//! - `lyrics.kugou.com/download` — base64 lyrics content by candidate
//!   `(id, accesskey)` pair
//!
//! Raw lyrics arrive with uploader credit lines embedded as pseudo-lyric
//! entries; [`clean_lyrics`] strips those before anything is cached or
//! written into a tag.

mod lyrics;

pub use lyrics::Kugou;
pub use lyrics::clean_lyrics;
pub use lyrics::duration_matches;
