use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub expire_time: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
    pub artists: Vec<Artist>,
    pub album: TrackAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
    pub release_date: String,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub images: Vec<Image>,
    pub tracks: AlbumTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTracks {
    pub items: Vec<AlbumTrack>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KugouSongSearchResponse {
    #[serde(default)]
    pub data: KugouSongSearchData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KugouSongSearchData {
    #[serde(default)]
    pub info: Vec<KugouSong>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KugouSong {
    pub hash: String,
    pub songname: String,
    pub singername: String,
    pub duration: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KugouLyricsSearchResponse {
    #[serde(default)]
    pub candidates: Vec<KugouLyricsCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KugouLyricsCandidate {
    pub id: String,
    pub accesskey: String,
    pub song: String,
    pub singer: String,
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KugouLyricsResponse {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YtSearchResult {
    #[serde(default)]
    pub entries: Vec<YtSearchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YtSearchEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub duration: Option<f64>,
    pub original_url: Option<String>,
    pub webpage_url: Option<String>,
}

#[derive(Debug, Clone)]
pub enum TrackOrigin {
    Single,
    Album(String),
    Playlist(String),
}

#[derive(Debug, Clone)]
pub enum MediaRef {
    Video { url: String },
    SearchFirst { url: String },
}

#[derive(Debug, Clone)]
pub struct SimpleTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub release_date: String,
    pub cover_url: Option<String>,
    pub duration_ms: u64,
    pub origin: TrackOrigin,
}

#[derive(Tabled)]
pub struct TagTableRow {
    pub tag: String,
    pub value: String,
}
