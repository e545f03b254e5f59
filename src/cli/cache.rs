use crate::{
    error,
    management::{CacheCategory, CacheManager},
    success, warning,
};

pub async fn clear_cache(
    all: bool,
    tracks: bool,
    albums: bool,
    playlists: bool,
    images: bool,
    lyrics: bool,
    tokens: bool,
) {
    if !(all || tracks || albums || playlists || images || lyrics || tokens) {
        warning!("Nothing selected. Pass --all or a category flag; see spdl clear-cache --help.");
        return;
    }

    let cache = CacheManager::new();

    if all {
        match cache.clear_all().await {
            Ok(()) => success!("Cleared all caches."),
            Err(e) => error!("Failed to clear cache: {:?}", e),
        }
        return;
    }

    let selections = [
        (tracks, CacheCategory::Track),
        (albums, CacheCategory::Album),
        (playlists, CacheCategory::Playlist),
        (images, CacheCategory::Image),
        (lyrics, CacheCategory::Lyrics),
        (tokens, CacheCategory::Token),
    ];

    for (selected, category) in selections {
        if !selected {
            continue;
        }

        match cache.clear(category).await {
            Ok(()) => success!("Cleared {} cache.", category.dir_name()),
            Err(e) => warning!("Failed to clear {} cache: {:?}", category.dir_name(), e),
        }
    }
}
