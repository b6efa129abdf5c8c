// Playlist store - user playlists, persisted one JSON file per playlist
// Covers follow the first song added so lists never render blank art

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::{Playlist, Song};
use crate::error::StoreError;

#[derive(Debug)]
pub struct PlaylistStore {
    playlists: HashMap<String, Playlist>,
    playlists_dir: Option<PathBuf>,
}

impl PlaylistStore {
    /// Memory-only store, nothing touches disk.
    pub fn new() -> Self {
        Self {
            playlists: HashMap::new(),
            playlists_dir: None,
        }
    }

    /// Disk-backed store; loads every playlist file found in the directory.
    pub fn with_dir(playlists_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&playlists_dir)?;

        let mut store = Self {
            playlists: HashMap::new(),
            playlists_dir: Some(playlists_dir),
        };
        store.load_all()?;
        Ok(store)
    }

    fn load_all(&mut self) -> Result<(), StoreError> {
        let Some(dir) = self.playlists_dir.clone() else {
            return Ok(());
        };

        let mut loaded = 0;
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::load_file(&path) {
                Ok(playlist) => {
                    self.playlists.insert(playlist.id.clone(), playlist);
                    loaded += 1;
                }
                Err(e) => warn!("Failed to load playlist from {}: {}", path.display(), e),
            }
        }

        info!("Loaded {} playlist(s) from {}", loaded, dir.display());
        Ok(())
    }

    fn load_file(path: &Path) -> Result<Playlist, StoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, playlist: &Playlist) -> Result<(), StoreError> {
        let Some(dir) = self.playlists_dir.as_ref() else {
            return Ok(());
        };
        let path = dir.join(format!("{}.json", playlist.id));
        let json = serde_json::to_string_pretty(playlist)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn create_playlist(
        &mut self,
        user_id: &str,
        title: String,
        description: Option<String>,
    ) -> Result<String, StoreError> {
        let playlist = Playlist::new(user_id, title.clone(), description);
        let id = playlist.id.clone();

        self.save(&playlist)?;
        self.playlists.insert(id.clone(), playlist);

        info!("Playlist created: '{}'", title);
        Ok(id)
    }

    pub fn add_song(&mut self, playlist_id: &str, song: Song) -> Result<(), StoreError> {
        let playlist = self
            .playlists
            .get_mut(playlist_id)
            .ok_or_else(|| StoreError::PlaylistNotFound(playlist_id.to_string()))?;

        // First song added becomes the cover
        if playlist.songs.is_empty() {
            playlist.cover_url = song.cover_url.clone();
        }
        info!("Song added to playlist {}: {}", playlist_id, song.id);
        playlist.songs.push(song);

        let snapshot = playlist.clone();
        self.save(&snapshot)
    }

    pub fn remove_song(&mut self, playlist_id: &str, song_id: &str) -> Result<(), StoreError> {
        let playlist = self
            .playlists
            .get_mut(playlist_id)
            .ok_or_else(|| StoreError::PlaylistNotFound(playlist_id.to_string()))?;

        playlist.songs.retain(|s| s.id != song_id);
        info!("Song removed from playlist {}: {}", playlist_id, song_id);

        let snapshot = playlist.clone();
        self.save(&snapshot)
    }

    pub fn delete_playlist(&mut self, playlist_id: &str) -> Result<bool, StoreError> {
        let Some(playlist) = self.playlists.remove(playlist_id) else {
            return Ok(false);
        };

        if let Some(dir) = self.playlists_dir.as_ref() {
            let path = dir.join(format!("{}.json", playlist.id));
            if path.exists() {
                fs::remove_file(path)?;
            }
        }

        info!("Playlist deleted: '{}'", playlist.title);
        Ok(true)
    }

    pub fn get(&self, playlist_id: &str) -> Option<&Playlist> {
        self.playlists.get(playlist_id)
    }

    /// All playlists, newest first.
    pub fn list(&self) -> Vec<&Playlist> {
        let mut playlists: Vec<&Playlist> = self.playlists.values().collect();
        playlists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        playlists
    }
}

impl Default for PlaylistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;

    #[test]
    fn test_create_add_remove() {
        let mut store = PlaylistStore::new();
        let id = store
            .create_playlist("user-1", "Road Trip".into(), None)
            .unwrap();
        let song = mock::songs().remove(0);

        store.add_song(&id, song.clone()).unwrap();
        assert_eq!(store.get(&id).unwrap().songs.len(), 1);
        // Cover follows the first song
        assert_eq!(store.get(&id).unwrap().cover_url, song.cover_url);

        store.remove_song(&id, &song.id).unwrap();
        assert!(store.get(&id).unwrap().is_empty());
    }

    #[test]
    fn test_missing_playlist_errors() {
        let mut store = PlaylistStore::new();
        let song = mock::songs().remove(0);

        let result = store.add_song("nope", song);
        assert!(matches!(result, Err(StoreError::PlaylistNotFound(_))));
    }

    #[test]
    fn test_delete_reports_whether_found() {
        let mut store = PlaylistStore::new();
        let id = store
            .create_playlist("user-1", "Gone Soon".into(), None)
            .unwrap();

        assert!(store.delete_playlist(&id).unwrap());
        assert!(!store.delete_playlist(&id).unwrap());
    }

    #[test]
    fn test_playlists_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let song = mock::songs().remove(0);

        let id = {
            let mut store = PlaylistStore::with_dir(dir.path().to_path_buf()).unwrap();
            let id = store
                .create_playlist("user-1", "Keeper".into(), Some("persisted".into()))
                .unwrap();
            store.add_song(&id, song.clone()).unwrap();
            id
        };

        let reloaded = PlaylistStore::with_dir(dir.path().to_path_buf()).unwrap();
        let playlist = reloaded.get(&id).unwrap();
        assert_eq!(playlist.title, "Keeper");
        assert_eq!(playlist.songs.len(), 1);
        assert_eq!(playlist.songs[0].id, song.id);
    }
}
