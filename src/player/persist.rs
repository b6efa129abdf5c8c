// Persisted slice of the player state - the local-storage emulation
// Only volume, liked songs and listening history are worth keeping

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Song;
use crate::error::StoreError;
use super::PlayerStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub volume: f32,
    pub liked_songs: Vec<String>,
    pub recently_played: Vec<Song>,
}

impl PlayerSnapshot {
    pub fn from_store(store: &PlayerStore) -> Self {
        let mut liked_songs: Vec<String> = store.liked_songs.iter().cloned().collect();
        // HashSet order is arbitrary; sort so snapshots diff cleanly
        liked_songs.sort();

        Self {
            volume: store.volume,
            liked_songs,
            recently_played: store.recently_played.clone(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");

        let mut store = PlayerStore::with_snapshot(0.8, path.clone()).unwrap();
        store.set_volume(0.5);
        store.toggle_like("song-1");
        store.toggle_like("song-2");
        store.set_current_song(Some(mock::songs()[0].clone()));

        // A fresh store picks up the persisted subset
        let restored = PlayerStore::with_snapshot(1.0, path).unwrap();
        assert_eq!(restored.volume(), 0.5);
        assert!(restored.is_liked("song-1"));
        assert!(restored.is_liked("song-2"));
        assert_eq!(restored.recently_played().len(), 1);

        // Session-only state does not survive
        assert!(restored.current_song().is_none());
        assert!(restored.queue().is_empty());
    }

    #[test]
    fn test_unliking_persists_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");

        let mut store = PlayerStore::with_snapshot(1.0, path.clone()).unwrap();
        store.toggle_like("song-1");
        store.toggle_like("song-1");

        let restored = PlayerStore::with_snapshot(1.0, path).unwrap();
        assert!(!restored.is_liked("song-1"));
    }
}
