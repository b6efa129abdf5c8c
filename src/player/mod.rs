// Player store - current song, queue, likes and playback flags
// Volume, liked songs and listening history survive restarts; the rest is
// session state

pub mod persist;
pub mod queue;

use std::collections::HashSet;
use std::path::PathBuf;

use rand::thread_rng;
use tracing::{debug, info};

use crate::catalog::Song;
use crate::error::StoreError;
use persist::PlayerSnapshot;

pub const RECENTLY_PLAYED_CAP: usize = 20;

#[derive(Debug)]
pub struct PlayerStore {
    current_song: Option<Song>,
    is_playing: bool,
    volume: f32,
    queue: Vec<Song>,
    playback_progress: f64,
    is_expanded: bool,
    recently_played: Vec<Song>,
    liked_songs: HashSet<String>,
    /// Snapshot file for the persisted subset. None keeps the store
    /// memory-only (tests, ephemeral sessions).
    snapshot_path: Option<PathBuf>,
}

impl PlayerStore {
    pub fn new(default_volume: f32) -> Self {
        Self {
            current_song: None,
            is_playing: false,
            volume: default_volume.clamp(0.0, 1.0),
            queue: Vec::new(),
            playback_progress: 0.0,
            is_expanded: false,
            recently_played: Vec::new(),
            liked_songs: HashSet::new(),
            snapshot_path: None,
        }
    }

    /// Rehydrate from the snapshot file if one exists, then keep persisting
    /// there on every mutation of the persisted subset.
    pub fn with_snapshot(default_volume: f32, path: PathBuf) -> Result<Self, StoreError> {
        let mut store = Self::new(default_volume);

        if path.exists() {
            let snapshot = PlayerSnapshot::load(&path)?;
            store.volume = snapshot.volume.clamp(0.0, 1.0);
            store.liked_songs = snapshot.liked_songs.into_iter().collect();
            store.recently_played = snapshot.recently_played;
            debug!("Rehydrated player state from {}", path.display());
        }

        store.snapshot_path = Some(path);
        Ok(store)
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn queue(&self) -> &[Song] {
        &self.queue
    }

    pub fn playback_progress(&self) -> f64 {
        self.playback_progress
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn recently_played(&self) -> &[Song] {
        &self.recently_played
    }

    /// Swap in a new current song. Anything that starts playing is also
    /// recorded in the listening history.
    pub fn set_current_song(&mut self, song: Option<Song>) {
        if let Some(ref song) = song {
            info!("Now playing: {} - {}", song.display_artist(), song.title);
            self.add_to_recently_played(song.clone());
        }
        self.playback_progress = 0.0;
        self.current_song = song;
    }

    pub fn set_is_playing(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.persist();
    }

    pub fn set_queue(&mut self, queue: Vec<Song>) {
        self.queue = queue;
    }

    pub fn add_to_queue(&mut self, song: Song) {
        self.queue.push(song);
    }

    pub fn remove_from_queue(&mut self, song_id: &str) {
        self.queue.retain(|s| s.id != song_id);
    }

    pub fn set_playback_progress(&mut self, progress: f64) {
        self.playback_progress = progress;
    }

    pub fn set_is_expanded(&mut self, is_expanded: bool) {
        self.is_expanded = is_expanded;
    }

    /// Advance to the next song in the queue, wrapping at the end.
    pub fn play_next(&mut self) {
        let Some(current) = self.current_song.as_ref() else {
            return;
        };
        if let Some(i) = queue::next_index(&self.queue, &current.id) {
            let song = self.queue[i].clone();
            self.set_current_song(Some(song));
        }
    }

    /// Step back to the previous song, wrapping at the front.
    pub fn play_previous(&mut self) {
        let Some(current) = self.current_song.as_ref() else {
            return;
        };
        if let Some(i) = queue::previous_index(&self.queue, &current.id) {
            let song = self.queue[i].clone();
            self.set_current_song(Some(song));
        }
    }

    /// Shuffle everything behind the current song.
    pub fn shuffle_queue(&mut self) {
        let Some(current) = self.current_song.as_ref() else {
            return;
        };
        let current_id = current.id.clone();
        queue::shuffle_keeping_current(&mut self.queue, &current_id, &mut thread_rng());
    }

    fn add_to_recently_played(&mut self, song: Song) {
        self.recently_played.retain(|s| s.id != song.id);
        self.recently_played.insert(0, song);
        self.recently_played.truncate(RECENTLY_PLAYED_CAP);
        self.persist();
    }

    /// Flip a song in or out of the liked set.
    pub fn toggle_like(&mut self, song_id: &str) {
        if !self.liked_songs.remove(song_id) {
            self.liked_songs.insert(song_id.to_string());
        }
        self.persist();
    }

    pub fn is_liked(&self, song_id: &str) -> bool {
        self.liked_songs.contains(song_id)
    }

    pub fn liked_count(&self) -> usize {
        self.liked_songs.len()
    }

    fn persist(&self) {
        let Some(path) = self.snapshot_path.as_ref() else {
            return;
        };
        // Snapshot writes are best-effort; playback must not stall on disk
        if let Err(e) = PlayerSnapshot::from_store(self).save(path) {
            tracing::warn!("Failed to persist player state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;

    fn store_with_queue() -> PlayerStore {
        let mut store = PlayerStore::new(1.0);
        let songs: Vec<Song> = mock::songs().into_iter().take(4).collect();
        store.set_queue(songs.clone());
        store.set_current_song(Some(songs[0].clone()));
        store
    }

    #[test]
    fn test_play_next_wraps_to_front() {
        let mut store = store_with_queue();
        let last = store.queue().last().unwrap().clone();
        store.set_current_song(Some(last));

        store.play_next();

        assert_eq!(store.current_song().unwrap().id, store.queue()[0].id);
    }

    #[test]
    fn test_play_previous_wraps_to_back() {
        let mut store = store_with_queue();

        store.play_previous();

        let last_id = store.queue().last().unwrap().id.clone();
        assert_eq!(store.current_song().unwrap().id, last_id);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut store = store_with_queue();
        let start = store.current_song().unwrap().id.clone();

        for _ in 0..store.queue().len() {
            store.play_next();
        }

        assert_eq!(store.current_song().unwrap().id, start);
    }

    #[test]
    fn test_navigation_without_current_song_is_a_noop() {
        let mut store = PlayerStore::new(1.0);
        store.set_queue(mock::songs());

        store.play_next();
        store.play_previous();

        assert!(store.current_song().is_none());
    }

    #[test]
    fn test_toggle_like_twice_is_identity() {
        let mut store = PlayerStore::new(1.0);

        store.toggle_like("song-1");
        assert!(store.is_liked("song-1"));

        store.toggle_like("song-1");
        assert!(!store.is_liked("song-1"));
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut store = PlayerStore::new(1.0);
        store.set_volume(1.7);
        assert_eq!(store.volume(), 1.0);
        store.set_volume(-0.3);
        assert_eq!(store.volume(), 0.0);
    }

    #[test]
    fn test_recently_played_dedupes_and_caps() {
        let mut store = PlayerStore::new(1.0);
        let songs = mock::songs();

        // Play the same song twice around another one
        store.set_current_song(Some(songs[0].clone()));
        store.set_current_song(Some(songs[1].clone()));
        store.set_current_song(Some(songs[0].clone()));

        let ids: Vec<_> = store.recently_played().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![songs[0].id.as_str(), songs[1].id.as_str()]);

        // Cap at RECENTLY_PLAYED_CAP distinct entries
        for i in 0..(RECENTLY_PLAYED_CAP + 10) {
            let mut song = songs[0].clone();
            song.id = format!("generated-{}", i);
            store.set_current_song(Some(song));
        }
        assert_eq!(store.recently_played().len(), RECENTLY_PLAYED_CAP);
    }

    #[test]
    fn test_remove_from_queue() {
        let mut store = store_with_queue();
        let victim = store.queue()[1].id.clone();

        store.remove_from_queue(&victim);

        assert!(store.queue().iter().all(|s| s.id != victim));
    }

    #[test]
    fn test_shuffle_keeps_current_song_first() {
        let mut store = store_with_queue();
        let current_id = store.current_song().unwrap().id.clone();

        for _ in 0..20 {
            store.shuffle_queue();
            assert_eq!(store.queue()[0].id, current_id);
        }
    }
}
