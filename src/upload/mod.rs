// Upload flow - stages the audio file and cover art into the local
// object-storage emulation, then creates a pending song for moderation

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{Artist, Song, SongStatus};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct SongSubmission {
    pub title: String,
    pub genre: String,
    pub price: f64,
    pub song_path: PathBuf,
    pub cover_path: PathBuf,
}

#[derive(Debug)]
pub struct UploadStore {
    storage_dir: PathBuf,
    is_uploading: bool,
    progress: u8,
    latency: Duration,
}

impl UploadStore {
    pub fn new(storage_dir: PathBuf, latency: Duration) -> Self {
        Self {
            storage_dir,
            is_uploading: false,
            progress: 0,
            latency,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Stage both files and create the song record. The song comes back in
    /// `pending` state with a zero duration; moderation and audio probing
    /// happen server-side after upload.
    pub async fn upload_song(
        &mut self,
        artist: &Artist,
        submission: SongSubmission,
    ) -> Result<Song, StoreError> {
        if submission.title.trim().is_empty() {
            return Err(StoreError::InvalidSubmission("title is required".into()));
        }
        if submission.price < 0.0 {
            return Err(StoreError::InvalidSubmission("price cannot be negative".into()));
        }

        self.is_uploading = true;
        self.progress = 0;

        let result = self.stage_files(artist, &submission).await;

        self.is_uploading = false;
        match &result {
            Ok(_) => self.progress = 100,
            Err(_) => self.progress = 0,
        }
        result
    }

    async fn stage_files(
        &mut self,
        artist: &Artist,
        submission: &SongSubmission,
    ) -> Result<Song, StoreError> {
        tokio::time::sleep(self.latency).await;

        let song_url = self.stage(&submission.song_path, "songs")?;
        self.progress = 50;

        let cover_url = self.stage(&submission.cover_path, "covers")?;
        self.progress = 90;

        let song = Song {
            id: Uuid::new_v4().to_string(),
            title: submission.title.clone(),
            artist_id: artist.id.clone(),
            artist_name: Some(artist.artist_name.clone()),
            cover_url,
            song_url,
            price: submission.price,
            genre: submission.genre.clone(),
            duration: 0,
            plays: 0,
            status: SongStatus::Pending,
            created_at: Utc::now(),
        };

        info!("Song uploaded for review: '{}' by {}", song.title, artist.artist_name);
        Ok(song)
    }

    /// Copy a file into the storage emulation under a collision-free name
    /// and return its "public URL" (here: the staged path).
    fn stage(&self, source: &Path, bucket: &str) -> Result<String, StoreError> {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidSubmission("file has no name".into()))?;

        let bucket_dir = self.storage_dir.join(bucket);
        fs::create_dir_all(&bucket_dir)?;

        let staged_name = format!("{}-{}", Utc::now().timestamp_millis(), file_name);
        let target = bucket_dir.join(&staged_name);
        fs::copy(source, &target)?;

        Ok(target.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;
    use std::io::Write;

    fn submission(dir: &Path) -> SongSubmission {
        let song_path = dir.join("demo.mp3");
        let cover_path = dir.join("cover.png");
        fs::File::create(&song_path).unwrap().write_all(b"audio").unwrap();
        fs::File::create(&cover_path).unwrap().write_all(b"image").unwrap();

        SongSubmission {
            title: "Demo Tape".into(),
            genre: "rock".into(),
            price: 1.49,
            song_path,
            cover_path,
        }
    }

    #[tokio::test]
    async fn test_upload_creates_pending_song() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UploadStore::new(dir.path().join("storage"), Duration::ZERO);
        let artist = mock::artists().remove(0);

        let song = store
            .upload_song(&artist, submission(dir.path()))
            .await
            .unwrap();

        assert_eq!(song.status, SongStatus::Pending);
        assert_eq!(song.duration, 0);
        assert_eq!(song.artist_id, artist.id);
        assert_eq!(store.progress(), 100);
        assert!(!store.is_uploading());

        // Both files landed in the storage emulation
        assert!(Path::new(&song.song_url).exists());
        assert!(Path::new(&song.cover_url).exists());
    }

    #[tokio::test]
    async fn test_upload_rejects_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UploadStore::new(dir.path().join("storage"), Duration::ZERO);
        let artist = mock::artists().remove(0);

        let mut sub = submission(dir.path());
        sub.title = "   ".into();

        let result = store.upload_song(&artist, sub).await;
        assert!(matches!(result, Err(StoreError::InvalidSubmission(_))));
    }

    #[tokio::test]
    async fn test_missing_file_resets_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UploadStore::new(dir.path().join("storage"), Duration::ZERO);
        let artist = mock::artists().remove(0);

        let mut sub = submission(dir.path());
        sub.song_path = dir.path().join("does-not-exist.mp3");

        let result = store.upload_song(&artist, sub).await;
        assert!(result.is_err());
        assert_eq!(store.progress(), 0);
        assert!(!store.is_uploading());
    }
}
