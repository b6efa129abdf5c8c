// Catalog types - the records every store trades in
// The backend owns the real rows; we hold denormalized copies

pub mod mock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Moderation state of an uploaded song. Only approved songs are visible
/// in the storefront and search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    /// Denormalized from the artist row so lists render without a join.
    pub artist_name: Option<String>,
    pub cover_url: String,
    pub song_url: String,
    pub price: f64,
    pub genre: String,
    pub duration: u64, // seconds
    pub plays: u64,
    pub status: SongStatus,
    pub created_at: DateTime<Utc>,
}

impl Song {
    pub fn display_artist(&self) -> &str {
        self.artist_name.as_deref().unwrap_or("Unknown Artist")
    }

    pub fn duration_string(&self) -> String {
        let minutes = self.duration / 60;
        let seconds = self.duration % 60;
        format!("{}:{:02}", minutes, seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub user_id: String,
    pub artist_name: String,
    pub bio: String,
    pub verified: bool,
    pub total_sales: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub is_artist: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub user_id: String,
    pub song_id: String,
    pub amount: f64,
    pub platform_fee: f64,
    pub artist_revenue: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub songs: Vec<Song>,
}

impl Playlist {
    pub fn new(user_id: &str, title: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title,
            description,
            cover_url: mock::DEFAULT_PLAYLIST_COVER.to_string(),
            is_public: false,
            created_at: Utc::now(),
            songs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn duration_string(&self) -> String {
        let total: u64 = self.songs.iter().map(|s| s.duration).sum();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

/// Severity of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Community records. receiver_id is None for the public room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: Option<String>,
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub author_name: String,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumComment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub user_id: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}
