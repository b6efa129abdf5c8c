// Admin store - moderation queue, artist verification, platform analytics
// Approve/reject mutate the song's status on the local catalog copy

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{mock, Artist, Purchase, Song, SongStatus};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Banned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub is_artist: bool,
    pub status: AccountStatus,
}

/// Platform-wide analytics snapshot. In production this comes from a
/// reporting query; the mock returns fixed figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub total_artists: u64,
    pub total_users: u64,
    pub total_songs: u64,
    pub new_songs_24h: u64,
    pub total_plays: u64,
    pub average_rating: f64,
    pub new_users_24h: u64,
    pub active_users: u64,
    pub user_growth: f64,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Healthy,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    pub server_status: ServerStatus,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub storage_usage: f64,
    pub api_response_time_ms: u64,
    pub api_error_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub kind: String,
    pub generated_at: DateTime<Utc>,
    pub analytics: Analytics,
}

#[derive(Debug)]
pub struct AdminStore {
    songs: Vec<Song>,
    pending: Vec<Song>,
    artists: Vec<Artist>,
    purchases: Vec<Purchase>,
    analytics: Option<Analytics>,
    health: Option<SystemHealth>,
    is_loading: bool,
    latency: Duration,
}

impl AdminStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            songs: mock::songs(),
            pending: Vec::new(),
            artists: Vec::new(),
            purchases: Vec::new(),
            analytics: None,
            health: None,
            is_loading: false,
            latency,
        }
    }

    pub fn pending_songs(&self) -> &[Song] {
        &self.pending
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn analytics(&self) -> Option<&Analytics> {
        self.analytics.as_ref()
    }

    pub fn system_health(&self) -> Option<&SystemHealth> {
        self.health.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn fetch_pending_songs(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.pending = self
            .songs
            .iter()
            .filter(|s| s.status == SongStatus::Pending)
            .cloned()
            .collect();
        self.is_loading = false;

        info!("Pending songs fetched: {}", self.pending.len());
        Ok(())
    }

    /// Queue a freshly uploaded song for moderation.
    pub fn enqueue_song(&mut self, song: Song) {
        self.pending.push(song.clone());
        self.songs.push(song);
    }

    fn set_status(&mut self, song_id: &str, status: SongStatus) -> Result<(), StoreError> {
        let song = self
            .songs
            .iter_mut()
            .find(|s| s.id == song_id)
            .ok_or_else(|| StoreError::SongNotFound(song_id.to_string()))?;
        song.status = status;
        self.pending.retain(|s| s.id != song_id);
        Ok(())
    }

    pub async fn approve_song(&mut self, song_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;
        self.set_status(song_id, SongStatus::Approved)?;
        info!("Song approved: {}", song_id);
        Ok(())
    }

    pub async fn reject_song(&mut self, song_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;
        self.set_status(song_id, SongStatus::Rejected)?;
        info!("Song rejected: {}", song_id);
        Ok(())
    }

    pub async fn delete_song(&mut self, song_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        if !self.songs.iter().any(|s| s.id == song_id) {
            return Err(StoreError::SongNotFound(song_id.to_string()));
        }
        self.songs.retain(|s| s.id != song_id);
        self.pending.retain(|s| s.id != song_id);

        info!("Song deleted: {}", song_id);
        Ok(())
    }

    pub async fn fetch_artists(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.artists = mock::artists();
        self.is_loading = false;

        info!("Artists fetched: {}", self.artists.len());
        Ok(())
    }

    pub async fn verify_artist(&mut self, artist_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        for artist in &mut self.artists {
            if artist.id == artist_id {
                artist.verified = true;
            }
        }

        info!("Artist verified: {}", artist_id);
        Ok(())
    }

    pub async fn fetch_purchases(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.purchases = mock::purchases();
        self.is_loading = false;
        Ok(())
    }

    pub async fn fetch_analytics(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.analytics = Some(Self::snapshot_analytics());
        self.is_loading = false;

        info!("Analytics fetched");
        Ok(())
    }

    fn snapshot_analytics() -> Analytics {
        let users: Vec<UserSummary> = mock::users()
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                full_name: u.full_name,
                email: u.email,
                avatar_url: u.avatar_url,
                is_admin: u.is_admin,
                is_artist: u.is_artist,
                status: AccountStatus::Active,
            })
            .collect();

        Analytics {
            total_revenue: 15789.99,
            total_sales: 1234,
            total_artists: 89,
            total_users: 5678,
            total_songs: 3456,
            new_songs_24h: 45,
            total_plays: 98765,
            average_rating: 4.7,
            new_users_24h: 123,
            active_users: 2345,
            user_growth: 15.0,
            users,
        }
    }

    pub async fn fetch_system_health(&mut self) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        self.health = Some(SystemHealth {
            server_status: ServerStatus::Healthy,
            cpu_usage: 45.0,
            memory_usage: 62.0,
            storage_usage: 78.0,
            api_response_time_ms: 234,
            api_error_rate: 0.5,
        });
        Ok(())
    }

    /// Toggle a user between active and banned.
    pub async fn ban_user(&mut self, user_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        if let Some(analytics) = self.analytics.as_mut() {
            for user in &mut analytics.users {
                if user.id == user_id {
                    user.status = match user.status {
                        AccountStatus::Active => AccountStatus::Banned,
                        AccountStatus::Banned => AccountStatus::Active,
                    };
                    info!("User ban status updated: {} -> {:?}", user_id, user.status);
                }
            }
        }
        Ok(())
    }

    pub async fn generate_report(&mut self, kind: &str) -> Result<Report, StoreError> {
        tokio::time::sleep(self.latency).await;

        // Reports snapshot whatever the dashboard currently shows
        let analytics = match self.analytics.clone() {
            Some(analytics) => analytics,
            None => Self::snapshot_analytics(),
        };

        info!("Report generated: {}", kind);
        Ok(Report {
            kind: kind.to_string(),
            generated_at: Utc::now(),
            analytics,
        })
    }
}
