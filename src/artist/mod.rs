// Artist dashboard store - sales stats, scheduled releases, royalty reports
// Numbers are derived from the seeded purchases so the dashboard is stable

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{mock, Purchase, Song};
use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistStats {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub total_plays: u64,
    pub followers: u64,
    pub revenue_growth: f64,
    pub plays_growth: f64,
    pub sales_growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledRelease {
    pub song_id: String,
    pub release_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoyaltyReport {
    pub time_range: String,
    pub generated_at: DateTime<Utc>,
    pub gross_revenue: f64,
    pub platform_fees: f64,
    pub net_payout: f64,
    pub sales: u64,
}

#[derive(Debug)]
pub struct ArtistStore {
    artist_id: String,
    songs: Vec<Song>,
    purchases: Vec<Purchase>,
    stats: Option<ArtistStats>,
    scheduled: Vec<ScheduledRelease>,
    is_loading: bool,
    latency: Duration,
}

impl ArtistStore {
    pub fn new(artist_id: &str, latency: Duration) -> Self {
        Self {
            artist_id: artist_id.to_string(),
            songs: mock::songs(),
            purchases: mock::purchases(),
            stats: None,
            scheduled: Vec::new(),
            is_loading: false,
            latency,
        }
    }

    pub fn stats(&self) -> Option<&ArtistStats> {
        self.stats.as_ref()
    }

    pub fn scheduled_releases(&self) -> &[ScheduledRelease] {
        &self.scheduled
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn own_song_ids(&self) -> Vec<&str> {
        self.songs
            .iter()
            .filter(|s| s.artist_id == self.artist_id)
            .map(|s| s.id.as_str())
            .collect()
    }

    pub async fn fetch_stats(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        let own = self.own_song_ids();
        let sales: Vec<&Purchase> = self
            .purchases
            .iter()
            .filter(|p| own.contains(&p.song_id.as_str()))
            .collect();

        let total_plays = self
            .songs
            .iter()
            .filter(|s| s.artist_id == self.artist_id)
            .map(|s| s.plays)
            .sum();

        self.stats = Some(ArtistStats {
            total_revenue: sales.iter().map(|p| p.artist_revenue).sum(),
            total_sales: sales.len() as u64,
            total_plays,
            // The backend would compute these from engagement tables
            followers: 128,
            revenue_growth: 12.5,
            plays_growth: 8.0,
            sales_growth: 5.5,
        });
        self.is_loading = false;

        info!("Artist stats fetched for {}", self.artist_id);
        Ok(())
    }

    pub async fn schedule_release(
        &mut self,
        song_id: &str,
        release_date: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        if !self.songs.iter().any(|s| s.id == song_id) {
            return Err(StoreError::SongNotFound(song_id.to_string()));
        }

        self.scheduled.push(ScheduledRelease {
            song_id: song_id.to_string(),
            release_date,
        });

        info!("Release scheduled: {} on {}", song_id, release_date);
        Ok(())
    }

    pub async fn royalty_report(&self, time_range: &str) -> Result<RoyaltyReport, StoreError> {
        tokio::time::sleep(self.latency).await;

        let own = self.own_song_ids();
        let sales: Vec<&Purchase> = self
            .purchases
            .iter()
            .filter(|p| own.contains(&p.song_id.as_str()))
            .collect();

        Ok(RoyaltyReport {
            time_range: time_range.to_string(),
            generated_at: Utc::now(),
            gross_revenue: sales.iter().map(|p| p.amount).sum(),
            platform_fees: sales.iter().map(|p| p.platform_fee).sum(),
            net_payout: sales.iter().map(|p| p.artist_revenue).sum(),
            sales: sales.len() as u64,
        })
    }
}
