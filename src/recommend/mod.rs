// Recommendations - the backend would rank these; the mock picks at random
// Trending is just play count, same as the storefront's popular sort

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::catalog::{mock, Song, SongStatus};
use crate::error::StoreError;

const FEED_SIZE: usize = 6;

#[derive(Debug)]
pub struct RecommendationStore {
    catalog: Vec<Song>,
    recommended: Vec<Song>,
    trending: Vec<Song>,
    is_loading: bool,
    latency: Duration,
}

impl RecommendationStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            catalog: mock::songs(),
            recommended: Vec::new(),
            trending: Vec::new(),
            is_loading: false,
            latency,
        }
    }

    pub fn recommended(&self) -> &[Song] {
        &self.recommended
    }

    pub fn trending(&self) -> &[Song] {
        &self.trending
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Random sample of the approved catalog, standing in for a
    /// personalized feed.
    pub async fn fetch_recommendations(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        let mut approved: Vec<Song> = self
            .catalog
            .iter()
            .filter(|s| s.status == SongStatus::Approved)
            .cloned()
            .collect();
        approved.shuffle(&mut thread_rng());
        approved.truncate(FEED_SIZE);

        self.recommended = approved;
        self.is_loading = false;
        Ok(())
    }

    /// Top approved songs by play count.
    pub async fn fetch_trending(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        let mut approved: Vec<Song> = self
            .catalog
            .iter()
            .filter(|s| s.status == SongStatus::Approved)
            .cloned()
            .collect();
        approved.sort_by(|a, b| b.plays.cmp(&a.plays));
        approved.truncate(FEED_SIZE);

        self.trending = approved;
        self.is_loading = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recommendations_come_from_approved_catalog() {
        let mut store = RecommendationStore::new(Duration::ZERO);
        store.fetch_recommendations().await.unwrap();

        assert!(!store.recommended().is_empty());
        assert!(store.recommended().len() <= FEED_SIZE);
        assert!(store
            .recommended()
            .iter()
            .all(|s| s.status == SongStatus::Approved));
    }

    #[tokio::test]
    async fn test_trending_is_sorted_by_plays() {
        let mut store = RecommendationStore::new(Duration::ZERO);
        store.fetch_trending().await.unwrap();

        let trending = store.trending();
        assert!(!trending.is_empty());
        assert!(trending.windows(2).all(|w| w[0].plays >= w[1].plays));
    }
}
