// Search store - fuzzy matching plus genre/price/sort filters
// The filter pipeline is pure so results are reproducible for a given query

use std::time::Duration;

use fuzzy_matcher::clangd::ClangdMatcher;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{mock, Artist, Song, SongStatus};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    All,
    Under1,
    Under5,
    Over5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Newest,
    Popular,
    Price,
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub genre: Option<String>,
    pub price_range: Option<PriceRange>,
    pub sort_by: Option<SortKey>,
}

#[derive(Debug)]
pub struct SearchStore {
    catalog: Vec<Song>,
    artists: Vec<Artist>,
    results: Vec<Song>,
    is_loading: bool,
    latency: Duration,
}

impl SearchStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            catalog: mock::songs(),
            artists: mock::artists(),
            results: Vec::new(),
            is_loading: false,
            latency,
        }
    }

    pub fn results(&self) -> &[Song] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Run a storefront search and cache the results on the store.
    pub async fn search(&mut self, query: &str, filters: &SearchFilters) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.results = filter_songs(&self.catalog, query, filters);
        self.is_loading = false;

        info!("Search completed: {} result(s) for '{}'", self.results.len(), query);
        Ok(())
    }

    /// Fuzzy match artists by name, capped at 10 results.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, StoreError> {
        tokio::time::sleep(self.latency).await;

        let matcher = ClangdMatcher::default();
        let mut scored: Vec<(i64, &Artist)> = self
            .artists
            .iter()
            .filter_map(|a| matcher.fuzzy_match(&a.artist_name, query).map(|s| (s, a)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored.into_iter().take(10).map(|(_, a)| a.clone()).collect())
    }

    /// Most-played approved songs in a genre, capped at 10.
    pub async fn trending_in_genre(&self, genre: &str) -> Result<Vec<Song>, StoreError> {
        tokio::time::sleep(self.latency).await;

        let mut songs: Vec<Song> = self
            .catalog
            .iter()
            .filter(|s| s.status == SongStatus::Approved && s.genre == genre)
            .cloned()
            .collect();
        songs.sort_by(|a, b| b.plays.cmp(&a.plays));
        songs.truncate(10);

        Ok(songs)
    }
}

/// The pure core of the storefront search. Only approved songs are
/// considered; an empty query matches everything. Sorting is stable so
/// equal keys keep their catalog order.
pub fn filter_songs(catalog: &[Song], query: &str, filters: &SearchFilters) -> Vec<Song> {
    let matcher = ClangdMatcher::default();
    let query = query.trim();

    let mut songs: Vec<Song> = catalog
        .iter()
        .filter(|s| s.status == SongStatus::Approved)
        .filter(|s| {
            query.is_empty()
                || matcher.fuzzy_match(&s.title, query).is_some()
                || matcher.fuzzy_match(s.display_artist(), query).is_some()
        })
        .filter(|s| match &filters.genre {
            Some(genre) => s.genre == *genre,
            None => true,
        })
        .filter(|s| match filters.price_range.unwrap_or(PriceRange::All) {
            PriceRange::All => true,
            PriceRange::Under1 => s.price < 1.0,
            PriceRange::Under5 => s.price < 5.0,
            PriceRange::Over5 => s.price >= 5.0,
        })
        .cloned()
        .collect();

    match filters.sort_by {
        Some(SortKey::Newest) => songs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortKey::Popular) => songs.sort_by(|a, b| b.plays.cmp(&a.plays)),
        Some(SortKey::Price) => songs.sort_by(|a, b| a.price.total_cmp(&b.price)),
        None => {}
    }

    songs
}
