// tunestall library - state layer for the music marketplace client
// Every store is plain owned state; the mock backend lives behind timers

pub mod activity;      // in-memory activity log shown in the UI
pub mod admin;         // moderation queue and platform analytics
pub mod artist;        // artist dashboard: stats, releases, royalties
pub mod auth;          // mock sign-in/sign-up with persisted sessions
pub mod catalog;       // record types and mock seed data
pub mod community;     // chat and forum
pub mod config;        // settings and preferences
pub mod currency;      // locale-aware price formatting
pub mod error;         // store error type
pub mod notifications; // notification feed and unread tracking
pub mod payments;      // payment gateway seam + mock gateway
pub mod player;        // playback queue, likes, persisted player state
pub mod playlists;     // user playlists persisted to disk
pub mod purchases;     // checkout flow and purchase history
pub mod recommend;     // recommendation and trending feeds
pub mod search;        // fuzzy storefront search with filters
pub mod ui;            // terminal interface
pub mod upload;        // song submission into the moderation queue

// Export the stuff other modules actually use
pub use catalog::{Artist, Notification, Playlist, Purchase, Song, SongStatus, User};
pub use config::Config;
pub use error::StoreError;
pub use player::PlayerStore;
