// Purchase store - owns the purchased-song set and the checkout flow
// Payment settlement goes through the gateway; everything else is local state

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::{mock, Purchase, Song, User};
use crate::error::StoreError;
use crate::payments::{split_amount, ChargeRequest, MockGateway, PaymentGateway, PaymentStatus};

/// A purchase joined back to its catalog song, the shape the library page
/// renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: String,
    pub song_id: String,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_ref: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub song: Song,
}

#[derive(Debug)]
pub struct PurchaseStore<G: PaymentGateway = MockGateway> {
    catalog: Vec<Song>,
    purchased: HashSet<String>,
    history: Vec<Purchase>,
    references: Vec<(String, String)>, // (song_id, payment_ref)
    is_processing: bool,
    latency: Duration,
    download_latency: Duration,
    gateway: G,
}

impl PurchaseStore<MockGateway> {
    pub fn new(latency: Duration, download_latency: Duration) -> Self {
        Self::with_gateway(latency, download_latency, MockGateway::new(latency))
    }
}

impl<G: PaymentGateway> PurchaseStore<G> {
    pub fn with_gateway(latency: Duration, download_latency: Duration, gateway: G) -> Self {
        Self {
            catalog: mock::songs(),
            purchased: HashSet::new(),
            history: Vec::new(),
            references: Vec::new(),
            is_processing: false,
            latency,
            download_latency,
            gateway,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn has_purchased(&self, song_id: &str) -> bool {
        self.purchased.contains(song_id)
    }

    /// Run the checkout flow for a song. Requires a signed-in buyer; on a
    /// settled charge the song joins the purchased set and the sale is split
    /// between platform and artist.
    pub async fn purchase_song(
        &mut self,
        user: Option<&User>,
        song: &Song,
    ) -> Result<Purchase, StoreError> {
        let user = user.ok_or(StoreError::NotSignedIn)?;

        self.is_processing = true;
        let result = self.charge_and_record(user, song).await;
        self.is_processing = false;

        result
    }

    async fn charge_and_record(&mut self, user: &User, song: &Song) -> Result<Purchase, StoreError> {
        let charge = self
            .gateway
            .charge(ChargeRequest {
                email: user.email.clone(),
                amount: song.price,
                currency: "USD".to_string(),
            })
            .await?;

        let (platform_fee, artist_revenue) = split_amount(charge.amount);
        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            song_id: song.id.clone(),
            amount: charge.amount,
            platform_fee,
            artist_revenue,
            created_at: Utc::now(),
        };

        self.purchased.insert(song.id.clone());
        self.references.push((song.id.clone(), charge.reference));
        self.history.push(purchase.clone());

        info!("Purchase recorded: {} ({})", song.title, purchase.id);
        Ok(purchase)
    }

    /// Purchase history joined to catalog copies of the songs.
    pub async fn purchases(&self) -> Result<Vec<PurchaseRecord>, StoreError> {
        tokio::time::sleep(self.latency).await;

        let records = self
            .history
            .iter()
            .filter_map(|p| {
                let song = self.catalog.iter().find(|s| s.id == p.song_id)?.clone();
                let payment_ref = self
                    .references
                    .iter()
                    .find(|(id, _)| *id == p.song_id)
                    .map(|(_, r)| r.clone())
                    .unwrap_or_default();
                Some(PurchaseRecord {
                    id: p.id.clone(),
                    song_id: p.song_id.clone(),
                    amount: p.amount,
                    payment_status: PaymentStatus::Completed,
                    payment_ref,
                    created_at: p.created_at,
                    song,
                })
            })
            .collect();

        Ok(records)
    }

    /// Pull the audio file down. The transfer itself is out of scope, only
    /// the latency is simulated.
    pub async fn download_song(&self, song_url: &str, title: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.download_latency).await;
        info!("Song downloaded: {} ({})", title, song_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::MockGateway;

    fn buyer() -> User {
        mock::users().remove(1)
    }

    fn store() -> PurchaseStore {
        PurchaseStore::new(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_purchase_marks_song_owned() {
        let mut store = store();
        let song = mock::songs().remove(0);
        let user = buyer();

        assert!(!store.has_purchased(&song.id));
        let purchase = store.purchase_song(Some(&user), &song).await.unwrap();

        assert!(store.has_purchased(&song.id));
        assert_eq!(purchase.amount, song.price);
        assert!((purchase.platform_fee + purchase.artist_revenue - song.price).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_purchase_requires_sign_in() {
        let mut store = store();
        let song = mock::songs().remove(0);

        let result = store.purchase_song(None, &song).await;

        assert!(matches!(result, Err(StoreError::NotSignedIn)));
        assert!(!store.has_purchased(&song.id));
    }

    #[tokio::test]
    async fn test_declined_charge_leaves_no_trace() {
        let mut store = PurchaseStore::with_gateway(
            Duration::ZERO,
            Duration::ZERO,
            MockGateway::declining(Duration::ZERO),
        );
        let song = mock::songs().remove(0);
        let user = buyer();

        let result = store.purchase_song(Some(&user), &song).await;

        assert!(matches!(result, Err(StoreError::PaymentDeclined(_))));
        assert!(!store.has_purchased(&song.id));
        assert!(!store.is_processing());
        assert!(store.purchases().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_joins_catalog_songs() {
        let mut store = store();
        let songs = mock::songs();
        let user = buyer();

        store.purchase_song(Some(&user), &songs[0]).await.unwrap();
        store.purchase_song(Some(&user), &songs[1]).await.unwrap();

        let records = store.purchases().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].song.title, songs[0].title);
        assert!(records.iter().all(|r| r.payment_status == PaymentStatus::Completed));
        assert!(records.iter().all(|r| r.payment_ref.starts_with("mock_ref_")));
    }
}
