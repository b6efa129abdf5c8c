// Notification store - fetches the user's feed and tracks unread state
// Real-time delivery would come over a socket; here it's a placeholder

use std::time::Duration;

use tracing::info;

use crate::catalog::{mock, Notification};
use crate::error::StoreError;

#[derive(Debug)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
    unread_count: usize,
    is_loading: bool,
    subscribed: bool,
    latency: Duration,
}

impl NotificationStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            notifications: Vec::new(),
            unread_count: 0,
            is_loading: false,
            subscribed: false,
            latency,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn fetch_notifications(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        let notifications = mock::notifications();
        self.unread_count = notifications.iter().filter(|n| !n.read).count();
        self.notifications = notifications;
        self.is_loading = false;

        info!("Notifications fetched: {} unread", self.unread_count);
        Ok(())
    }

    pub fn mark_as_read(&mut self, notification_id: &str) {
        for n in &mut self.notifications {
            if n.id == notification_id && !n.read {
                n.read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
                info!("Notification marked as read: {}", notification_id);
            }
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
        self.unread_count = 0;
        info!("All notifications marked as read");
    }

    /// Placeholder for the realtime channel a real backend would push over.
    pub fn subscribe(&mut self) {
        self.subscribed = true;
        info!("Subscribed to notifications");
    }

    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        info!("Unsubscribed from notifications");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_counts_unread() {
        let mut store = NotificationStore::new(Duration::ZERO);
        store.fetch_notifications().await.unwrap();

        let expected = store.notifications().iter().filter(|n| !n.read).count();
        assert_eq!(store.unread_count(), expected);
        assert!(store.unread_count() > 0);
    }

    #[tokio::test]
    async fn test_mark_as_read_is_idempotent() {
        let mut store = NotificationStore::new(Duration::ZERO);
        store.fetch_notifications().await.unwrap();

        let id = store
            .notifications()
            .iter()
            .find(|n| !n.read)
            .map(|n| n.id.clone())
            .unwrap();
        let before = store.unread_count();

        store.mark_as_read(&id);
        assert_eq!(store.unread_count(), before - 1);

        // Marking again must not underflow the counter
        store.mark_as_read(&id);
        assert_eq!(store.unread_count(), before - 1);
    }

    #[tokio::test]
    async fn test_mark_all_as_read() {
        let mut store = NotificationStore::new(Duration::ZERO);
        store.fetch_notifications().await.unwrap();

        store.mark_all_as_read();

        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.read));
    }
}
