// Auth store - mock sign-in against the seeded user table
// Any password works; the session (just the user id) is kept on disk so a
// restart lands you back in your account

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::{mock, User};
use crate::error::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct Session {
    user_id: String,
}

#[derive(Debug)]
pub struct AuthStore {
    users: Vec<User>,
    current: Option<User>,
    is_loading: bool,
    latency: Duration,
    session_path: Option<PathBuf>,
}

impl AuthStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            users: mock::users(),
            current: None,
            is_loading: false,
            latency,
            session_path: None,
        }
    }

    /// Disk-backed sessions: restores the signed-in user if a session file
    /// from a previous run points at a known account.
    pub fn with_session_file(latency: Duration, path: PathBuf) -> Self {
        let mut store = Self::new(latency);

        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(session) = serde_json::from_str::<Session>(&content) {
                    store.current = store.users.iter().find(|u| u.id == session.user_id).cloned();
                    if let Some(user) = &store.current {
                        info!("Session restored for {}", user.email);
                    }
                }
            }
        }

        store.session_path = Some(path);
        store
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn sign_in(&mut self, email: &str, _password: &str) -> Result<User, StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        // Demo backend: matching email is enough, any password passes
        let user = self
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::InvalidCredentials);

        self.is_loading = false;
        let user = user?;

        self.current = Some(user.clone());
        self.save_session()?;
        info!("Signed in: {}", user.email);
        Ok(user)
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        _password: &str,
        full_name: &str,
    ) -> Result<User, StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        if self.users.iter().any(|u| u.email == email) {
            self.is_loading = false;
            return Err(StoreError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            avatar_url: Some(format!(
                "https://source.unsplash.com/random/100x100?face&sig={}",
                Uuid::new_v4().simple()
            )),
            bio: None,
            is_artist: false,
            is_admin: false,
            created_at: Utc::now(),
        };

        self.users.push(user.clone());
        self.current = Some(user.clone());
        self.is_loading = false;
        self.save_session()?;

        info!("Account created: {}", user.email);
        Ok(user)
    }

    pub async fn sign_out(&mut self) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        if let Some(path) = self.session_path.as_ref() {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }

        if let Some(user) = self.current.take() {
            info!("Signed out: {}", user.email);
        }
        Ok(())
    }

    pub async fn update_user(&mut self, user: User) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        self.current = Some(user);
        self.is_loading = false;
        Ok(())
    }

    fn save_session(&self) -> Result<(), StoreError> {
        let (Some(path), Some(user)) = (self.session_path.as_ref(), self.current.as_ref()) else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&Session {
            user_id: user.id.clone(),
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}
