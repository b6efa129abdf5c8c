// Community store - public chat room, private chats and the forum
// All of it is local state seeded from mock data; delivery is instant

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{mock, ForumComment, ForumPost, Message, User};
use crate::error::StoreError;

#[derive(Debug)]
pub struct CommunityStore {
    messages: Vec<Message>,
    private_chats: HashMap<String, Vec<Message>>,
    /// None means the public room is active.
    active_chat: Option<String>,
    posts: Vec<ForumPost>,
    comments: HashMap<String, Vec<ForumComment>>,
    is_loading: bool,
    latency: Duration,
}

impl CommunityStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            messages: Vec::new(),
            private_chats: HashMap::new(),
            active_chat: None,
            posts: Vec::new(),
            comments: HashMap::new(),
            is_loading: false,
            latency,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn private_chat(&self, user_id: &str) -> &[Message] {
        self.private_chats
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn active_chat(&self) -> Option<&str> {
        self.active_chat.as_deref()
    }

    pub fn set_active_chat(&mut self, user_id: Option<String>) {
        self.active_chat = user_id;
    }

    pub fn posts(&self) -> &[ForumPost] {
        &self.posts
    }

    pub fn comments(&self, post_id: &str) -> &[ForumComment] {
        self.comments
            .get(post_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn fetch_messages(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.messages = mock::messages();
        self.is_loading = false;
        Ok(())
    }

    pub async fn fetch_private_messages(&mut self, user_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;
        self.private_chats.entry(user_id.to_string()).or_default();
        Ok(())
    }

    /// Post into the public room, or a private chat when `receiver_id` is set.
    pub fn send_message(&mut self, sender: &User, content: &str, receiver_id: Option<&str>) {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender.id.clone(),
            receiver_id: receiver_id.map(str::to_string),
            sender_name: sender.full_name.clone(),
            content: content.to_string(),
            created_at: Utc::now(),
        };

        match receiver_id {
            Some(receiver) => {
                self.private_chats
                    .entry(receiver.to_string())
                    .or_default()
                    .push(message);
            }
            None => self.messages.push(message),
        }

        info!("Message sent by {}", sender.full_name);
    }

    pub async fn fetch_posts(&mut self) -> Result<(), StoreError> {
        self.is_loading = true;
        tokio::time::sleep(self.latency).await;

        self.posts = mock::forum_posts();
        self.is_loading = false;
        Ok(())
    }

    pub async fn fetch_comments(&mut self, post_id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.latency).await;

        let comments = mock::forum_comments()
            .into_iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        self.comments.insert(post_id.to_string(), comments);
        Ok(())
    }

    /// New posts go to the top of the feed.
    pub fn create_post(&mut self, author: &User, title: &str, content: &str) -> String {
        let post = ForumPost {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            user_id: author.id.clone(),
            author_name: author.full_name.clone(),
            likes: 0,
            created_at: Utc::now(),
        };
        let id = post.id.clone();
        self.posts.insert(0, post);

        info!("Post created: '{}'", title);
        id
    }

    pub fn create_comment(&mut self, author: &User, post_id: &str, content: &str) {
        let comment = ForumComment {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.to_string(),
            content: content.to_string(),
            user_id: author.id.clone(),
            author_name: author.full_name.clone(),
            created_at: Utc::now(),
        };
        self.comments
            .entry(post_id.to_string())
            .or_default()
            .push(comment);
    }

    pub fn like_post(&mut self, post_id: &str) {
        for post in &mut self.posts {
            if post.id == post_id {
                post.likes += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> User {
        mock::users().remove(1)
    }

    #[tokio::test]
    async fn test_public_and_private_messages_stay_apart() {
        let mut store = CommunityStore::new(Duration::ZERO);
        store.fetch_messages().await.unwrap();
        let public_before = store.messages().len();

        store.send_message(&author(), "hello room", None);
        store.send_message(&author(), "psst", Some("user-3"));

        assert_eq!(store.messages().len(), public_before + 1);
        assert_eq!(store.private_chat("user-3").len(), 1);
        assert_eq!(store.private_chat("user-3")[0].content, "psst");
    }

    #[tokio::test]
    async fn test_new_posts_lead_the_feed() {
        let mut store = CommunityStore::new(Duration::ZERO);
        store.fetch_posts().await.unwrap();

        let id = store.create_post(&author(), "Fresh", "new content");

        assert_eq!(store.posts()[0].id, id);
    }

    #[tokio::test]
    async fn test_comments_attach_to_their_post() {
        let mut store = CommunityStore::new(Duration::ZERO);
        store.fetch_posts().await.unwrap();
        store.fetch_comments("post-1").await.unwrap();
        let before = store.comments("post-1").len();

        store.create_comment(&author(), "post-1", "nice one");

        assert_eq!(store.comments("post-1").len(), before + 1);
        assert!(store.comments("post-2").is_empty());
    }

    #[tokio::test]
    async fn test_likes_accumulate() {
        let mut store = CommunityStore::new(Duration::ZERO);
        store.fetch_posts().await.unwrap();
        let id = store.posts()[0].id.clone();
        let before = store.posts()[0].likes;

        store.like_post(&id);
        store.like_post(&id);

        assert_eq!(store.posts()[0].likes, before + 2);
    }
}
