// Mock backend data - seed records standing in for the real database
// Every store clones what it needs from here at construction time

use chrono::{DateTime, TimeZone, Utc};

use super::{
    Artist, ForumComment, ForumPost, Message, Notification, NotificationKind, Purchase, Song,
    SongStatus, User,
};

pub const DEFAULT_PLAYLIST_COVER: &str = "https://source.unsplash.com/random/400x400?abstract";

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    // Seed dates are fixed literals, construction cannot fail
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn songs() -> Vec<Song> {
    vec![
        Song {
            id: "song-1".into(),
            title: "Summer Vibes".into(),
            artist_id: "artist-1".into(),
            artist_name: Some("DJ Awesome".into()),
            cover_url: "https://source.unsplash.com/random/400x400?summer+music".into(),
            song_url: "https://cdn.tunestall.example/songs/summer-vibes.mp3".into(),
            price: 0.99,
            genre: "pop".into(),
            duration: 180,
            plays: 1200,
            status: SongStatus::Approved,
            created_at: day(2024, 2, 1),
        },
        Song {
            id: "song-2".into(),
            title: "Night Drive".into(),
            artist_id: "artist-2".into(),
            artist_name: Some("Rock Star".into()),
            cover_url: "https://source.unsplash.com/random/400x400?night+music".into(),
            song_url: "https://cdn.tunestall.example/songs/night-drive.mp3".into(),
            price: 1.99,
            genre: "electronic".into(),
            duration: 240,
            plays: 800,
            status: SongStatus::Approved,
            created_at: day(2024, 2, 2),
        },
        Song {
            id: "song-3".into(),
            title: "Golden Hour".into(),
            artist_id: "artist-1".into(),
            artist_name: Some("DJ Awesome".into()),
            cover_url: "https://source.unsplash.com/random/400x400?sunset".into(),
            song_url: "https://cdn.tunestall.example/songs/golden-hour.mp3".into(),
            price: 4.50,
            genre: "electronic".into(),
            duration: 205,
            plays: 2100,
            status: SongStatus::Approved,
            created_at: day(2024, 1, 18),
        },
        Song {
            id: "song-4".into(),
            title: "Backroads".into(),
            artist_id: "artist-2".into(),
            artist_name: Some("Rock Star".into()),
            cover_url: "https://source.unsplash.com/random/400x400?guitar".into(),
            song_url: "https://cdn.tunestall.example/songs/backroads.mp3".into(),
            price: 7.00,
            genre: "rock".into(),
            duration: 312,
            plays: 430,
            status: SongStatus::Approved,
            created_at: day(2024, 2, 4),
        },
        Song {
            id: "song-5".into(),
            title: "Midnight Demo".into(),
            artist_id: "artist-2".into(),
            artist_name: Some("Rock Star".into()),
            cover_url: "https://source.unsplash.com/random/400x400?studio".into(),
            song_url: "https://cdn.tunestall.example/songs/midnight-demo.mp3".into(),
            price: 0.49,
            genre: "rock".into(),
            duration: 150,
            plays: 0,
            status: SongStatus::Pending,
            created_at: day(2024, 2, 5),
        },
        Song {
            id: "song-6".into(),
            title: "First Light".into(),
            artist_id: "artist-1".into(),
            artist_name: Some("DJ Awesome".into()),
            cover_url: "https://source.unsplash.com/random/400x400?dawn".into(),
            song_url: "https://cdn.tunestall.example/songs/first-light.mp3".into(),
            price: 2.49,
            genre: "ambient".into(),
            duration: 420,
            plays: 0,
            status: SongStatus::Pending,
            created_at: day(2024, 2, 6),
        },
    ]
}

pub fn artists() -> Vec<Artist> {
    vec![
        Artist {
            id: "artist-1".into(),
            user_id: "user-1".into(),
            artist_name: "DJ Awesome".into(),
            bio: "Electronic music producer".into(),
            verified: true,
            total_sales: 5000,
            created_at: day(2024, 1, 1),
        },
        Artist {
            id: "artist-2".into(),
            user_id: "user-2".into(),
            artist_name: "Rock Star".into(),
            bio: "Rock band from LA".into(),
            verified: false,
            total_sales: 3000,
            created_at: day(2024, 1, 2),
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "admin".into(),
            email: "admin@tunestall.example".into(),
            full_name: "Admin User".into(),
            avatar_url: Some("https://source.unsplash.com/random/100x100?face&sig=admin".into()),
            bio: None,
            is_artist: false,
            is_admin: true,
            created_at: day(2024, 1, 1),
        },
        User {
            id: "user-1".into(),
            email: "john@example.com".into(),
            full_name: "John Doe".into(),
            avatar_url: Some("https://source.unsplash.com/random/100x100?face&sig=1".into()),
            bio: None,
            is_artist: true,
            is_admin: false,
            created_at: day(2024, 1, 1),
        },
        User {
            id: "user-2".into(),
            email: "jane@example.com".into(),
            full_name: "Jane Smith".into(),
            avatar_url: Some("https://source.unsplash.com/random/100x100?face&sig=2".into()),
            bio: None,
            is_artist: true,
            is_admin: false,
            created_at: day(2024, 1, 2),
        },
        User {
            id: "user-3".into(),
            email: "mike@example.com".into(),
            full_name: "Mike Johnson".into(),
            avatar_url: Some("https://source.unsplash.com/random/100x100?face&sig=3".into()),
            bio: None,
            is_artist: false,
            is_admin: false,
            created_at: day(2024, 1, 3),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "notif-1".into(),
            user_id: "user-1".into(),
            title: "New Song Available".into(),
            message: "Check out the latest release from DJ Awesome".into(),
            kind: NotificationKind::Info,
            read: false,
            link: Some("/store".into()),
            created_at: day(2024, 2, 6),
        },
        Notification {
            id: "notif-2".into(),
            user_id: "user-1".into(),
            title: "Purchase Successful".into(),
            message: "You have successfully purchased \"Summer Vibes\"".into(),
            kind: NotificationKind::Success,
            read: true,
            link: Some("/library".into()),
            created_at: day(2024, 2, 5),
        },
    ]
}

pub fn purchases() -> Vec<Purchase> {
    vec![Purchase {
        id: "purchase-1".into(),
        user_id: "user-1".into(),
        song_id: "song-1".into(),
        amount: 0.99,
        platform_fee: 0.29,
        artist_revenue: 0.70,
        created_at: day(2024, 2, 5),
    }]
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: "msg-1".into(),
            sender_id: "user-1".into(),
            receiver_id: None,
            sender_name: "John Doe".into(),
            content: "Hey everyone! Check out my new track!".into(),
            created_at: day(2024, 2, 6),
        },
        Message {
            id: "msg-2".into(),
            sender_id: "user-2".into(),
            receiver_id: None,
            sender_name: "Jane Smith".into(),
            content: "Awesome track! Love the beats".into(),
            created_at: day(2024, 2, 6),
        },
        Message {
            id: "msg-3".into(),
            sender_id: "user-3".into(),
            receiver_id: None,
            sender_name: "Mike Johnson".into(),
            content: "Anyone up for a collab?".into(),
            created_at: day(2024, 2, 6),
        },
    ]
}

pub fn forum_posts() -> Vec<ForumPost> {
    vec![
        ForumPost {
            id: "post-1".into(),
            title: "Tips for Music Production".into(),
            content: "Here are some tips that helped me improve my music production...".into(),
            user_id: "user-1".into(),
            author_name: "John Doe".into(),
            likes: 15,
            created_at: day(2024, 2, 5),
        },
        ForumPost {
            id: "post-2".into(),
            title: "Best DAWs for Beginners".into(),
            content: "Looking for recommendations on the best DAWs for beginners...".into(),
            user_id: "user-2".into(),
            author_name: "Jane Smith".into(),
            likes: 8,
            created_at: day(2024, 2, 6),
        },
    ]
}

pub fn forum_comments() -> Vec<ForumComment> {
    vec![
        ForumComment {
            id: "comment-1".into(),
            post_id: "post-1".into(),
            content: "Great tips! Really helped me out.".into(),
            user_id: "user-2".into(),
            author_name: "Jane Smith".into(),
            created_at: day(2024, 2, 5),
        },
        ForumComment {
            id: "comment-2".into(),
            post_id: "post-2".into(),
            content: "I recommend FL Studio for beginners!".into(),
            user_id: "user-3".into(),
            author_name: "Mike Johnson".into(),
            created_at: day(2024, 2, 6),
        },
    ]
}
