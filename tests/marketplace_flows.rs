// Cross-store flows exercised end to end against the mock backend.
// Latency is zeroed so the suite stays fast.

use std::fs;
use std::io::Write;
use std::time::Duration;

use tunestall::admin::AdminStore;
use tunestall::auth::AuthStore;
use tunestall::catalog::{mock, SongStatus};
use tunestall::player::PlayerStore;
use tunestall::purchases::PurchaseStore;
use tunestall::upload::{SongSubmission, UploadStore};

#[tokio::test]
async fn buyer_journey_from_sign_in_to_library() {
    let mut auth = AuthStore::new(Duration::ZERO);
    let mut purchases = PurchaseStore::new(Duration::ZERO, Duration::ZERO);
    let song = mock::songs().remove(0);

    // Checkout is refused while signed out
    let denied = purchases.purchase_song(auth.user(), &song).await;
    assert!(denied.is_err());

    let user = auth.sign_in("john@example.com", "any-password").await.unwrap();
    purchases.purchase_song(Some(&user), &song).await.unwrap();

    assert!(purchases.has_purchased(&song.id));

    let history = purchases.purchases().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].song.id, song.id);
    assert_eq!(history[0].amount, song.price);

    // Owned songs can be downloaded
    purchases
        .download_song(&song.song_url, &song.title)
        .await
        .unwrap();
}

#[tokio::test]
async fn uploaded_song_flows_through_moderation() {
    let dir = tempfile::tempdir().unwrap();
    let mut upload = UploadStore::new(dir.path().join("storage"), Duration::ZERO);
    let mut admin = AdminStore::new(Duration::ZERO);
    let artist = mock::artists().remove(0);

    let song_path = dir.path().join("demo.mp3");
    let cover_path = dir.path().join("cover.png");
    fs::File::create(&song_path).unwrap().write_all(b"audio").unwrap();
    fs::File::create(&cover_path).unwrap().write_all(b"image").unwrap();

    let song = upload
        .upload_song(
            &artist,
            SongSubmission {
                title: "Fresh Cut".into(),
                genre: "electronic".into(),
                price: 2.99,
                song_path,
                cover_path,
            },
        )
        .await
        .unwrap();
    assert_eq!(song.status, SongStatus::Pending);

    // The new song lands in the moderation queue alongside the seeded ones
    admin.fetch_pending_songs().await.unwrap();
    let seeded_pending = admin.pending_songs().len();
    admin.enqueue_song(song.clone());
    assert_eq!(admin.pending_songs().len(), seeded_pending + 1);

    admin.approve_song(&song.id).await.unwrap();
    assert!(admin.pending_songs().iter().all(|s| s.id != song.id));
}

#[tokio::test]
async fn player_state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("player.json");
    let songs = mock::songs();

    {
        let mut player = PlayerStore::with_snapshot(1.0, snapshot.clone()).unwrap();
        player.set_queue(songs.clone());
        player.set_current_song(Some(songs[0].clone()));
        player.set_volume(0.4);
        player.toggle_like(&songs[1].id);
    }

    let player = PlayerStore::with_snapshot(1.0, snapshot).unwrap();
    assert_eq!(player.volume(), 0.4);
    assert!(player.is_liked(&songs[1].id));
    assert_eq!(player.recently_played().first().map(|s| s.id.clone()),
        Some(songs[0].id.clone()));
    // The queue is session state and starts empty
    assert!(player.queue().is_empty());
}

#[tokio::test]
async fn storefront_hides_unmoderated_songs() {
    use tunestall::search::{filter_songs, SearchFilters};

    let catalog = mock::songs();
    let visible = filter_songs(&catalog, "", &SearchFilters::default());

    assert!(visible.len() < catalog.len());
    assert!(visible.iter().all(|s| s.status == SongStatus::Approved));
}
