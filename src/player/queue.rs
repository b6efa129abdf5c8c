// Queue navigation - pure functions over the song queue
// Next/previous wrap at both ends; shuffle pins the current song first

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Song;

/// Index of the song to play after `current_id`. Wraps to the front at the
/// end of the queue. A current song that is no longer in the queue restarts
/// from the front.
pub fn next_index(queue: &[Song], current_id: &str) -> Option<usize> {
    if queue.is_empty() {
        return None;
    }

    match queue.iter().position(|s| s.id == current_id) {
        Some(i) if i + 1 < queue.len() => Some(i + 1),
        _ => Some(0),
    }
}

/// Index of the song to play before `current_id`. Wraps to the back at the
/// front of the queue.
pub fn previous_index(queue: &[Song], current_id: &str) -> Option<usize> {
    if queue.is_empty() {
        return None;
    }

    match queue.iter().position(|s| s.id == current_id) {
        Some(i) if i > 0 => Some(i - 1),
        _ => Some(queue.len() - 1),
    }
}

/// Fisher-Yates shuffle of everything except the current song, which stays
/// at the head of the queue so playback position is preserved.
pub fn shuffle_keeping_current<R: Rng>(queue: &mut Vec<Song>, current_id: &str, rng: &mut R) {
    if queue.len() <= 1 {
        return;
    }

    let Some(current_pos) = queue.iter().position(|s| s.id == current_id) else {
        return;
    };

    let current = queue.remove(current_pos);
    queue.shuffle(rng);
    queue.insert(0, current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn queue() -> Vec<Song> {
        mock::songs()
            .into_iter()
            .filter(|s| s.status == crate::catalog::SongStatus::Approved)
            .collect()
    }

    #[test]
    fn test_next_advances_then_wraps() {
        let q = queue();
        assert_eq!(next_index(&q, &q[0].id), Some(1));
        assert_eq!(next_index(&q, &q[q.len() - 1].id), Some(0));
    }

    #[test]
    fn test_previous_retreats_then_wraps() {
        let q = queue();
        assert_eq!(previous_index(&q, &q[1].id), Some(0));
        assert_eq!(previous_index(&q, &q[0].id), Some(q.len() - 1));
    }

    #[test]
    fn test_unknown_current_restarts_queue() {
        let q = queue();
        assert_eq!(next_index(&q, "not-in-queue"), Some(0));
        assert_eq!(previous_index(&q, "not-in-queue"), Some(q.len() - 1));
    }

    #[test]
    fn test_empty_queue_navigates_nowhere() {
        assert_eq!(next_index(&[], "song-1"), None);
        assert_eq!(previous_index(&[], "song-1"), None);
    }

    #[test]
    fn test_shuffle_keeps_current_first() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut q = queue();
            let current = q[2].id.clone();
            shuffle_keeping_current(&mut q, &current, &mut rng);
            assert_eq!(q[0].id, current);
        }
    }

    #[test]
    fn test_shuffle_preserves_membership() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut q = queue();
        let mut before: Vec<String> = q.iter().map(|s| s.id.clone()).collect();
        let current = q[0].id.clone();

        shuffle_keeping_current(&mut q, &current, &mut rng);

        let mut after: Vec<String> = q.iter().map(|s| s.id.clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_without_current_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut q = queue();
        let before: Vec<String> = q.iter().map(|s| s.id.clone()).collect();

        shuffle_keeping_current(&mut q, "not-in-queue", &mut rng);

        let after: Vec<String> = q.iter().map(|s| s.id.clone()).collect();
        assert_eq!(before, after);
    }
}
