// Playback position monitoring
// The platform player is polled from an owned tokio task instead of
// the player pushing periodic callbacks; dropping the subscription
// tears the task down, so monitoring cannot outlive its screen.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Anything that can report a playback position. Implemented by the
/// platform player binding; tests use a fake.
pub trait PositionSource: Send + Sync + 'static {
    fn position_ms(&self) -> u64;
    fn is_playing(&self) -> bool;
}

/// Snapshot of the player state at one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPosition {
    pub position_ms: u64,
    pub playing: bool,
}

/// Handle to an active position poll. Dropping it aborts the polling
/// task.
pub struct PositionSubscription {
    rx: watch::Receiver<PlaybackPosition>,
    task: JoinHandle<()>,
}

impl PositionSubscription {
    /// Most recently observed position
    pub fn latest(&self) -> PlaybackPosition {
        *self.rx.borrow()
    }

    /// Wait for the next position update. Returns `None` once the
    /// polling task has stopped.
    pub async fn changed(&mut self) -> Option<PlaybackPosition> {
        match self.rx.changed().await {
            Ok(()) => Some(*self.rx.borrow()),
            Err(_) => None,
        }
    }
}

impl Drop for PositionSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `source` every `interval`, publishing through a watch
/// channel
pub fn subscribe(source: Arc<dyn PositionSource>, interval: Duration) -> PositionSubscription {
    let initial = snapshot(source.as_ref());
    let (tx, rx) = watch::channel(initial);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(snapshot(source.as_ref())).is_err() {
                break;
            }
        }
    });

    PositionSubscription { rx, task }
}

fn snapshot(source: &dyn PositionSource) -> PlaybackPosition {
    PlaybackPosition {
        position_ms: source.position_ms(),
        playing: source.is_playing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FakePlayer {
        position: AtomicU64,
        polls: AtomicU64,
    }

    impl FakePlayer {
        fn new() -> Self {
            Self {
                position: AtomicU64::new(0),
                polls: AtomicU64::new(0),
            }
        }
    }

    impl PositionSource for FakePlayer {
        fn position_ms(&self) -> u64 {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.position.fetch_add(100, Ordering::SeqCst)
        }

        fn is_playing(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_subscription_reports_positions() {
        let player = Arc::new(FakePlayer::new());
        let mut sub = subscribe(player.clone(), Duration::from_millis(5));

        let first = sub.changed().await.unwrap();
        let second = sub.changed().await.unwrap();

        assert!(second.position_ms > first.position_ms);
        assert!(second.playing);
    }

    #[tokio::test]
    async fn test_drop_stops_polling() {
        let player = Arc::new(FakePlayer::new());
        let mut sub = subscribe(player.clone(), Duration::from_millis(5));
        sub.changed().await.unwrap();
        drop(sub);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let polls_after_drop = player.polls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(player.polls.load(Ordering::SeqCst), polls_after_drop);
    }
}
