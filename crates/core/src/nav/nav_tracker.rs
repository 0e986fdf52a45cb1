//! NAV polling loop.
//!
//! Recomputes the NAV on a fixed interval and republishes the result over a
//! watch channel. A failed tick retains the last good snapshot, matching the
//! stale-read policy of the price cache.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::nav_model::NavSnapshot;
use super::nav_service::NavServiceTrait;
use crate::constants::NAV_POLL_INTERVAL_SECS;
use crate::events::{DomainEvent, DomainEventSink};

/// Handle to the background NAV poll task.
///
/// Dropping the handle leaves the task running; call `shutdown()` to stop it.
pub struct NavTracker {
    shutdown_tx: watch::Sender<bool>,
    snapshot_rx: watch::Receiver<Option<NavSnapshot>>,
    handle: JoinHandle<()>,
}

impl NavTracker {
    /// Default polling interval.
    pub fn default_interval() -> Duration {
        Duration::from_secs(NAV_POLL_INTERVAL_SECS)
    }

    /// Spawns the poll loop on the current tokio runtime.
    ///
    /// The first recomputation happens immediately; subsequent ones follow
    /// the interval.
    pub fn spawn(
        service: Arc<dyn NavServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        interval: Duration,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match service.current_nav().await {
                            Ok(snapshot) => {
                                debug!(
                                    "NAV poll: {} sats ({}%)",
                                    snapshot.total_value_sats, snapshot.change_percent
                                );
                                event_sink.emit(DomainEvent::nav_updated(
                                    snapshot.total_value_sats,
                                    snapshot.change_percent,
                                ));
                                let _ = snapshot_tx.send(Some(snapshot));
                            }
                            Err(err) => {
                                // Last good snapshot stays published.
                                warn!("NAV poll failed, retaining last snapshot: {}", err);
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("NAV tracker shutting down");
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            snapshot_rx,
            handle,
        }
    }

    /// Latest published snapshot, if any tick has succeeded yet.
    pub fn latest(&self) -> Option<NavSnapshot> {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<NavSnapshot>> {
        self.snapshot_rx.clone()
    }

    /// Stops the poll loop and waits for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}
