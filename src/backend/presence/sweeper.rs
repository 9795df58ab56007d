/**
 * Eviction Sweeper
 *
 * Periodic background task that evicts participants who stopped signalling
 * liveness.
 *
 * # Timing
 *
 * The sweep runs every `interval` and evicts participants silent for more
 * than `stale_after`. With the defaults (15 s / 10 s) a participant can stay
 * listed for up to 25 s after its last refresh.
 *
 * # Races
 *
 * Each run works on a point-in-time snapshot of the participant store. A
 * participant refreshed after the snapshot but before its removal is still
 * evicted. Request traffic is never blocked to prevent this.
 *
 * # Failure Isolation
 *
 * An error while evicting one participant is logged and counted; the
 * remaining participants of the snapshot are still processed. A participant
 * that was removed but whose "left" notice could not be written is counted
 * apart from one that could not be removed at all.
 */

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::lifecycle::{is_stale, Eviction, PresenceManager};
use crate::backend::error::BackendError;
use crate::shared::config::{AppConfig, DEFAULT_STALE_AFTER, DEFAULT_SWEEP_INTERVAL};

/// Timing parameters of the sweeper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSettings {
    /// Time between two runs
    pub interval: Duration,
    /// Silence after which a participant is evicted
    pub stale_after: Duration,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SWEEP_INTERVAL,
            stale_after: DEFAULT_STALE_AFTER,
        }
    }
}

impl From<&AppConfig> for SweepSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            interval: config.sweep_interval,
            stale_after: config.stale_after,
        }
    }
}

/// Outcome of a single sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Participants in the snapshot
    pub scanned: usize,
    /// Names removed and announced by this run
    pub evicted: Vec<String>,
    /// Names removed by this run without a "left" notice
    pub unannounced: Vec<String>,
    /// Names that could not be removed and are still present
    pub failed: Vec<String>,
}

#[derive(Clone)]
pub struct EvictionSweeper {
    presence: PresenceManager,
    settings: SweepSettings,
}

impl EvictionSweeper {
    pub fn new(presence: PresenceManager, settings: SweepSettings) -> Self {
        Self { presence, settings }
    }

    pub fn settings(&self) -> SweepSettings {
        self.settings
    }

    /// Run one sweep over a snapshot of the participant store
    ///
    /// Fails only when the snapshot itself cannot be read.
    pub async fn run_once(&self) -> Result<SweepReport, BackendError> {
        let snapshot = self.presence.stores().list_participants().await?;
        let now = self.presence.clock().now();

        let mut report = SweepReport {
            scanned: snapshot.len(),
            ..SweepReport::default()
        };

        for participant in snapshot
            .iter()
            .filter(|p| is_stale(p, now, self.settings.stale_after))
        {
            match self.presence.evict_outcome(&participant.name).await {
                Ok(Eviction::Announced) => report.evicted.push(participant.name.clone()),
                // Already removed by a concurrent sweep
                Ok(Eviction::Absent) => {}
                Ok(Eviction::Unannounced(e)) => {
                    tracing::warn!("Evicted '{}' without a notice: {}", participant.name, e);
                    report.unannounced.push(participant.name.clone());
                }
                Err(e) => {
                    tracing::warn!("Failed to evict '{}': {}", participant.name, e);
                    report.failed.push(participant.name.clone());
                }
            }
        }

        if !report.evicted.is_empty() || !report.unannounced.is_empty() || !report.failed.is_empty() {
            tracing::info!(
                "Sweep scanned {} participants, evicted {}, unannounced {}, failed {}",
                report.scanned,
                report.evicted.len(),
                report.unannounced.len(),
                report.failed.len()
            );
        }

        Ok(report)
    }

    /// Start the periodic sweep on the current Tokio runtime
    ///
    /// The first run happens one full interval after this call.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = self.settings.interval;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                "Eviction sweeper started (interval {:?}, stale after {:?})",
                period,
                self.settings.stale_after
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_once().await {
                            tracing::error!("Sweep failed to read participants: {}", e);
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Eviction sweeper stopped");
        });

        SweeperHandle { shutdown_tx, task }
    }
}

/// Handle to a running sweeper task
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for the task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::error!("Eviction sweeper task failed: {}", e);
        }
    }
}
