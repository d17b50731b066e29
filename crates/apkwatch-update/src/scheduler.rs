//! Startup run plus optional periodic re-checks
//!
//! The first cycle runs to completion before anything is scheduled. With
//! auto-check enabled, a cycle is started on every interval tick unless the
//! previous one is still running, in which case the tick is skipped. Cycle
//! failures are reported and never stop the schedule.

use apkwatch_core::AutoCheckConfig;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::updater::{ArtifactUpdater, UpdateResult};

/// A unit of scheduled work
#[async_trait]
pub trait UpdateCycle: Send + Sync + 'static {
    /// Run one complete cycle
    async fn run_cycle(&self) -> Result<UpdateResult>;
}

#[async_trait]
impl UpdateCycle for ArtifactUpdater {
    async fn run_cycle(&self) -> Result<UpdateResult> {
        ArtifactUpdater::run_cycle(self).await
    }
}

/// Receives the outcome of every cycle
pub trait CycleObserver: Send + Sync {
    /// Called when a cycle is about to start (1-indexed)
    fn on_cycle_start(&self, cycle: u64) {
        let _ = cycle;
    }

    /// Called when a cycle finished, successfully or not
    fn on_cycle_complete(&self, cycle: u64, result: &Result<UpdateResult>);

    /// Called when a tick is skipped because a cycle is still running
    fn on_tick_skipped(&self) {}
}

/// An observer that logs cycle outcomes using the `tracing` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCycleObserver;

impl CycleObserver for TracingCycleObserver {
    fn on_cycle_start(&self, cycle: u64) {
        debug!(cycle = cycle, "starting update check");
    }

    fn on_cycle_complete(&self, cycle: u64, result: &Result<UpdateResult>) {
        match result {
            Ok(outcome) => info!(
                cycle = cycle,
                version = %outcome.version(),
                "update check finished"
            ),
            Err(e) => error!(cycle = cycle, error = %e, "update check failed"),
        }
    }

    fn on_tick_skipped(&self) {
        warn!("Previous update check still running, skipping this tick");
    }
}

/// Counters describing a scheduler run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Cycles started, including the startup cycle
    pub cycles_started: u64,

    /// Ticks skipped because a cycle was in flight
    pub ticks_skipped: u64,
}

/// Drives an `UpdateCycle` at startup and on a fixed period
pub struct Scheduler<C: UpdateCycle> {
    cycle: Arc<C>,
    auto_check: AutoCheckConfig,
    observer: Arc<dyn CycleObserver>,
    in_flight: Arc<Mutex<()>>,
}

impl<C: UpdateCycle> Scheduler<C> {
    /// Create a scheduler
    pub fn new(cycle: Arc<C>, auto_check: AutoCheckConfig) -> Self {
        Self {
            cycle,
            auto_check,
            observer: Arc::new(TracingCycleObserver),
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    /// Use a custom observer
    pub fn with_observer(mut self, observer: Arc<dyn CycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the startup cycle, then re-check periodically until `shutdown`
    /// resolves
    ///
    /// Returns right after the startup cycle when auto-check is disabled.
    /// On shutdown an in-flight cycle is cancelled, including the startup
    /// cycle.
    pub async fn run_until<F>(&self, shutdown: F) -> SchedulerStats
    where
        F: Future<Output = ()>,
    {
        let mut stats = SchedulerStats::default();
        tokio::pin!(shutdown);

        stats.cycles_started += 1;
        {
            let _guard = self.in_flight.lock().await;
            self.observer.on_cycle_start(stats.cycles_started);
            tokio::select! {
                result = self.cycle.run_cycle() => {
                    self.observer.on_cycle_complete(stats.cycles_started, &result);
                }
                _ = &mut shutdown => {
                    info!("Shutdown requested, cancelling update check");
                    return stats;
                }
            }
        }

        if !self.auto_check.enabled {
            debug!("Auto-check disabled, not scheduling further checks");
            return stats;
        }

        let period = self.auto_check.period();
        if period.is_zero() {
            error!("Auto-check interval is zero, not scheduling further checks");
            return stats;
        }

        info!(
            "Auto-check enabled, checking for updates every {} seconds",
            period.as_secs_f64()
        );
        info!("Press Ctrl+C to exit");

        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("Shutdown requested");
                    break;
                }
                _ = interval.tick() => {
                    match self.in_flight.clone().try_lock_owned() {
                        Ok(guard) => {
                            stats.cycles_started += 1;
                            let number = stats.cycles_started;
                            let cycle = Arc::clone(&self.cycle);
                            let observer = Arc::clone(&self.observer);

                            tasks.spawn(async move {
                                observer.on_cycle_start(number);
                                let result = cycle.run_cycle().await;
                                observer.on_cycle_complete(number, &result);
                                drop(guard);
                            });
                        }
                        Err(_) => {
                            stats.ticks_skipped += 1;
                            self.observer.on_tick_skipped();
                        }
                    }
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            error!("Update check panicked: {}", e);
                        }
                    }
                }
            }
        }

        tasks.shutdown().await;
        stats
    }

    /// Run until Ctrl+C
    pub async fn run(&self) -> SchedulerStats {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}

/// Convenience constructor for the common case
pub fn scheduler_for(updater: ArtifactUpdater) -> Scheduler<ArtifactUpdater> {
    let auto_check = updater.config().auto_check.clone();
    Scheduler::new(Arc::new(updater), auto_check)
}

