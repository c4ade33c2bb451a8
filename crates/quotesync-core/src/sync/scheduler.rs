//! Sync pass orchestration and the periodic auto-sync loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{carry_forward, merge, ConflictSet, RemoteSource};
use crate::db::{
    Database, QuoteRepository, SettingsRepository, SqliteQuoteRepository,
    SqliteSettingsRepository,
};
use crate::error::Result;
use crate::state::{SyncReport, SyncState};
use crate::util::unix_millis_now;

/// Runs fetch + merge + persist passes, never more than one at a time.
#[derive(Clone)]
pub struct SyncRunner {
    db: Arc<Mutex<Database>>,
    remote: Arc<dyn RemoteSource>,
    conflicts: Arc<Mutex<ConflictSet>>,
    state: Arc<Mutex<SyncState>>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when a pass ends, including when its task is aborted.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SyncRunner {
    pub fn new(
        db: Arc<Mutex<Database>>,
        remote: Arc<dyn RemoteSource>,
        conflicts: Arc<Mutex<ConflictSet>>,
    ) -> Self {
        Self {
            db,
            remote,
            conflicts,
            state: Arc::new(Mutex::new(SyncState::default())),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn state(&self) -> SyncState {
        *self.state.lock().await
    }

    /// Execute one pass.
    ///
    /// A trigger that arrives while another pass is outstanding returns
    /// [`SyncReport::Skipped`]. Fetch failures come back as
    /// [`SyncReport::Failed`] with the store untouched; only store errors are
    /// returned as `Err`.
    pub async fn run_pass(&self) -> Result<SyncReport> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Sync pass already in flight; dropping trigger");
            return Ok(SyncReport::Skipped);
        };

        self.set_state(SyncState::Syncing).await;
        let result = self.run_pass_inner().await;

        let state = match &result {
            Ok(SyncReport::Completed { .. }) => SyncState::Synced,
            Ok(_) | Err(_) => SyncState::Error,
        };
        self.set_state(state).await;
        result
    }

    async fn run_pass_inner(&self) -> Result<SyncReport> {
        let snapshot = {
            let db = self.db.lock().await;
            SqliteQuoteRepository::new(db.connection()).load()?
        };

        let remote = match self.remote.fetch_remote_quotes().await {
            Ok(remote) => remote,
            Err(error) => {
                tracing::warn!("Sync pass aborted: {error}");
                return Ok(SyncReport::Failed {
                    reason: error.to_string(),
                });
            }
        };

        // Same lock order as conflict resolution: conflicts, then store
        let mut conflicts = self.conflicts.lock().await;
        let db = self.db.lock().await;
        let repo = SqliteQuoteRepository::new(db.connection());

        let current = repo.load()?;
        let outcome = carry_forward(merge(&snapshot, &remote), &snapshot, &current);
        let synced_at = unix_millis_now();
        repo.save(&outcome.quotes)?;

        let settings_repo = SqliteSettingsRepository::new(db.connection());
        let mut settings = settings_repo.load()?;
        settings.last_sync_at = Some(synced_at);
        settings_repo.save(&settings)?;

        conflicts.replace(outcome.conflicts.clone());
        drop(db);
        drop(conflicts);

        tracing::info!(
            quotes = outcome.quotes.len(),
            conflicts = outcome.conflicts.len(),
            "Sync pass completed"
        );

        Ok(SyncReport::Completed {
            quotes: outcome.quotes,
            conflicts: outcome.conflicts,
            synced_at,
        })
    }

    async fn set_state(&self, state: SyncState) {
        *self.state.lock().await = state;
    }
}

/// Periodic trigger for [`SyncRunner::run_pass`].
#[derive(Default)]
pub struct AutoSync {
    handle: Option<JoinHandle<()>>,
}

impl AutoSync {
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start ticking every `period`; the first pass runs one period from now.
    ///
    /// Returns `false` if the loop was already running.
    pub fn start<F>(&mut self, runner: SyncRunner, period: Duration, on_report: F) -> bool
    where
        F: Fn(&Result<SyncReport>) + Send + Sync + 'static,
    {
        if self.is_running() {
            return false;
        }

        tracing::info!("Auto sync started (every {}s)", period.as_secs());
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let report = runner.run_pass().await;
                on_report(&report);
            }
        }));
        true
    }

    /// Stop the loop. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        handle.abort();
        tracing::info!("Auto sync stopped");
        true
    }
}

impl Drop for AutoSync {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
