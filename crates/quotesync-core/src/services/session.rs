//! Application context shared by every front end.
//!
//! `QuoteSession` owns the store, the pending conflicts, the sync runner and
//! the auto-sync loop. Front ends talk to it through [`Intent`]s and render the
//! returned [`SessionView`].

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::SyncConfig;
use crate::db::{
    validate_collection, Database, QuoteRepository, SettingsRepository, SqliteQuoteRepository,
    SqliteSettingsRepository,
};
use crate::error::{Error, Result};
use crate::models::{Choice, Conflict, Origin, Quote, QuoteId, SyncSettings};
use crate::notify::{Notice, Notifier};
use crate::state::{SyncReport, SyncState};
use crate::sync::{AutoSync, ConflictSet, RemoteSource, SyncRunner};
use crate::util::unix_millis_now;

/// User intents accepted from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddQuote {
        text: String,
        author: Option<String>,
    },
    EditQuote {
        id: QuoteId,
        text: String,
        author: Option<String>,
    },
    DeleteQuote {
        id: QuoteId,
    },
    TriggerSync,
    SetAutoSync {
        enabled: bool,
    },
    ResolveConflict {
        id: QuoteId,
        choice: Choice,
    },
}

/// Everything a front end needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub quotes: Vec<Quote>,
    pub conflicts: Vec<Conflict>,
    pub settings: SyncSettings,
    pub state: SyncState,
}

/// Result of dispatching one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentOutcome {
    pub view: SessionView,
    /// Present for [`Intent::TriggerSync`]
    pub report: Option<SyncReport>,
}

pub struct QuoteSession {
    db: Arc<Mutex<Database>>,
    conflicts: Arc<Mutex<ConflictSet>>,
    runner: SyncRunner,
    auto_sync: Mutex<AutoSync>,
    notifier: Arc<dyn Notifier>,
    config: SyncConfig,
}

impl QuoteSession {
    pub fn new(
        db: Database,
        remote: Arc<dyn RemoteSource>,
        config: SyncConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let db = Arc::new(Mutex::new(db));
        let conflicts = Arc::new(Mutex::new(ConflictSet::new()));
        let runner = SyncRunner::new(Arc::clone(&db), remote, Arc::clone(&conflicts));
        Self {
            db,
            conflicts,
            runner,
            auto_sync: Mutex::new(AutoSync::new()),
            notifier,
            config,
        }
    }

    /// Restore the persisted auto-sync preference and return the first view.
    ///
    /// Must run inside a tokio runtime.
    pub async fn init(&self) -> Result<SessionView> {
        let settings = self.settings().await?;
        if settings.auto_sync_enabled {
            self.start_auto_sync().await;
        }
        self.view().await
    }

    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub async fn dispatch(&self, intent: Intent) -> Result<IntentOutcome> {
        let mut report = None;
        match intent {
            Intent::AddQuote { text, author } => {
                self.add_quote(&text, author.as_deref()).await?;
            }
            Intent::EditQuote { id, text, author } => {
                self.edit_quote(&id, &text, author.as_deref()).await?;
            }
            Intent::DeleteQuote { id } => {
                self.delete_quote(&id).await?;
            }
            Intent::TriggerSync => report = Some(self.sync_now().await?),
            Intent::SetAutoSync { enabled } => self.set_auto_sync(enabled).await?,
            Intent::ResolveConflict { id, choice } => {
                self.resolve_conflict(&id, choice).await?;
            }
        }

        Ok(IntentOutcome {
            view: self.view().await?,
            report,
        })
    }

    pub async fn view(&self) -> Result<SessionView> {
        Ok(SessionView {
            quotes: self.quotes().await?,
            conflicts: self.pending_conflicts().await,
            settings: self.settings().await?,
            state: self.runner.state().await,
        })
    }

    pub async fn quotes(&self) -> Result<Vec<Quote>> {
        let db = self.db.lock().await;
        SqliteQuoteRepository::new(db.connection()).load()
    }

    pub async fn pending_conflicts(&self) -> Vec<Conflict> {
        self.conflicts.lock().await.pending().to_vec()
    }

    pub async fn settings(&self) -> Result<SyncSettings> {
        let db = self.db.lock().await;
        SqliteSettingsRepository::new(db.connection()).load()
    }

    pub async fn add_quote(&self, text: &str, author: Option<&str>) -> Result<Quote> {
        let text = require_text(text)?;
        let quote = Quote::new_local(text, author, unix_millis_now());

        let db = self.db.lock().await;
        let repo = SqliteQuoteRepository::new(db.connection());
        let mut quotes = repo.load()?;
        quotes.insert(0, quote.clone());
        repo.save(&quotes)?;
        drop(db);

        tracing::debug!("Added quote {}", quote.id);
        self.notifier.notify(Notice::ok("Quote added."));
        Ok(quote)
    }

    /// Replace text (and author when given); the record becomes a local edit.
    pub async fn edit_quote(&self, id: &QuoteId, text: &str, author: Option<&str>) -> Result<Quote> {
        let text = require_text(text)?;

        let db = self.db.lock().await;
        let repo = SqliteQuoteRepository::new(db.connection());
        let mut quotes = repo.load()?;
        let slot = quotes
            .iter_mut()
            .find(|quote| &quote.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        *slot = slot.edited(text, author, unix_millis_now());
        let updated = slot.clone();
        repo.save(&quotes)?;
        drop(db);

        self.notifier.notify(Notice::ok("Quote updated."));
        Ok(updated)
    }

    pub async fn delete_quote(&self, id: &QuoteId) -> Result<Quote> {
        let db = self.db.lock().await;
        let repo = SqliteQuoteRepository::new(db.connection());
        let mut quotes = repo.load()?;
        let index = quotes
            .iter()
            .position(|quote| &quote.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let removed = quotes.remove(index);
        repo.save(&quotes)?;
        drop(db);

        self.notifier.notify(Notice::ok("Quote deleted."));
        Ok(removed)
    }

    pub async fn random_quote(&self) -> Result<Option<Quote>> {
        let quotes = self.quotes().await?;
        Ok(pick_random(&quotes, &mut rand::thread_rng()).cloned())
    }

    /// Run one sync pass now.
    pub async fn sync_now(&self) -> Result<SyncReport> {
        let report = self.runner.run_pass().await;
        notify_report(self.notifier.as_ref(), &report);
        report
    }

    /// Persist the preference and start or stop the periodic loop.
    pub async fn set_auto_sync(&self, enabled: bool) -> Result<()> {
        {
            let db = self.db.lock().await;
            let repo = SqliteSettingsRepository::new(db.connection());
            let mut settings = repo.load()?;
            settings.auto_sync_enabled = enabled;
            repo.save(&settings)?;
        }

        if enabled {
            self.start_auto_sync().await;
            self.notifier.notify(Notice::info("Auto sync enabled."));
        } else {
            self.auto_sync.lock().await.stop();
            self.notifier.notify(Notice::info("Auto sync disabled."));
        }
        Ok(())
    }

    pub async fn is_auto_sync_running(&self) -> bool {
        self.auto_sync.lock().await.is_running()
    }

    /// Apply a decision for a pending conflict.
    ///
    /// Returns `Ok(None)` without touching anything when `id` is not pending.
    pub async fn resolve_conflict(&self, id: &QuoteId, choice: Choice) -> Result<Option<Vec<Quote>>> {
        let mut conflicts = self.conflicts.lock().await;
        if !conflicts.contains(id) {
            tracing::debug!("Ignoring resolution for {id}: no pending conflict");
            return Ok(None);
        }

        let db = self.db.lock().await;
        let repo = SqliteQuoteRepository::new(db.connection());
        let mut next = conflicts.clone();
        let Some(resolved) = next.resolve(id, choice, repo.load()?, unix_millis_now()) else {
            return Ok(None);
        };
        repo.save(&resolved)?;
        *conflicts = next;
        drop(db);
        drop(conflicts);

        self.notifier
            .notify(Notice::ok(format!("Conflict resolved: kept {choice}.")));
        Ok(Some(resolved))
    }

    /// Import quotes as local edits.
    ///
    /// Existing ids are replaced, new ids are prepended. The batch is rejected
    /// as a whole if it repeats an id or contains empty text.
    pub async fn import_quotes(&self, imported: Vec<Quote>) -> Result<usize> {
        validate_collection(&imported)?;
        let now = unix_millis_now();
        let count = imported.len();

        let db = self.db.lock().await;
        let repo = SqliteQuoteRepository::new(db.connection());
        let mut quotes = repo.load()?;
        for quote in imported {
            let quote = Quote {
                text: quote.text.trim().to_string(),
                author: quote.author.trim().to_string(),
                updated_at: now,
                origin: Origin::Local,
                ..quote
            };
            if let Some(slot) = quotes.iter_mut().find(|existing| existing.id == quote.id) {
                *slot = quote;
            } else {
                quotes.insert(0, quote);
            }
        }
        repo.save(&quotes)?;
        drop(db);

        self.notifier
            .notify(Notice::ok(format!("Imported {count} quotes.")));
        Ok(count)
    }

    async fn start_auto_sync(&self) {
        let notifier = Arc::clone(&self.notifier);
        self.auto_sync.lock().await.start(
            self.runner.clone(),
            self.config.sync_interval(),
            move |report| notify_report(notifier.as_ref(), report),
        );
    }
}

/// Pick a uniformly random quote.
pub fn pick_random<'a, R: Rng + ?Sized>(quotes: &'a [Quote], rng: &mut R) -> Option<&'a Quote> {
    quotes.choose(rng)
}

fn require_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(Error::InvalidInput("quote text cannot be empty".to_string()))
    } else {
        Ok(trimmed)
    }
}

fn notify_report(notifier: &dyn Notifier, report: &Result<SyncReport>) {
    match report {
        Ok(SyncReport::Completed { conflicts, .. }) => {
            notifier.notify(Notice::ok("Quotes synced with server."));
            if !conflicts.is_empty() {
                notifier.notify(Notice::warn(format!(
                    "{} conflict(s) need review; server version kept for now.",
                    conflicts.len()
                )));
            }
        }
        Ok(SyncReport::Failed { .. }) => {
            notifier.notify(Notice::warn("Sync failed (check internet)."));
        }
        Ok(SyncReport::Skipped) => {}
        Err(error) => notifier.notify(Notice::warn(format!("Sync failed: {error}"))),
    }
}
