//! The break store: validation, transactional writes and revision history.
//!
//! Every mutating method follows the same shape:
//!
//! 1. Parse the requested times (pure, no lock held).
//! 2. Take the write lock, which also issues the `changed_at` stamp.
//! 3. Open an immediate transaction, re-read whatever the validation depends on, write
//!    the row change plus its revision, commit.
//!
//! Dropping the transaction on an early `?` rolls it back; dropping the
//! guard releases the lock. Reads go straight to the pool.

use std::path::Path;
use std::sync::Arc;

use breaktime_core::bootstrap::BootstrapFile;
use breaktime_core::error::CoreError;
use breaktime_core::schedule::{
    overlap_message, ChangeType, ACTOR_SEED, ENTITY_BREAK, ENTITY_REVISION,
};
use breaktime_core::time_of_day::{find_conflict, TimeRange};
use breaktime_core::types::{DbId, Timestamp};
use chrono::{SubsecRound, Utc};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::break_entry::BreakEntry;
use crate::models::break_revision::{BreakRevision, NewBreakRevision};
use crate::repositories::{BreakRepo, BreakRevisionRepo};
use crate::{run_migrations, DbPool};

/// Issues `changed_at` stamps that never go backwards, even if the wall
/// clock does.
#[derive(Debug, Default)]
struct WriteClock {
    last: Option<Timestamp>,
}

impl WriteClock {
    /// Stored precision is microseconds, so stamps are truncated to match.
    fn tick(&mut self) -> Timestamp {
        let now = Utc::now().trunc_subsecs(6);
        let stamp = match self.last {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }

    fn observe(&mut self, stamp: Option<Timestamp>) {
        if stamp > self.last {
            self.last = stamp;
        }
    }
}

/// Result of [`BreakStore::seed_from_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// No bootstrap file at the given path.
    SourceMissing,
    /// At least one active break already exists; nothing was imported.
    AlreadySeeded,
    Seeded(SeedReport),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Shared handle to the break schedule. Cheap to clone.
#[derive(Clone)]
pub struct BreakStore {
    pool: DbPool,
    clock: Arc<Mutex<WriteClock>>,
}

impl BreakStore {
    /// Wrap an existing pool. Call [`Self::initialize`] before first use.
    pub fn open(pool: DbPool) -> Self {
        Self {
            pool,
            clock: Arc::new(Mutex::new(WriteClock::default())),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Start a transaction that holds the database write lock from `BEGIN`.
    /// Other connections writing to the same file wait on the busy timeout
    /// instead of invalidating the validation read.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    /// Apply migrations and resume the revision clock from the last stored
    /// stamp. Safe to call on every startup.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        run_migrations(&self.pool).await?;
        let latest = BreakRevisionRepo::latest_changed_at(&self.pool).await?;
        self.clock.lock().await.observe(latest);
        Ok(())
    }

    /// Import the bootstrap file at `path` if, and only if, there are no
    /// active breaks.
    ///
    /// Entries that fail validation or overlap an entry imported earlier in
    /// the same file are skipped with a warning. The whole import is one
    /// transaction.
    pub async fn seed_from_source(&self, path: &Path) -> Result<SeedOutcome, StoreError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SeedOutcome::SourceMissing);
            }
            Err(e) => return Err(e.into()),
        };

        let mut clock = self.clock.lock().await;
        let mut tx = self.begin_write().await?;

        if BreakRepo::count_active(&mut *tx).await? > 0 {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let file = BootstrapFile::parse(&text)?;
        let now = clock.tick();
        let mut report = SeedReport::default();

        for (index, entry) in file.entries.iter().enumerate() {
            let candidate = match entry.validate() {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed bootstrap entry");
                    report.skipped += 1;
                    continue;
                }
            };

            if let Err(e) = ensure_no_overlap(&mut tx, &candidate.range, candidate.id).await {
                if !e.is_validation() {
                    return Err(e);
                }
                tracing::warn!(index, error = %e, "Skipping overlapping bootstrap entry");
                report.skipped += 1;
                continue;
            }

            let row = match candidate.id {
                Some(id) => {
                    BreakRepo::upsert_with_id(
                        &mut *tx,
                        id,
                        &candidate.range,
                        &candidate.description,
                        now,
                    )
                    .await?
                }
                None => {
                    BreakRepo::insert(&mut *tx, &candidate.range, &candidate.description, now)
                        .await?
                }
            };
            BreakRevisionRepo::insert(
                &mut *tx,
                &NewBreakRevision::snapshot(&row, ChangeType::Seed, ACTOR_SEED, now),
            )
            .await?;
            report.inserted += 1;
        }

        tx.commit().await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "Seeded breaks from bootstrap file",
        );
        Ok(SeedOutcome::Seeded(report))
    }

    /// List breaks ordered by start time, then id.
    pub async fn list_breaks(&self, include_deleted: bool) -> Result<Vec<BreakEntry>, StoreError> {
        Ok(BreakRepo::list(&self.pool, include_deleted).await?)
    }

    /// Fetch one break, active or deleted.
    pub async fn get_break(&self, id: DbId) -> Result<BreakEntry, StoreError> {
        BreakRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| break_not_found(id))
    }

    pub async fn create_break(
        &self,
        start: &str,
        end: &str,
        description: &str,
        changed_by: &str,
    ) -> Result<BreakEntry, StoreError> {
        let range = TimeRange::parse(start, end)?;

        let mut clock = self.clock.lock().await;
        let mut tx = self.begin_write().await?;

        ensure_no_overlap(&mut tx, &range, None).await?;

        let now = clock.tick();
        let entry = BreakRepo::insert(&mut *tx, &range, description, now).await?;
        BreakRevisionRepo::insert(
            &mut *tx,
            &NewBreakRevision::snapshot(&entry, ChangeType::Create, changed_by, now),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(break_id = entry.id, changed_by, "Break created");
        Ok(entry)
    }

    /// Replace the fields of an active break.
    pub async fn update_break(
        &self,
        id: DbId,
        start: &str,
        end: &str,
        description: &str,
        changed_by: &str,
    ) -> Result<BreakEntry, StoreError> {
        let range = TimeRange::parse(start, end)?;

        let mut clock = self.clock.lock().await;
        let mut tx = self.begin_write().await?;

        find_active(&mut tx, id).await?;
        ensure_no_overlap(&mut tx, &range, Some(id)).await?;

        let now = clock.tick();
        let entry = BreakRepo::update_fields(&mut *tx, id, &range, description, now)
            .await?
            .ok_or_else(|| break_not_found(id))?;
        BreakRevisionRepo::insert(
            &mut *tx,
            &NewBreakRevision::snapshot(&entry, ChangeType::Update, changed_by, now),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(break_id = id, changed_by, "Break updated");
        Ok(entry)
    }

    /// Soft-delete an active break. The row and its history are retained.
    pub async fn delete_break(&self, id: DbId, changed_by: &str) -> Result<(), StoreError> {
        let mut clock = self.clock.lock().await;
        let mut tx = self.begin_write().await?;

        let entry = find_active(&mut tx, id).await?;

        let now = clock.tick();
        if !BreakRepo::mark_deleted(&mut *tx, id, now).await? {
            return Err(break_not_found(id));
        }
        BreakRevisionRepo::insert(
            &mut *tx,
            &NewBreakRevision::snapshot(&entry, ChangeType::Delete, changed_by, now),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(break_id = id, changed_by, "Break deleted");
        Ok(())
    }

    /// Revisions newest first, optionally for a single break.
    pub async fn list_revisions(
        &self,
        break_id: Option<DbId>,
    ) -> Result<Vec<BreakRevision>, StoreError> {
        Ok(BreakRevisionRepo::list(&self.pool, break_id).await?)
    }

    /// Put a break back to the state captured by `revision_id`, reactivating
    /// it if it was deleted.
    pub async fn restore_revision(
        &self,
        revision_id: DbId,
        changed_by: &str,
    ) -> Result<BreakEntry, StoreError> {
        let mut clock = self.clock.lock().await;
        let mut tx = self.begin_write().await?;

        let revision = BreakRevisionRepo::find_by_id(&mut *tx, revision_id)
            .await?
            .ok_or_else(|| revision_not_found(revision_id))?;
        let break_id = revision
            .break_id
            .ok_or_else(|| revision_not_found(revision_id))?;
        BreakRepo::find_by_id(&mut *tx, break_id)
            .await?
            .ok_or_else(|| break_not_found(break_id))?;

        let range = revision.range().map_err(|e| {
            CoreError::Internal(format!("Revision {revision_id} holds an invalid range: {e}"))
        })?;
        ensure_no_overlap(&mut tx, &range, Some(break_id)).await?;

        let now = clock.tick();
        let entry = BreakRepo::restore_fields(&mut *tx, break_id, &range, &revision.description, now)
            .await?
            .ok_or_else(|| break_not_found(break_id))?;
        BreakRevisionRepo::insert(
            &mut *tx,
            &NewBreakRevision::snapshot(&entry, ChangeType::Restore, changed_by, now),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(break_id, revision_id, changed_by, "Break restored from revision");
        Ok(entry)
    }
}

fn break_not_found(id: DbId) -> StoreError {
    CoreError::NotFound {
        entity: ENTITY_BREAK,
        id,
    }
    .into()
}

fn revision_not_found(id: DbId) -> StoreError {
    CoreError::NotFound {
        entity: ENTITY_REVISION,
        id,
    }
    .into()
}

/// Fetch a break that must exist and not be soft-deleted.
async fn find_active(conn: &mut SqliteConnection, id: DbId) -> Result<BreakEntry, StoreError> {
    match BreakRepo::find_by_id(&mut *conn, id).await? {
        Some(entry) if entry.status().is_active() => Ok(entry),
        _ => Err(break_not_found(id)),
    }
}

/// Fail with a validation error naming the first active break (other than
/// `exclude_id`) that overlaps `range`.
async fn ensure_no_overlap(
    conn: &mut SqliteConnection,
    range: &TimeRange,
    exclude_id: Option<DbId>,
) -> Result<(), StoreError> {
    let existing = BreakRepo::list_active_except(&mut *conn, exclude_id).await?;

    let mut ranges = Vec::with_capacity(existing.len());
    for entry in &existing {
        let stored = entry.range().map_err(|e| {
            CoreError::Internal(format!("Stored break {} holds an invalid range: {e}", entry.id))
        })?;
        ranges.push((entry.id, stored));
    }

    match find_conflict(range, ranges) {
        Some((conflict_id, conflict)) => {
            Err(CoreError::Validation(overlap_message(conflict_id, &conflict)).into())
        }
        None => Ok(()),
    }
}
