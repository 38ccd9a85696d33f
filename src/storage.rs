use crate::models::{Action, Counter, GlobalHistoryEntry, HistoryEntry};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

pub const COUNTER_HISTORY_LIMIT: i64 = 50;
pub const GLOBAL_HISTORY_LIMIT: i64 = 100;
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("counter {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    InvalidName(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Counters and their change history, backed by a SQLite pool.
///
/// The pool holds a single connection, so every transaction below runs
/// serialized against the database.
#[derive(Clone)]
pub struct CounterStore {
    pool: SqlitePool,
}

impl CounterStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        ensure_parent_dir(options.get_filename()).await?;
        Self::open(options).await
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(true);
        Self::open(options).await
    }

    async fn open(options: SqliteConnectOptions) -> Result<Self, StoreError> {
        // An idle in-memory connection must never be recycled or the data goes with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn list_counters(&self) -> Result<Vec<Counter>, StoreError> {
        let counters = sqlx::query_as::<_, Counter>(
            "SELECT id, name, count, created_at FROM counters ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counters)
    }

    pub async fn create_counter(&self, name: &str) -> Result<Counter, StoreError> {
        let name = validate_name(name)?;

        let counter = sqlx::query_as::<_, Counter>(
            r#"
INSERT INTO counters (name, count, created_at)
VALUES (?1, 0, ?2)
RETURNING id, name, count, created_at
"#,
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(counter_id = counter.id, name = %counter.name, "counter created");
        Ok(counter)
    }

    /// Overwrites the count and appends the matching history row in one
    /// transaction. Nothing is written when the counter does not exist.
    pub async fn update_counter(&self, id: i64, count: i64) -> Result<Counter, StoreError> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<i64> = sqlx::query_scalar("SELECT count FROM counters WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(previous) = previous else {
            return Err(StoreError::NotFound(id));
        };

        let counter = sqlx::query_as::<_, Counter>(
            "UPDATE counters SET count = ?1 WHERE id = ?2 RETURNING id, name, count, created_at",
        )
        .bind(count)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let action = Action::derive(previous, count);
        sqlx::query(
            r#"
INSERT INTO counter_history (counter_id, count, action, created_at)
VALUES (?1, ?2, ?3, ?4)
"#,
        )
        .bind(id)
        .bind(count)
        .bind(action)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(counter_id = id, previous, count, ?action, "counter updated");
        Ok(counter)
    }

    pub async fn delete_counter(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM counter_history WHERE counter_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM counters WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(StoreError::NotFound(id));
        }

        tx.commit().await?;

        info!(counter_id = id, "counter deleted");
        Ok(())
    }

    /// Unknown ids yield an empty list rather than an error.
    pub async fn history_for_counter(&self, id: i64) -> Result<Vec<HistoryEntry>, StoreError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            r#"
SELECT id, counter_id, count, action, created_at
FROM counter_history
WHERE counter_id = ?1
ORDER BY created_at DESC, id DESC
LIMIT ?2
"#,
        )
        .bind(id)
        .bind(COUNTER_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn global_history(&self) -> Result<Vec<GlobalHistoryEntry>, StoreError> {
        let entries = sqlx::query_as::<_, GlobalHistoryEntry>(
            r#"
SELECT ch.id, ch.counter_id, ch.count, ch.action, ch.created_at, c.name AS counter_name
FROM counter_history ch
JOIN counters c ON ch.counter_id = c.id
ORDER BY ch.created_at DESC, ch.id DESC
LIMIT ?1
"#,
        )
        .bind(GLOBAL_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

/// Trims the name and checks it is non-empty and at most
/// [`MAX_NAME_CHARS`] characters long.
pub fn validate_name(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidName("counter name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(StoreError::InvalidName(
            "counter name must be at most 100 characters",
        ));
    }
    Ok(name)
}

async fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    if path.as_os_str() == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> CounterStore {
        CounterStore::in_memory().await.expect("in-memory store")
    }

    #[tokio::test]
    async fn created_counter_starts_at_zero_with_trimmed_name() {
        let store = store().await;
        let counter = store.create_counter("  Tasks  ").await.unwrap();

        assert_eq!(counter.count, 0);
        assert_eq!(counter.name, "Tasks");

        let listed = store.list_counters().await.unwrap();
        assert_eq!(listed, vec![counter]);
    }

    #[tokio::test]
    async fn create_rejects_blank_and_overlong_names() {
        let store = store().await;

        assert!(matches!(
            store.create_counter("   ").await,
            Err(StoreError::InvalidName(_))
        ));
        assert!(matches!(
            store.create_counter(&"x".repeat(MAX_NAME_CHARS + 1)).await,
            Err(StoreError::InvalidName(_))
        ));
        assert!(store.create_counter(&"x".repeat(MAX_NAME_CHARS)).await.is_ok());
        assert_eq!(store.list_counters().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_counters_is_newest_first() {
        let store = store().await;
        let first = store.create_counter("first").await.unwrap();
        let second = store.create_counter("second").await.unwrap();

        let ids: Vec<i64> = store
            .list_counters()
            .await
            .unwrap()
            .into_iter()
            .map(|counter| counter.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn update_records_derived_actions_newest_first() {
        let store = store().await;
        let counter = store.create_counter("Tasks").await.unwrap();

        let updated = store.update_counter(counter.id, 5).await.unwrap();
        assert_eq!(updated.count, 5);
        store.update_counter(counter.id, 5).await.unwrap();
        let updated = store.update_counter(counter.id, 3).await.unwrap();
        assert_eq!(updated.count, 3);

        let history: Vec<(i64, Action)> = store
            .history_for_counter(counter.id)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| (entry.count, entry.action))
            .collect();
        assert_eq!(
            history,
            vec![
                (3, Action::Decrement),
                (5, Action::Decrement),
                (5, Action::Increment),
            ]
        );
    }

    #[tokio::test]
    async fn update_missing_counter_writes_no_history() {
        let store = store().await;

        let err = store.update_counter(42, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
        assert!(store.history_for_counter(42).await.unwrap().is_empty());
        assert!(store.global_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_counter_and_its_history() {
        let store = store().await;
        let doomed = store.create_counter("doomed").await.unwrap();
        let kept = store.create_counter("kept").await.unwrap();
        for count in [1, 2, 3] {
            store.update_counter(doomed.id, count).await.unwrap();
        }
        store.update_counter(kept.id, -1).await.unwrap();

        store.delete_counter(doomed.id).await.unwrap();

        assert!(store.history_for_counter(doomed.id).await.unwrap().is_empty());
        let global = store.global_history().await.unwrap();
        assert_eq!(global.len(), 1);
        assert_eq!(global[0].entry.counter_id, kept.id);
        assert_eq!(global[0].counter_name, "kept");
        let remaining: Vec<i64> = store
            .list_counters()
            .await
            .unwrap()
            .into_iter()
            .map(|counter| counter.id)
            .collect();
        assert_eq!(remaining, vec![kept.id]);
    }

    #[tokio::test]
    async fn delete_missing_counter_is_not_found() {
        let store = store().await;
        let counter = store.create_counter("once").await.unwrap();
        store.delete_counter(counter.id).await.unwrap();

        assert!(matches!(
            store.delete_counter(counter.id).await,
            Err(StoreError::NotFound(id)) if id == counter.id
        ));
    }

    #[tokio::test]
    async fn history_queries_are_capped() {
        let store = store().await;
        let a = store.create_counter("a").await.unwrap();
        let b = store.create_counter("b").await.unwrap();
        for count in 1..=60 {
            store.update_counter(a.id, count).await.unwrap();
            store.update_counter(b.id, -count).await.unwrap();
        }

        let per_counter = store.history_for_counter(a.id).await.unwrap();
        assert_eq!(per_counter.len(), COUNTER_HISTORY_LIMIT as usize);
        assert_eq!(per_counter[0].count, 60);
        assert!(per_counter.windows(2).all(|pair| pair[0].id > pair[1].id));

        let global = store.global_history().await.unwrap();
        assert_eq!(global.len(), GLOBAL_HISTORY_LIMIT as usize);
        assert_eq!(global[0].entry.counter_id, b.id);
        assert_eq!(global[0].entry.count, -60);
        assert!(global
            .windows(2)
            .all(|pair| pair[0].entry.created_at >= pair[1].entry.created_at));
    }

    #[tokio::test]
    async fn history_for_unknown_counter_is_empty() {
        let store = store().await;
        assert!(store.history_for_counter(999).await.unwrap().is_empty());
    }
}
