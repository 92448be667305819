//! Record persistence seam.
//!
//! The calculation core never talks to storage directly. Hosts plug their backend
//! (an HTTP client, a database) in behind [`RecordStore`]; [`InMemoryRecordStore`]
//! mirrors the backend's save semantics for tests and offline use.
//!
//! # Example
//!
//! ```ignore
//! use mizan::history::store::{InMemoryRecordStore, RecordStore};
//!
//! let store = InMemoryRecordStore::new();
//! let saved = store.save_record(record).await?;
//! let history = store.fetch_history("user@example.com").await?;
//! ```

use chrono::Local;
use tokio::sync::RwLock;

use crate::history::record::MonthlyRecord;
use crate::types::MizanError;

/// Source of a user's saved months.
///
/// Errors are the implementor's own and are handed back to callers untouched.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    type Error: Send;

    /// Every record of the user, oldest month first.
    async fn fetch_history(&self, user_email: &str) -> Result<Vec<MonthlyRecord>, Self::Error>;

    /// Inserts or replaces the user's record for the record's month. Returns the
    /// stored form (with its id).
    async fn save_record(&self, record: MonthlyRecord) -> Result<MonthlyRecord, Self::Error>;

    async fn delete_record(&self, id: i64) -> Result<(), Self::Error>;
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<MonthlyRecord>,
    last_id: i64,
}

/// A process-local store keyed by (user, year, month).
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    table: RwLock<Table>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    type Error = MizanError;

    async fn fetch_history(&self, user_email: &str) -> Result<Vec<MonthlyRecord>, MizanError> {
        let table = self.table.read().await;
        let mut history: Vec<MonthlyRecord> = table
            .rows
            .iter()
            .filter(|r| r.user_email == user_email)
            .cloned()
            .collect();
        history.sort_by_key(MonthlyRecord::period);
        Ok(history)
    }

    async fn save_record(&self, mut record: MonthlyRecord) -> Result<MonthlyRecord, MizanError> {
        let mut table = self.table.write().await;

        let existing = table.rows.iter().position(|r| {
            r.user_email == record.user_email && r.year == record.year && r.month == record.month
        });

        match existing {
            Some(idx) => {
                record.id = table.rows[idx].id;
                record.created_at = table.rows[idx].created_at;
            }
            None => {
                table.last_id += 1;
                record.id = Some(table.last_id);
            }
        }
        if record.created_at.is_none() {
            record.created_at = Some(Local::now().naive_local());
        }

        tracing::debug!(
            id = ?record.id,
            user = %record.user_email,
            period = %record.period(),
            replaced = existing.is_some(),
            "saved monthly record"
        );

        match existing {
            Some(idx) => table.rows[idx] = record.clone(),
            None => table.rows.push(record.clone()),
        }
        Ok(record)
    }

    async fn delete_record(&self, id: i64) -> Result<(), MizanError> {
        let mut table = self.table.write().await;
        let idx = table
            .rows
            .iter()
            .position(|r| r.id == Some(id))
            .ok_or(MizanError::RecordNotFound(id))?;
        table.rows.remove(idx);
        tracing::debug!(id, "deleted monthly record");
        Ok(())
    }
}
