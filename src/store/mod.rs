pub mod dto;
pub mod sqlite;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::models::{AttendanceRecord, AttendanceStatus, ClassSession};

pub use sqlite::SqliteRecordStore;
pub use supabase::{SupabaseConfig, SupabaseRecordStore};

/// Remote table of attendance statuses keyed by `(user, date, subject, session type)`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(&self, user_id: &str) -> Result<Vec<AttendanceRecord>, AppError>;
    /// Insert or overwrite the status for the session's key. Last write wins.
    async fn upsert_record(
        &self,
        user_id: &str,
        session: &ClassSession,
        status: AttendanceStatus,
    ) -> Result<(), AppError>;
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct NoopRecordStore;

#[async_trait]
impl RecordStore for NoopRecordStore {
    async fn fetch_records(&self, _user_id: &str) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(Vec::new())
    }

    async fn upsert_record(
        &self,
        _user_id: &str,
        _session: &ClassSession,
        _status: AttendanceStatus,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Builds the record store selected by `RECORD_STORE`.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn RecordStore>, AppError> {
    let store: Arc<dyn RecordStore> = match config {
        StoreConfig::Sqlite { database_url } => {
            info!("Using sqlite record store at {}", database_url);
            Arc::new(SqliteRecordStore::connect(database_url).await?)
        }
        StoreConfig::Supabase(supabase) => {
            info!("Using PostgREST record store at {}", supabase.url);
            Arc::new(SupabaseRecordStore::new(supabase.clone())?)
        }
        StoreConfig::Noop => {
            info!("Using no-op record store; statuses will not persist");
            Arc::new(NoopRecordStore)
        }
    };
    Ok(store)
}
