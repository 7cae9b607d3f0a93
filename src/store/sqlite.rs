use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use super::RecordStore;
use crate::error::AppError;
use crate::models::{AttendanceRecord, AttendanceStatus, ClassSession};

/// Local stand-in for the remote table, with the same natural-key upsert.
#[derive(Clone)]
pub struct SqliteRecordStore {
    db: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Opens the database at `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let mut options = SqlitePoolOptions::new().max_connections(5);
        // Each connection to an in-memory database sees its own empty schema.
        if database_url.contains(":memory:") {
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let db = options.connect(database_url).await?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(|e| AppError::Database(e.into()))?;

        Ok(Self::new(db))
    }
}

pub async fn fetch_records(db: &SqlitePool, user_id: &str) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT date, subject_id, session_type, status
        FROM attendance_records
        WHERE user_id = ?1
        ORDER BY date, subject_id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn upsert_record(
    db: &SqlitePool,
    user_id: &str,
    session: &ClassSession,
    status: AttendanceStatus,
) -> Result<(), sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO attendance_records
            (id, user_id, session_id, date, subject_id, session_type, status, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT (user_id, date, subject_id, session_type) DO UPDATE
        SET status = excluded.status,
            session_id = excluded.session_id,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&session.id)
    .bind(session.date_key())
    .bind(&session.subject_id)
    .bind(session.session_type)
    .bind(status)
    .bind(now)
    .execute(db)
    .await?;

    Ok(())
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn fetch_records(&self, user_id: &str) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(fetch_records(&self.db, user_id).await?)
    }

    async fn upsert_record(
        &self,
        user_id: &str,
        session: &ClassSession,
        status: AttendanceStatus,
    ) -> Result<(), AppError> {
        Ok(upsert_record(&self.db, user_id, session, status).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::SessionType;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn os_lecture() -> ClassSession {
        ClassSession {
            id: "2026-01-05-OS-3".to_string(),
            subject_id: "OS".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            start_time: "13:30".to_string(),
            end_time: "14:25".to_string(),
            session_type: SessionType::Lecture,
            status: AttendanceStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_fetch_record() {
        let pool = setup_test_db().await;

        upsert_record(&pool, "user-1", &os_lecture(), AttendanceStatus::Present)
            .await
            .expect("Failed to upsert record");

        let records = fetch_records(&pool, "user-1").await.expect("Failed to fetch records");
        assert_eq!(
            records,
            vec![AttendanceRecord::new(
                "2026-01-05",
                "OS",
                SessionType::Lecture,
                AttendanceStatus::Present
            )]
        );
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_key() {
        let pool = setup_test_db().await;
        let session = os_lecture();

        upsert_record(&pool, "user-1", &session, AttendanceStatus::Present)
            .await
            .expect("first write");
        upsert_record(&pool, "user-1", &session, AttendanceStatus::Absent)
            .await
            .expect("second write");

        let records = fetch_records(&pool, "user-1").await.expect("Failed to fetch records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn test_records_are_scoped_per_user() {
        let pool = setup_test_db().await;
        let session = os_lecture();

        upsert_record(&pool, "user-1", &session, AttendanceStatus::Present)
            .await
            .expect("user-1 write");
        upsert_record(&pool, "user-2", &session, AttendanceStatus::Absent)
            .await
            .expect("user-2 write");

        let first = fetch_records(&pool, "user-1").await.expect("fetch user-1");
        let second = fetch_records(&pool, "user-2").await.expect("fetch user-2");
        assert_eq!(first[0].status, AttendanceStatus::Present);
        assert_eq!(second[0].status, AttendanceStatus::Absent);
        assert!(fetch_records(&pool, "user-3").await.expect("fetch user-3").is_empty());
    }

    #[tokio::test]
    async fn test_store_trait_roundtrip() {
        let store = SqliteRecordStore::new(setup_test_db().await);
        store.ping().await.expect("ping");

        let mut lab = os_lecture();
        lab.session_type = SessionType::Lab;
        lab.id = "2026-01-05-OS-1".to_string();

        store
            .upsert_record("user-1", &os_lecture(), AttendanceStatus::Present)
            .await
            .expect("lecture write");
        store
            .upsert_record("user-1", &lab, AttendanceStatus::Cancelled)
            .await
            .expect("lab write");

        let records = store.fetch_records("user-1").await.expect("fetch");
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.session_type == SessionType::Lab
            && r.status == AttendanceStatus::Cancelled));
    }
}
