use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::config::SemesterConfig;
use crate::models::{AttendanceRecord, AttendanceStatus, ClassSession};
use crate::store::RecordStore;

/// Overlays persisted statuses onto generated sessions.
///
/// A record matches a session when its date, subject and session type are
/// equal to the session's. Order and length are preserved; if duplicate
/// records exist for one key, the first one wins.
pub fn merge_records(sessions: Vec<ClassSession>, records: &[AttendanceRecord]) -> Vec<ClassSession> {
    sessions
        .into_iter()
        .map(|mut session| {
            let date = session.date_key();
            if let Some(record) = records.iter().find(|r| {
                r.date == date
                    && r.subject_id == session.subject_id
                    && r.session_type == session.session_type
            }) {
                session.status = record.status;
            }
            session
        })
        .collect()
}

/// Generates the semester and merges the user's records into it.
///
/// A failed fetch leaves every session PENDING rather than failing the view.
pub async fn load_sessions(
    store: &dyn RecordStore,
    user_id: &str,
    semester: &SemesterConfig,
) -> Vec<ClassSession> {
    let sessions = semester.sessions();

    let records = match store.fetch_records(user_id).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to fetch attendance for {}: {}", user_id, e);
            Vec::new()
        }
    };

    debug!(
        "Merging {} records into {} sessions for {}",
        records.len(),
        sessions.len(),
        user_id
    );
    merge_records(sessions, &records)
}

/// Persists a status change in the background.
///
/// Nothing waits on the returned handle in the request path: the caller has
/// already applied the change locally, and a failed write is only logged.
// TODO: replace with an outbox table drained by a retry worker if lost writes start to matter.
pub fn save_attendance(
    store: Arc<dyn RecordStore>,
    user_id: String,
    session: ClassSession,
    status: AttendanceStatus,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match store.upsert_record(&user_id, &session, status).await {
            Ok(()) => debug!("Saved {} as {} for {}", session.id, status.as_str(), user_id),
            Err(e) => error!("Error saving attendance for {}: {}", session.id, e),
        }
    })
}
