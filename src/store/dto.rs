use serde::Serialize;

use crate::models::{AttendanceStatus, ClassSession, SessionType};

/// Body of a PostgREST upsert into `attendance_records`.
///
/// Rows read back deserialize straight into `AttendanceRecord`; extra
/// columns such as `user_id` are ignored.
#[derive(Debug, Serialize)]
pub struct UpsertRecordRequest<'a> {
    pub user_id: &'a str,
    pub session_id: &'a str,
    pub status: AttendanceStatus,
    pub date: String,
    pub subject_id: &'a str,
    pub session_type: SessionType,
}

impl<'a> UpsertRecordRequest<'a> {
    pub fn new(user_id: &'a str, session: &'a ClassSession, status: AttendanceStatus) -> Self {
        Self {
            user_id,
            session_id: &session.id,
            status,
            date: session.date_key(),
            subject_id: &session.subject_id,
            session_type: session.session_type,
        }
    }
}
