use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::session::{AttendanceStatus, SessionType};

/// A persisted status, one per `(user, date, subject, session type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub date: String,
    pub subject_id: String,
    pub session_type: SessionType,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(
        date: impl Into<String>,
        subject_id: impl Into<String>,
        session_type: SessionType,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            date: date.into(),
            subject_id: subject_id.into(),
            session_type,
            status,
        }
    }
}
