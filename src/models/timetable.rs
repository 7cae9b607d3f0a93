use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::session::SessionType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: String,
    pub session_type: SessionType,
}

impl TimetableEntry {
    pub fn new(
        day: Weekday,
        start_time: &str,
        end_time: &str,
        subject_id: &str,
        session_type: SessionType,
    ) -> Self {
        Self {
            day,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            subject_id: subject_id.to_string(),
            session_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicPhase {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AcademicPhase {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Exams and attendance reviews are no-leave windows.
    pub fn blocks_leave(&self) -> bool {
        self.name.contains("Exam") || self.name.contains("Review")
    }
}
