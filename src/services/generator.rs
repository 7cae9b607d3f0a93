use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::ConfigError;
use crate::models::{AttendanceStatus, ClassSession, TimetableEntry};

/// Expands the weekly timetable over `[start, end]`, skipping holidays.
///
/// Sessions are ordered by date, then by timetable order within a day. The
/// id is `{date}-{subject}-{i}` where `i` is the entry's position among that
/// weekday's entries, so the output is identical for identical inputs.
pub fn generate_sessions(
    timetable: &[TimetableEntry],
    start: NaiveDate,
    end: NaiveDate,
    holidays: &BTreeMap<NaiveDate, String>,
) -> Vec<ClassSession> {
    let mut sessions = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        if holidays.contains_key(&date) {
            continue;
        }

        let date_str = date.format("%Y-%m-%d");
        let weekday = date.weekday();

        for (i, entry) in timetable.iter().filter(|e| e.day == weekday).enumerate() {
            sessions.push(ClassSession {
                id: format!("{}-{}-{}", date_str, entry.subject_id, i),
                subject_id: entry.subject_id.clone(),
                date,
                start_time: entry.start_time.clone(),
                end_time: entry.end_time.clone(),
                session_type: entry.session_type,
                status: AttendanceStatus::Pending,
            });
        }
    }

    sessions
}

/// Rejects timetables the record store could not represent.
///
/// Records are keyed by `(date, subject, session type)`, so two entries with
/// the same weekday, subject and type would share one persisted status.
pub fn validate_timetable(timetable: &[TimetableEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in timetable {
        let start = NaiveTime::parse_from_str(&entry.start_time, "%H:%M");
        let end = NaiveTime::parse_from_str(&entry.end_time, "%H:%M");
        let ordered = matches!((start, end), (Ok(s), Ok(e)) if s < e);
        if !ordered {
            return Err(ConfigError::InvalidTime {
                day: entry.day,
                subject_id: entry.subject_id.clone(),
                start_time: entry.start_time.clone(),
                end_time: entry.end_time.clone(),
            });
        }

        if !seen.insert((entry.day, entry.subject_id.as_str(), entry.session_type)) {
            return Err(ConfigError::DuplicateSlot {
                day: entry.day,
                subject_id: entry.subject_id.clone(),
                session_type: entry.session_type,
            });
        }
    }

    Ok(())
}
