use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{
    AcademicPhase, AttendanceStatus, ClassSession, SessionType, SessionTypeStats, Standing,
    Subject, SubjectInfo,
};

const DANGER_BELOW: f64 = 75.0;
const RISKY_BELOW: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveRisk {
    Safe,
    Risky,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveSimulation {
    pub risk: LeaveRisk,
    pub new_percentage: f64,
    pub impact: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayStreak {
    pub date: NaiveDate,
    pub name: String,
    pub length: u32,
    pub starts: NaiveDate,
    pub ends: NaiveDate,
}

/// Rounded percentage, with "no data yet" counted as 100.
fn percentage(attended: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (attended as f64 / total as f64 * 100.0).round() as u32
}

/// Same thresholds as the leave projection, applied to a rounded percentage.
pub fn standing(percentage: u32) -> Standing {
    let percentage = f64::from(percentage);
    if percentage < DANGER_BELOW {
        Standing::Danger
    } else if percentage < RISKY_BELOW {
        Standing::Warning
    } else {
        Standing::Good
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn count_present<'a>(sessions: impl Iterator<Item = &'a ClassSession>) -> usize {
    sessions
        .filter(|s| s.status == AttendanceStatus::Present)
        .count()
}

/// Only PRESENT counts as attended; every other status counts toward the total.
pub fn session_type_stats(sessions: &[ClassSession], session_type: SessionType) -> SessionTypeStats {
    let of_type = || sessions.iter().filter(|s| s.session_type == session_type);
    let total = of_type().count();
    let attended = count_present(of_type());

    SessionTypeStats {
        attended,
        total,
        percentage: percentage(attended, total),
    }
}

pub fn aggregate_subject(info: &SubjectInfo, sessions: &[ClassSession]) -> Subject {
    let own: Vec<ClassSession> = sessions
        .iter()
        .filter(|s| s.subject_id == info.id)
        .cloned()
        .collect();

    let attended = count_present(own.iter());
    let total = own.len();

    Subject {
        info: info.clone(),
        attended,
        total,
        standing: standing(percentage(attended, total)),
        lecture_stats: session_type_stats(&own, SessionType::Lecture),
        lab_stats: session_type_stats(&own, SessionType::Lab),
        tutorial_stats: session_type_stats(&own, SessionType::Tutorial),
    }
}

pub fn aggregate_subjects(catalog: &[SubjectInfo], sessions: &[ClassSession]) -> Vec<Subject> {
    catalog
        .iter()
        .map(|info| aggregate_subject(info, sessions))
        .collect()
}

pub fn overall_percentage(subjects: &[Subject]) -> u32 {
    let total: usize = subjects.iter().map(|s| s.total).sum();
    let attended: usize = subjects.iter().map(|s| s.attended).sum();
    percentage(attended, total)
}

/// Projects attendance if every session on `leave_dates` were missed.
///
/// The baseline only counts resolved (non-PENDING) sessions. Leave that
/// touches an exam or review window is always `Danger`.
pub fn simulate_leave(
    sessions: &[ClassSession],
    leave_dates: &[NaiveDate],
    phases: &[AcademicPhase],
) -> LeaveSimulation {
    let attended = count_present(sessions.iter()) as f64;
    let resolved = sessions
        .iter()
        .filter(|s| s.status != AttendanceStatus::Pending)
        .count();
    let current = if resolved > 0 {
        attended / resolved as f64 * 100.0
    } else {
        100.0
    };

    let missed = sessions
        .iter()
        .filter(|s| leave_dates.contains(&s.date))
        .count();
    let projected_total = resolved + missed;
    let projected = if projected_total > 0 {
        attended / projected_total as f64 * 100.0
    } else {
        100.0
    };

    let impact = round_one_decimal(current - projected);
    let new_percentage = round_one_decimal(projected);

    let blocked = phases
        .iter()
        .filter(|p| p.blocks_leave())
        .any(|p| leave_dates.iter().any(|d| p.contains(*d)));

    if blocked {
        return LeaveSimulation {
            risk: LeaveRisk::Danger,
            new_percentage,
            impact,
            message: "Cannot take leave during Exam/Review weeks!".to_string(),
        };
    }

    let risk = if projected < DANGER_BELOW {
        LeaveRisk::Danger
    } else if projected < RISKY_BELOW {
        LeaveRisk::Risky
    } else {
        LeaveRisk::Safe
    };

    LeaveSimulation {
        risk,
        new_percentage,
        impact,
        message: format!("This leave will reduce your attendance by {}%.", impact),
    }
}

/// Flags holidays that bridge into a weekend.
///
/// Only Thursday (Thu..Sun) and Tuesday (Sat..Tue) holidays qualify; other
/// weekdays, and adjacency between several holidays, are not considered.
pub fn detect_holiday_streaks(holidays: &BTreeMap<NaiveDate, String>) -> Vec<HolidayStreak> {
    holidays
        .iter()
        .filter_map(|(date, name)| {
            let (starts, ends) = match date.weekday() {
                Weekday::Thu => (*date, date.checked_add_days(Days::new(3))?),
                Weekday::Tue => (date.checked_sub_days(Days::new(3))?, *date),
                _ => return None,
            };

            Some(HolidayStreak {
                date: *date,
                name: name.clone(),
                length: 4,
                starts,
                ends,
            })
        })
        .collect()
}
