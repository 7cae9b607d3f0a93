use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{AcademicPhase, ClassSession};

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub holiday: Option<String>,
    pub sessions: Vec<ClassSession>,
}

/// Sunday-first grid covering whole weeks around one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

pub fn sessions_on(sessions: &[ClassSession], date: NaiveDate) -> Vec<ClassSession> {
    sessions.iter().filter(|s| s.date == date).cloned().collect()
}

pub fn month_view(
    sessions: &[ClassSession],
    holidays: &BTreeMap<NaiveDate, String>,
    year: i32,
    month: u32,
) -> Result<MonthView, AppError> {
    let invalid = || AppError::BadRequest(format!("invalid month {}-{}", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());
    let grid_start = first.checked_sub_days(Days::new(lead)).ok_or_else(invalid)?;
    let grid_end = last.checked_add_days(Days::new(trail)).ok_or_else(invalid)?;

    let days = grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .map(|date| CalendarDay {
            date,
            in_month: date.month() == month,
            holiday: holidays.get(&date).cloned(),
            sessions: sessions_on(sessions, date),
        })
        .collect();

    Ok(MonthView { year, month, days })
}

pub fn active_phases(phases: &[AcademicPhase], date: NaiveDate) -> Vec<AcademicPhase> {
    phases.iter().filter(|p| p.contains(date)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::config::SemesterConfig;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sessions_on_single_day() {
        let config = SemesterConfig::built_in();
        let sessions = config.sessions();

        let wednesday = sessions_on(&sessions, ymd(2026, 1, 7));
        assert_eq!(wednesday.len(), 5);
        assert!(sessions_on(&sessions, ymd(2026, 1, 10)).is_empty());
    }

    #[test]
    fn test_month_view_grid() {
        let config = SemesterConfig::built_in();
        let sessions = config.sessions();

        // January 2026 starts on a Thursday and ends on a Saturday.
        let view = month_view(&sessions, &config.holidays, 2026, 1).expect("valid month");

        assert_eq!(view.days.first().map(|d| d.date), Some(ymd(2025, 12, 28)));
        assert_eq!(view.days.last().map(|d| d.date), Some(ymd(2026, 1, 31)));
        assert_eq!(view.days.len() % 7, 0);
        assert_eq!(view.days[0].date.weekday(), Weekday::Sun);
        assert!(!view.days[0].in_month);
        assert!(view.days[4].in_month);

        let republic_day = view
            .days
            .iter()
            .find(|d| d.date == ymd(2026, 1, 26))
            .expect("day in grid");
        assert_eq!(republic_day.holiday.as_deref(), Some("Republic Day"));
        assert!(republic_day.sessions.is_empty());

        let monday = view
            .days
            .iter()
            .find(|d| d.date == ymd(2026, 1, 5))
            .expect("day in grid");
        assert_eq!(monday.sessions.len(), 4);
    }

    #[test]
    fn test_month_view_rejects_bad_month() {
        assert!(matches!(
            month_view(&[], &BTreeMap::new(), 2026, 13),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            month_view(&[], &BTreeMap::new(), 2026, 0),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_active_phases_overlap() {
        let config = SemesterConfig::built_in();
        let names: Vec<String> = active_phases(&config.phases, ymd(2026, 2, 6))
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Teaching Phase-I", "Attendance Review-I"]);
        assert!(active_phases(&config.phases, ymd(2026, 2, 28)).is_empty());
    }
}
