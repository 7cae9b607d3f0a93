use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::AcademicPhase;

pub const SEMESTER_START: NaiveDate = date(2025, 12, 22);
pub const SEMESTER_END: NaiveDate = date(2026, 4, 18);

const HOLIDAYS: &[(NaiveDate, &str)] = &[
    (date(2025, 12, 25), "Christmas"),
    (date(2026, 1, 14), "Makar Sankranti"),
    (date(2026, 1, 26), "Republic Day"),
    (date(2026, 2, 15), "Maha Shivratri"),
    (date(2026, 3, 4), "Holi (Dhuleti)"),
    (date(2026, 3, 21), "Eid-ul-Fitr"),
    (date(2026, 3, 26), "Ram Navmi"),
    (date(2026, 3, 31), "Mahavir Jayanti"),
    (date(2026, 4, 14), "Ambedkar Jayanti"),
];

const PHASES: &[(&str, NaiveDate, NaiveDate)] = &[
    ("Teaching Phase-I", date(2025, 12, 22), date(2026, 2, 24)),
    ("Attendance Review-I", date(2026, 2, 5), date(2026, 2, 10)),
    ("Sessional Exams", date(2026, 2, 25), date(2026, 2, 27)),
    ("Teaching Phase-II", date(2026, 3, 2), date(2026, 4, 17)),
    ("Attendance Review-II", date(2026, 3, 23), date(2026, 3, 25)),
    ("LPW Exams", date(2026, 4, 8), date(2026, 4, 17)),
    ("Final Freeze", date(2026, 4, 18), date(2026, 4, 18)),
];

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid built-in calendar date"),
    }
}

pub fn holidays() -> BTreeMap<NaiveDate, String> {
    HOLIDAYS
        .iter()
        .map(|(d, name)| (*d, name.to_string()))
        .collect()
}

pub fn academic_phases() -> Vec<AcademicPhase> {
    PHASES
        .iter()
        .map(|(name, start, end)| AcademicPhase {
            name: name.to_string(),
            start: *start,
            end: *end,
        })
        .collect()
}
