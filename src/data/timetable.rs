use crate::models::{SubjectInfo, TimetableEntry};

use crate::models::SessionType::{Lab, Lecture, Tutorial};
use chrono::Weekday::{Fri, Mon, Thu, Tue, Wed};

pub fn weekly_timetable() -> Vec<TimetableEntry> {
    vec![
        TimetableEntry::new(Mon, "08:40", "09:35", "DC", Lecture),
        TimetableEntry::new(Mon, "09:50", "11:40", "OS", Lab),
        TimetableEntry::new(Mon, "12:35", "13:30", "CL", Lecture),
        TimetableEntry::new(Mon, "13:30", "14:25", "OS", Lecture),
        TimetableEntry::new(Tue, "08:40", "09:35", "JP", Lecture),
        TimetableEntry::new(Tue, "12:35", "13:30", "CA", Lecture),
        TimetableEntry::new(Wed, "07:45", "08:40", "OS", Lecture),
        TimetableEntry::new(Wed, "08:40", "09:35", "CA", Tutorial),
        TimetableEntry::new(Wed, "09:50", "11:40", "CA", Lecture),
        TimetableEntry::new(Wed, "12:35", "13:30", "DBMS", Lecture),
        TimetableEntry::new(Wed, "13:30", "14:25", "JP", Lab),
        TimetableEntry::new(Thu, "08:40", "09:35", "DC", Lecture),
        TimetableEntry::new(Thu, "09:50", "11:40", "DBMS", Lab),
        TimetableEntry::new(Thu, "12:35", "13:30", "CL", Tutorial),
        TimetableEntry::new(Fri, "07:45", "09:35", "DC", Lab),
        TimetableEntry::new(Fri, "09:50", "10:45", "CL", Lecture),
        TimetableEntry::new(Fri, "10:45", "11:40", "DBMS", Lecture),
        TimetableEntry::new(Fri, "13:30", "14:25", "JP", Lecture),
    ]
}

pub fn subject_catalog() -> Vec<SubjectInfo> {
    [
        ("OS", "Operating Systems", "CS301", "#3B82F6"),
        ("JP", "Java Programming", "CS302", "#8B5CF6"),
        ("DBMS", "Database Management Systems", "CS303", "#10B981"),
        ("DC", "Data Communication", "CS304", "#F59E0B"),
        ("CA", "Computer Architecture", "CS305", "#EF4444"),
        ("CL", "Contemporary Literature", "HS301", "#EC4899"),
    ]
    .into_iter()
    .map(|(id, name, code, color)| SubjectInfo {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        color: color.to_string(),
    })
    .collect()
}
