//! Built-in semester used when no `SEMESTER_CONFIG` file is supplied.

pub mod calendar;
pub mod timetable;
