pub mod record;
pub mod session;
pub mod subject;
pub mod timetable;

pub use record::AttendanceRecord;
pub use session::{AttendanceStatus, ClassSession, SessionType, UpdateStatusRequest};
pub use subject::{SessionTypeStats, Standing, Subject, SubjectInfo};
pub use timetable::{AcademicPhase, TimetableEntry};
