use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fs;
use std::net::SocketAddr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data;
use crate::error::ConfigError;
use crate::models::{AcademicPhase, ClassSession, SubjectInfo, TimetableEntry};
use crate::services::generator;
use crate::store::SupabaseConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://attendance.db?mode=rwc";

#[derive(Clone, Debug)]
pub enum StoreConfig {
    Sqlite { database_url: String },
    Supabase(SupabaseConfig),
    Noop,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub semester_path: Option<String>,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::InvalidEnv {
            key: "BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let store = match lookup("RECORD_STORE").as_deref().unwrap_or("sqlite") {
            "sqlite" => StoreConfig::Sqlite {
                database_url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            },
            "supabase" => StoreConfig::Supabase(SupabaseConfig::from_lookup(&lookup)?),
            "noop" => StoreConfig::Noop,
            other => {
                return Err(ConfigError::InvalidEnv {
                    key: "RECORD_STORE",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            bind_addr,
            store,
            semester_path: lookup("SEMESTER_CONFIG"),
        })
    }
}

/// Everything the session pipeline needs that is fixed for a semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub holidays: BTreeMap<NaiveDate, String>,
    #[serde(default)]
    pub phases: Vec<AcademicPhase>,
    pub timetable: Vec<TimetableEntry>,
    pub subjects: Vec<SubjectInfo>,
}

impl SemesterConfig {
    pub fn built_in() -> Self {
        Self {
            start: data::calendar::SEMESTER_START,
            end: data::calendar::SEMESTER_END,
            holidays: data::calendar::holidays(),
            phases: data::calendar::academic_phases(),
            timetable: data::timetable::weekly_timetable(),
            subjects: data::timetable::subject_catalog(),
        }
    }

    /// Reads the JSON file at `path`, or falls back to the built-in semester.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                info!("Loading semester configuration from {}", path);
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_string(),
                    source,
                })?;
                Self::from_json(path, &text)?
            }
            None => {
                info!("SEMESTER_CONFIG not set, using built-in semester");
                Self::built_in()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(path: &str, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start > self.end {
            return Err(ConfigError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }

        generator::validate_timetable(&self.timetable)?;

        let known: HashSet<&str> = self.subjects.iter().map(|s| s.id.as_str()).collect();
        for entry in &self.timetable {
            if !known.contains(entry.subject_id.as_str()) {
                warn!(
                    "Timetable entry on {} references unknown subject {}",
                    entry.day, entry.subject_id
                );
            }
        }

        Ok(())
    }

    /// Every session of the semester, all PENDING.
    pub fn sessions(&self) -> Vec<ClassSession> {
        generator::generate_sessions(&self.timetable, self.start, self.end, &self.holidays)
    }

    pub fn subject(&self, id: &str) -> Option<&SubjectInfo> {
        self.subjects.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Weekday;

    use super::*;
    use crate::models::SessionType;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults_to_sqlite() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults should load");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.semester_path.is_none());
        match config.store {
            StoreConfig::Sqlite { database_url } => assert_eq!(database_url, DEFAULT_DATABASE_URL),
            other => panic!("unexpected store config: {:?}", other),
        }
    }

    #[test]
    fn test_app_config_supabase_requires_credentials() {
        let err = AppConfig::from_lookup(lookup(&[("RECORD_STORE", "supabase")]))
            .expect_err("missing url must fail");
        assert!(matches!(err, ConfigError::MissingEnv("SUPABASE_URL")));

        let config = AppConfig::from_lookup(lookup(&[
            ("RECORD_STORE", "supabase"),
            ("SUPABASE_URL", "https://example.supabase.co/"),
            ("SUPABASE_KEY", "anon"),
        ]))
        .expect("supabase config should load");
        match config.store {
            StoreConfig::Supabase(supabase) => {
                assert_eq!(supabase.url, "https://example.supabase.co");
                assert_eq!(supabase.api_key, "anon");
            }
            other => panic!("unexpected store config: {:?}", other),
        }
    }

    #[test]
    fn test_app_config_rejects_unknown_store() {
        let err = AppConfig::from_lookup(lookup(&[("RECORD_STORE", "redis")]))
            .expect_err("unknown store must fail");
        assert!(matches!(err, ConfigError::InvalidEnv { key: "RECORD_STORE", .. }));
    }

    #[test]
    fn test_built_in_semester_is_valid() {
        let config = SemesterConfig::built_in();
        config.validate().expect("built-in semester must validate");
        assert_eq!(config.subjects.len(), 6);
        assert_eq!(config.timetable.len(), 18);
    }

    #[test]
    fn test_semester_from_json() {
        let text = r##"{
            "start": "2026-01-05",
            "end": "2026-01-09",
            "holidays": { "2026-01-07": "Founders Day" },
            "phases": [{ "name": "Sessional Exams", "start": "2026-01-08", "end": "2026-01-09" }],
            "timetable": [
                { "day": "Monday", "start_time": "09:00", "end_time": "10:00", "subject_id": "OS", "session_type": "LECTURE" }
            ],
            "subjects": [{ "id": "OS", "name": "Operating Systems", "code": "CS301", "color": "#3B82F6" }]
        }"##;

        let config = SemesterConfig::from_json("inline", text).expect("should parse");
        config.validate().expect("should validate");
        assert_eq!(config.timetable[0].day, Weekday::Mon);
        assert_eq!(config.timetable[0].session_type, SessionType::Lecture);
        assert_eq!(
            config.holidays.get(&NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()),
            Some(&"Founders Day".to_string())
        );
        assert_eq!(config.sessions().len(), 1);
    }

    #[test]
    fn test_semester_from_json_reports_parse_errors() {
        let err = SemesterConfig::from_json("broken.json", "{ not json").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_semester_rejects_inverted_range() {
        let mut config = SemesterConfig::built_in();
        std::mem::swap(&mut config.start, &mut config.end);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn test_semester_rejects_duplicate_slots() {
        let mut config = SemesterConfig::built_in();
        config.timetable.push(TimetableEntry::new(
            Weekday::Mon,
            "15:00",
            "16:00",
            "OS",
            SessionType::Lecture,
        ));
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateSlot { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SemesterConfig::load(Some("/nonexistent/semester.json")).expect_err("must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
