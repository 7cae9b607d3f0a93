use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTypeStats {
    pub attended: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Band a subject's overall percentage falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    Good,
    Warning,
    Danger,
}

/// Catalog entry joined with aggregates derived from the current sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(flatten)]
    pub info: SubjectInfo,
    pub attended: usize,
    pub total: usize,
    pub standing: Standing,
    pub lecture_stats: SessionTypeStats,
    pub lab_stats: SessionTypeStats,
    pub tutorial_stats: SessionTypeStats,
}
