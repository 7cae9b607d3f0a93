use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::SessionType;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record store error: {0}")]
    Upstream(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing user identity")]
    Unauthorized,

}

/// Raised while loading static configuration, before the server starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("semester starts on {start} but ends on {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("timetable has more than one {session_type:?} of {subject_id} on {day}")]
    DuplicateSlot {
        day: Weekday,
        subject_id: String,
        session_type: SessionType,
    },

    #[error("timetable entry {subject_id} on {day} has invalid times {start_time}-{end_time}")]
    InvalidTime {
        day: Weekday,
        subject_id: String,
        start_time: String,
        end_time: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "X-User-Id header is required".to_string(),
            ),
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                error!("record store error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Record store unavailable".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::BadRequest("bad month".to_string()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Upstream("timeout".to_string()), StatusCode::BAD_GATEWAY),
            (AppError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::MissingEnv("SUPABASE_URL").to_string(), "SUPABASE_URL is not set");
        let err = ConfigError::InvalidEnv {
            key: "RECORD_STORE",
            value: "redis".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for RECORD_STORE: redis");
    }
}
