use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use tracing::debug;

use super::{RecordStore, dto};
use crate::error::{AppError, ConfigError};
use crate::models::{AttendanceRecord, AttendanceStatus, ClassSession};

const TABLE: &str = "attendance_records";
const CONFLICT_TARGET: &str = "user_id,date,subject_id,session_type";

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
}

impl SupabaseConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("SUPABASE_URL").ok_or(ConfigError::MissingEnv("SUPABASE_URL"))?;
        let api_key = lookup("SUPABASE_KEY").ok_or(ConfigError::MissingEnv("SUPABASE_KEY"))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

/// Attendance table behind a PostgREST endpoint.
pub struct SupabaseRecordStore {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseRecordStore {
    pub fn new(config: SupabaseConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn table_url(&self, params: &[(&str, &str)]) -> Result<Url, AppError> {
        let base = format!("{}/rest/v1/{}", self.config.url, TABLE);
        Url::parse_with_params(&base, params)
            .map_err(|e| AppError::Upstream(format!("invalid record store url {}: {}", base, e)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("PostgREST error {}: {}", status, body)));
        }

        Ok(response)
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn fetch_records(&self, user_id: &str) -> Result<Vec<AttendanceRecord>, AppError> {
        let filter = format!("eq.{}", user_id);
        let url = self.table_url(&[("select", "*"), ("user_id", filter.as_str())])?;
        let request = self.client.get(url);

        let response = self.send(request).await?;
        let records: Vec<AttendanceRecord> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse records: {}", e)))?;

        debug!("Fetched {} records for {}", records.len(), user_id);
        Ok(records)
    }

    async fn upsert_record(
        &self,
        user_id: &str,
        session: &ClassSession,
        status: AttendanceStatus,
    ) -> Result<(), AppError> {
        let body = dto::UpsertRecordRequest::new(user_id, session, status);
        let url = self.table_url(&[("on_conflict", CONFLICT_TARGET)])?;
        let request = self
            .client
            .post(url)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body);

        self.send(request).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        let url = self.table_url(&[("select", "user_id"), ("limit", "1")])?;
        let request = self.client.get(url);

        self.send(request).await?;
        Ok(())
    }
}
