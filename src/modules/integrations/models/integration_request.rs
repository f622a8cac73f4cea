use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Log entry for one outbound call to a payment provider
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IntegrationRequest {
    pub id: String,
    pub service: String,
    pub reference_id: String,
    pub request_data: serde_json::Value,
    pub output: Option<serde_json::Value>,
    pub error: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Queued,
    Completed,
    Failed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Queued => "queued",
            RequestStatus::Completed => "completed",
            RequestStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "queued" => Ok(RequestStatus::Queued),
            "completed" => Ok(RequestStatus::Completed),
            "failed" => Ok(RequestStatus::Failed),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}
