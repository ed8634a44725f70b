use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::vacancy_status::{RejectReason, StatusName, StatusRecord};

/// Body for adding or editing a status record.
///
/// Enum values and the resume reference arrive as plain strings so that bad
/// values surface as status-rule errors instead of generic JSON rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StatusPayload {
    pub name: Option<String>,
    #[serde(default, alias = "rejectReason")]
    pub reject_reason: Option<String>,
    #[serde(default, alias = "resumeId")]
    pub resume_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub id: Uuid,
    pub name: StatusName,
    pub date: DateTime<Utc>,
    pub reject_reason: Option<RejectReason>,
    pub resume_id: Option<Uuid>,
}

impl From<StatusRecord> for StatusResponse {
    fn from(value: StatusRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            reject_reason: value.reject_reason,
            resume_id: value.resume_id,
        }
    }
}
