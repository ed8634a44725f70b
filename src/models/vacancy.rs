use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "work_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    Office,
    Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub link: String,
    pub communication: Option<String>,
    pub company: String,
    pub location: String,
    pub work_type: WorkType,
    pub note: Option<String>,
    pub is_archive: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vacancy {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
