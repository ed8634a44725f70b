use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::status_dto::StatusResponse;
use crate::models::vacancy::{Vacancy, WorkType};
use crate::services::vacancy_service::VacancyDetails;
use crate::utils::validation::{validate_link, validate_non_blank};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVacancyPayload {
    /// Vacancy title.
    #[validate(custom(function = "validate_non_blank"))]
    pub vacancy: String,
    #[validate(custom(function = "validate_link"))]
    pub link: String,
    pub communication: Option<String>,
    #[validate(custom(function = "validate_non_blank"))]
    pub company: String,
    #[validate(custom(function = "validate_non_blank"))]
    pub location: String,
    pub work_type: WorkType,
    pub note: Option<String>,
}

/// Whitelisted partial update. Unknown keys are rejected at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateVacancyPayload {
    #[validate(custom(function = "validate_non_blank"))]
    pub vacancy: Option<String>,
    #[validate(custom(function = "validate_link"))]
    pub link: Option<String>,
    pub communication: Option<String>,
    #[validate(custom(function = "validate_non_blank"))]
    pub company: Option<String>,
    #[validate(custom(function = "validate_non_blank"))]
    pub location: Option<String>,
    pub work_type: Option<WorkType>,
    pub note: Option<String>,
}

impl UpdateVacancyPayload {
    /// True when at least one field was sent with a non-empty value.
    pub fn has_content(&self) -> bool {
        let texts = [
            &self.vacancy,
            &self.link,
            &self.communication,
            &self.company,
            &self.location,
            &self.note,
        ];
        self.work_type.is_some()
            || texts
                .iter()
                .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Copies recognised fields onto `vacancy`. An empty string clears the
    /// optional text fields.
    pub fn apply(self, vacancy: &mut Vacancy) {
        if let Some(title) = self.vacancy {
            vacancy.title = title;
        }
        if let Some(link) = self.link {
            vacancy.link = link.trim().to_string();
        }
        if let Some(company) = self.company {
            vacancy.company = company;
        }
        if let Some(location) = self.location {
            vacancy.location = location;
        }
        if let Some(work_type) = self.work_type {
            vacancy.work_type = work_type;
        }
        if let Some(communication) = self.communication {
            vacancy.communication = non_blank(communication);
        }
        if let Some(note) = self.note {
            vacancy.note = non_blank(note);
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub vacancy: String,
    pub link: String,
    pub communication: Option<String>,
    pub company: String,
    pub location: String,
    pub work_type: WorkType,
    pub note: Option<String>,
    pub is_archive: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Most recent first.
    pub statuses: Vec<StatusResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyListResponse {
    pub items: Vec<VacancyResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<VacancyDetails> for VacancyResponse {
    fn from(value: VacancyDetails) -> Self {
        let VacancyDetails { vacancy, statuses } = value;
        Self {
            id: vacancy.id,
            vacancy: vacancy.title,
            link: vacancy.link,
            communication: vacancy.communication,
            company: vacancy.company,
            location: vacancy.location,
            work_type: vacancy.work_type,
            note: vacancy.note,
            is_archive: vacancy.is_archive,
            created_at: vacancy.created_at,
            updated_at: vacancy.updated_at,
            statuses: statuses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<VacancyDetails>> for VacancyListResponse {
    fn from(value: Vec<VacancyDetails>) -> Self {
        let items: Vec<VacancyResponse> = value.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}
