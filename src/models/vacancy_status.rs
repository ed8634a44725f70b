use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Pipeline stage of a vacancy, in the order a search usually moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_name", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusName {
    Saved,
    Resume,
    Hr,
    Test,
    Tech,
    Reject,
    Offer,
}

impl StatusName {
    pub const ALL: [StatusName; 7] = [
        StatusName::Saved,
        StatusName::Resume,
        StatusName::Hr,
        StatusName::Test,
        StatusName::Tech,
        StatusName::Reject,
        StatusName::Offer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusName::Saved => "saved",
            StatusName::Resume => "resume",
            StatusName::Hr => "hr",
            StatusName::Test => "test",
            StatusName::Tech => "tech",
            StatusName::Reject => "reject",
            StatusName::Offer => "offer",
        }
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StatusName::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reject_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SoftSkills,
    TechSkills,
    English,
    Experience,
    Stopped,
    NoAnswer,
    Other,
}

impl RejectReason {
    pub const ALL: [RejectReason; 7] = [
        RejectReason::SoftSkills,
        RejectReason::TechSkills,
        RejectReason::English,
        RejectReason::Experience,
        RejectReason::Stopped,
        RejectReason::NoAnswer,
        RejectReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::SoftSkills => "soft_skills",
            RejectReason::TechSkills => "tech_skills",
            RejectReason::English => "english",
            RejectReason::Experience => "experience",
            RejectReason::Stopped => "stopped",
            RejectReason::NoAnswer => "no_answer",
            RejectReason::Other => "other",
        }
    }
}

impl FromStr for RejectReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RejectReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StatusRecord {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub name: StatusName,
    pub date: DateTime<Utc>,
    pub reject_reason: Option<RejectReason>,
    pub resume_id: Option<Uuid>,
}

/// A status payload that already passed the companion-field rules.
///
/// Only `utils::validation` builds these, so every `StatusRecord` derived from
/// one carries exactly the companion fields its name allows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub(crate) name: StatusName,
    pub(crate) reject_reason: Option<RejectReason>,
    pub(crate) resume_id: Option<Uuid>,
    pub(crate) date: Option<DateTime<Utc>>,
}

impl StatusChange {
    pub fn name(&self) -> StatusName {
        self.name
    }

    pub fn resume_id(&self) -> Option<Uuid> {
        self.resume_id
    }
}

impl StatusRecord {
    /// The `saved` record every vacancy starts with.
    pub fn initial(vacancy_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vacancy_id,
            name: StatusName::Saved,
            date: at,
            reject_reason: None,
            resume_id: None,
        }
    }

    pub fn from_change(vacancy_id: Uuid, change: StatusChange, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vacancy_id,
            name: change.name,
            date: change.date.unwrap_or(now),
            reject_reason: change.reject_reason,
            resume_id: change.resume_id,
        }
    }

    /// Full next state of this record. Companion fields come only from the
    /// change, so switching away from `reject`/`resume` nulls them.
    pub fn transition(&self, change: StatusChange) -> Self {
        Self {
            id: self.id,
            vacancy_id: self.vacancy_id,
            name: change.name,
            date: change.date.unwrap_or(self.date),
            reject_reason: change.reject_reason,
            resume_id: change.resume_id,
        }
    }
}
