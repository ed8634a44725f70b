use std::borrow::Cow;

use uuid::Uuid;
use validator::ValidationError;

use crate::dto::status_dto::StatusPayload;
use crate::models::vacancy_status::{RejectReason, StatusChange, StatusName, StatusRecord};
use crate::utils::time::parse_status_date;

/// Vacancy links must be absolute http(s) URLs with a host.
pub fn validate_link(link: &str) -> Result<(), ValidationError> {
    match url::Url::parse(link.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => {
            let mut err = ValidationError::new("url");
            err.message = Some(Cow::from("Invalid URL format for vacancy link"));
            Err(err)
        }
    }
}

/// Rejects empty and whitespace-only text.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("Value cannot be blank"));
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusRuleError {
    #[error("status name required")]
    NameRequired,
    #[error("unknown status name '{0}'")]
    UnknownName(String),
    #[error("reject reason must be one of: soft_skills, tech_skills, english, experience, stopped, no_answer, other")]
    UnknownRejectReason(String),
    #[error("resume reference must be a UUID")]
    InvalidResumeRef,
    #[error("reject reason required")]
    RejectReasonRequired,
    #[error("resume not allowed with reject")]
    ResumeNotAllowedWithReject,
    #[error("resume reference required")]
    ResumeRefRequired,
    #[error("reject reason not allowed with resume")]
    RejectReasonNotAllowedWithResume,
    #[error("companion field not allowed for this status")]
    CompanionNotAllowed,
    #[error("invalid status date")]
    InvalidDate,
    #[error("at least one field required")]
    EmptyUpdate,
}

/// Companion-field rules shared by status creation and update.
pub fn validate_status_payload(
    name: StatusName,
    reject_reason: Option<RejectReason>,
    resume_id: Option<Uuid>,
) -> Result<(), StatusRuleError> {
    match name {
        StatusName::Reject => {
            if reject_reason.is_none() {
                return Err(StatusRuleError::RejectReasonRequired);
            }
            if resume_id.is_some() {
                return Err(StatusRuleError::ResumeNotAllowedWithReject);
            }
        }
        StatusName::Resume => {
            if resume_id.is_none() {
                return Err(StatusRuleError::ResumeRefRequired);
            }
            if reject_reason.is_some() {
                return Err(StatusRuleError::RejectReasonNotAllowedWithResume);
            }
        }
        _ => {
            if reject_reason.is_some() || resume_id.is_some() {
                return Err(StatusRuleError::CompanionNotAllowed);
            }
        }
    }
    Ok(())
}

struct ParsedStatus {
    name: Option<StatusName>,
    reject_reason: Option<RejectReason>,
    resume_id: Option<Uuid>,
    date: Option<chrono::DateTime<chrono::Utc>>,
}

impl ParsedStatus {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.reject_reason.is_none()
            && self.resume_id.is_none()
            && self.date.is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_status(payload: &StatusPayload) -> Result<ParsedStatus, StatusRuleError> {
    let name = present(&payload.name)
        .map(|raw| raw.parse::<StatusName>().map_err(StatusRuleError::UnknownName))
        .transpose()?;
    let reject_reason = present(&payload.reject_reason)
        .map(|raw| {
            raw.parse::<RejectReason>()
                .map_err(StatusRuleError::UnknownRejectReason)
        })
        .transpose()?;
    let resume_id = present(&payload.resume_id)
        .map(|raw| Uuid::parse_str(raw).map_err(|_| StatusRuleError::InvalidResumeRef))
        .transpose()?;
    let date = present(&payload.date)
        .map(|raw| parse_status_date(raw).map_err(|_| StatusRuleError::InvalidDate))
        .transpose()?;

    Ok(ParsedStatus {
        name,
        reject_reason,
        resume_id,
        date,
    })
}

/// Validates a payload for a brand new status record.
pub fn resolve_new_status(payload: &StatusPayload) -> Result<StatusChange, StatusRuleError> {
    let parsed = parse_status(payload)?;
    let name = parsed.name.ok_or(StatusRuleError::NameRequired)?;
    validate_status_payload(name, parsed.reject_reason, parsed.resume_id)?;

    Ok(StatusChange {
        name,
        reject_reason: parsed.reject_reason,
        resume_id: parsed.resume_id,
        date: parsed.date,
    })
}

/// Merges a partial update into `current` and validates the result.
///
/// Omitted fields fall back to the current record, but companion fields only
/// survive while the status name stays the same.
pub fn resolve_status_update(
    current: &StatusRecord,
    payload: &StatusPayload,
) -> Result<StatusChange, StatusRuleError> {
    let parsed = parse_status(payload)?;
    if parsed.is_empty() {
        return Err(StatusRuleError::EmptyUpdate);
    }

    let name = parsed.name.unwrap_or(current.name);
    let keep_companions = name == current.name;
    let reject_reason = parsed
        .reject_reason
        .or(current.reject_reason.filter(|_| keep_companions));
    let resume_id = parsed
        .resume_id
        .or(current.resume_id.filter(|_| keep_companions));

    validate_status_payload(name, reject_reason, resume_id)?;

    Ok(StatusChange {
        name,
        reject_reason,
        resume_id,
        date: parsed.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn payload(name: Option<&str>, reason: Option<&str>, resume: Option<&str>) -> StatusPayload {
        StatusPayload {
            name: name.map(String::from),
            reject_reason: reason.map(String::from),
            resume_id: resume.map(String::from),
            date: None,
        }
    }

    fn record(name: StatusName) -> StatusRecord {
        let mut record = StatusRecord::initial(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap(),
        );
        record.name = name;
        match name {
            StatusName::Reject => record.reject_reason = Some(RejectReason::Experience),
            StatusName::Resume => record.resume_id = Some(Uuid::new_v4()),
            _ => {}
        }
        record
    }

    #[test]
    fn link_must_be_absolute_http_url() {
        assert!(validate_link("https://x.com/job").is_ok());
        assert!(validate_link("http://jobs.example.org/123?ref=a").is_ok());
        assert!(validate_link("not-a-url").is_err());
        assert!(validate_link("ftp://x.com/job").is_err());
        assert!(validate_link("mailto:hr@x.com").is_err());
    }

    #[test]
    fn reject_requires_reason_and_forbids_resume() {
        let resume = Uuid::new_v4();
        assert_eq!(
            validate_status_payload(StatusName::Reject, None, None),
            Err(StatusRuleError::RejectReasonRequired)
        );
        assert_eq!(
            validate_status_payload(StatusName::Reject, Some(RejectReason::Other), Some(resume)),
            Err(StatusRuleError::ResumeNotAllowedWithReject)
        );
        assert!(validate_status_payload(StatusName::Reject, Some(RejectReason::Other), None).is_ok());
    }

    #[test]
    fn resume_requires_reference_and_forbids_reason() {
        let resume = Uuid::new_v4();
        assert_eq!(
            validate_status_payload(StatusName::Resume, None, None),
            Err(StatusRuleError::ResumeRefRequired)
        );
        assert_eq!(
            validate_status_payload(StatusName::Resume, Some(RejectReason::English), Some(resume)),
            Err(StatusRuleError::RejectReasonNotAllowedWithResume)
        );
        assert!(validate_status_payload(StatusName::Resume, None, Some(resume)).is_ok());
    }

    #[test]
    fn plain_statuses_reject_any_companion() {
        for name in [
            StatusName::Saved,
            StatusName::Hr,
            StatusName::Test,
            StatusName::Tech,
            StatusName::Offer,
        ] {
            assert!(validate_status_payload(name, None, None).is_ok());
            assert_eq!(
                validate_status_payload(name, Some(RejectReason::Stopped), None),
                Err(StatusRuleError::CompanionNotAllowed)
            );
            assert_eq!(
                validate_status_payload(name, None, Some(Uuid::new_v4())),
                Err(StatusRuleError::CompanionNotAllowed)
            );
        }
    }

    #[test]
    fn new_status_parses_wire_values() {
        let change = resolve_new_status(&payload(Some("reject"), Some("tech_skills"), None)).unwrap();
        assert_eq!(change.name(), StatusName::Reject);
        assert_eq!(change.reject_reason, Some(RejectReason::TechSkills));

        assert_eq!(
            resolve_new_status(&payload(None, None, None)),
            Err(StatusRuleError::NameRequired)
        );
        assert_eq!(
            resolve_new_status(&payload(Some("interview"), None, None)),
            Err(StatusRuleError::UnknownName("interview".into()))
        );
        assert!(matches!(
            resolve_new_status(&payload(Some("reject"), Some("rude"), None)),
            Err(StatusRuleError::UnknownRejectReason(_))
        ));
        assert_eq!(
            resolve_new_status(&payload(Some("resume"), None, Some("abc"))),
            Err(StatusRuleError::InvalidResumeRef)
        );
    }

    #[test]
    fn blank_companion_counts_as_missing() {
        assert_eq!(
            resolve_new_status(&payload(Some("reject"), Some("  "), None)),
            Err(StatusRuleError::RejectReasonRequired)
        );
    }

    #[test]
    fn explicit_date_must_parse() {
        let mut p = payload(Some("hr"), None, None);
        p.date = Some("2024-12-30".into());
        let change = resolve_new_status(&p).unwrap();
        assert_eq!(change.date, Some(Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap()));

        p.date = Some("30/12/2024".into());
        assert_eq!(resolve_new_status(&p), Err(StatusRuleError::InvalidDate));
    }

    #[test]
    fn update_away_from_reject_clears_reason() {
        let current = record(StatusName::Reject);
        let change = resolve_status_update(&current, &payload(Some("hr"), None, None)).unwrap();
        let next = current.transition(change);
        assert_eq!(next.name, StatusName::Hr);
        assert_eq!(next.reject_reason, None);
        assert_eq!(next.date, current.date);
    }

    #[test]
    fn update_away_from_resume_clears_reference() {
        let current = record(StatusName::Resume);
        let change = resolve_status_update(&current, &payload(Some("tech"), None, None)).unwrap();
        assert_eq!(current.transition(change).resume_id, None);
    }

    #[test]
    fn update_keeps_companion_while_name_unchanged() {
        let current = record(StatusName::Reject);
        let change =
            resolve_status_update(&current, &payload(None, Some("no_answer"), None)).unwrap();
        assert_eq!(change.name(), StatusName::Reject);
        assert_eq!(change.reject_reason, Some(RejectReason::NoAnswer));

        let mut dated = payload(None, None, None);
        dated.date = Some("2025-02-01".into());
        let change = resolve_status_update(&current, &dated).unwrap();
        assert_eq!(change.reject_reason, Some(RejectReason::Experience));
    }

    #[test]
    fn update_into_reject_needs_reason() {
        let current = record(StatusName::Hr);
        assert_eq!(
            resolve_status_update(&current, &payload(Some("reject"), None, None)),
            Err(StatusRuleError::RejectReasonRequired)
        );
    }

    #[test]
    fn update_with_companion_for_plain_status_fails() {
        let current = record(StatusName::Reject);
        assert_eq!(
            resolve_status_update(&current, &payload(Some("offer"), Some("english"), None)),
            Err(StatusRuleError::CompanionNotAllowed)
        );
    }

    #[test]
    fn empty_update_is_rejected() {
        let current = record(StatusName::Saved);
        assert_eq!(
            resolve_status_update(&current, &payload(None, Some(""), None)),
            Err(StatusRuleError::EmptyUpdate)
        );
    }
}
