use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::{StatusDeletion, VacancyStore};
use crate::dto::status_dto::StatusPayload;
use crate::error::{Error, Result};
use crate::models::vacancy::Vacancy;
use crate::models::vacancy_status::{StatusChange, StatusRecord};
use crate::services::storage_failure;
use crate::utils::time::now;
use crate::utils::validation::{resolve_new_status, resolve_status_update};

/// Status history persistence for a single vacancy.
///
/// Every method assumes the caller already proved the acting user owns
/// `vacancy`, so `vacancy.user_id` is also the user resumes are checked against.
#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn VacancyStore>,
}

impl StatusService {
    pub fn new(store: Arc<dyn VacancyStore>) -> Self {
        Self { store }
    }

    /// History of the given vacancies, most recent first.
    pub async fn history(&self, vacancy_ids: &[Uuid]) -> Result<Vec<StatusRecord>> {
        self.store
            .list_statuses(vacancy_ids)
            .await
            .map_err(storage_failure("load vacancy statuses"))
    }

    /// Persists `vacancy` together with its initial `saved` record.
    pub async fn create_initial(&self, vacancy: &Vacancy) -> Result<StatusRecord> {
        let initial = StatusRecord::initial(vacancy.id, vacancy.created_at);
        self.store
            .insert_vacancy(vacancy, &initial)
            .await
            .map_err(storage_failure("create vacancy"))?;
        Ok(initial)
    }

    pub async fn append(&self, vacancy: &Vacancy, payload: &StatusPayload) -> Result<StatusRecord> {
        let change = resolve_new_status(payload)?;
        self.ensure_resume_owned(&change, vacancy.user_id).await?;

        let record = StatusRecord::from_change(vacancy.id, change, now());
        self.store
            .insert_status(&record)
            .await
            .map_err(storage_failure("add vacancy status"))?;

        info!(
            vacancy_id = %vacancy.id,
            status_id = %record.id,
            status = %record.name,
            "vacancy status added"
        );
        Ok(record)
    }

    pub async fn replace(
        &self,
        vacancy: &Vacancy,
        status_id: Uuid,
        payload: &StatusPayload,
    ) -> Result<StatusRecord> {
        let current = self
            .history(&[vacancy.id])
            .await?
            .into_iter()
            .find(|s| s.id == status_id)
            .ok_or_else(|| status_not_found(status_id))?;

        let change = resolve_status_update(&current, payload)?;
        self.ensure_resume_owned(&change, vacancy.user_id).await?;

        let next = current.transition(change);
        let updated = self
            .store
            .update_status(&next)
            .await
            .map_err(storage_failure("update vacancy status"))?;
        if !updated {
            return Err(status_not_found(status_id));
        }

        info!(
            vacancy_id = %vacancy.id,
            status_id = %next.id,
            from = %current.name,
            to = %next.name,
            "vacancy status updated"
        );
        Ok(next)
    }

    /// Removes a record unless it is the last one left on `vacancy`.
    pub async fn delete(&self, vacancy: &Vacancy, status_id: Uuid) -> Result<StatusDeletion> {
        self.store
            .delete_status(vacancy.id, status_id)
            .await
            .map_err(storage_failure("delete vacancy status"))
    }

    async fn ensure_resume_owned(&self, change: &StatusChange, owner_id: Uuid) -> Result<()> {
        let Some(resume_id) = change.resume_id() else {
            return Ok(());
        };
        let owned = self
            .store
            .resume_owned_by(resume_id, owner_id)
            .await
            .map_err(storage_failure("look up resume"))?;
        if !owned {
            return Err(Error::NotFound(
                "resume not found or not owned by caller".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn status_not_found(status_id: Uuid) -> Error {
    Error::NotFound(format!("Status with ID {} not found", status_id))
}
