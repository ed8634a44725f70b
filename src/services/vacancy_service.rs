use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::{StatusDeletion, VacancyStore};
use crate::dto::status_dto::StatusPayload;
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::{Error, Result};
use crate::models::vacancy::Vacancy;
use crate::models::vacancy_status::{StatusName, StatusRecord};
use crate::services::status_service::{status_not_found, StatusService};
use crate::services::storage_failure;
use crate::utils::time::now;

/// A vacancy together with its status history, most recent status first.
#[derive(Debug, Clone)]
pub struct VacancyDetails {
    pub vacancy: Vacancy,
    pub statuses: Vec<StatusRecord>,
}

impl VacancyDetails {
    fn new(vacancy: Vacancy, mut statuses: Vec<StatusRecord>) -> Self {
        statuses.sort_by(|a, b| b.date.cmp(&a.date));
        Self { vacancy, statuses }
    }

    pub fn current_status(&self) -> Option<&StatusRecord> {
        self.statuses.first()
    }
}

#[derive(Clone, Copy)]
enum Access {
    Read,
    Write,
}

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn VacancyStore>,
    statuses: StatusService,
}

impl VacancyService {
    pub fn new(store: Arc<dyn VacancyStore>) -> Self {
        let statuses = StatusService::new(store.clone());
        Self { store, statuses }
    }

    pub async fn create(&self, user_id: Uuid, payload: CreateVacancyPayload) -> Result<VacancyDetails> {
        payload.validate()?;

        let created_at = now();
        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            user_id,
            title: payload.vacancy,
            link: payload.link.trim().to_string(),
            communication: payload.communication.filter(|v| !v.trim().is_empty()),
            company: payload.company,
            location: payload.location,
            work_type: payload.work_type,
            note: payload.note.filter(|v| !v.trim().is_empty()),
            is_archive: false,
            created_at,
            updated_at: created_at,
        };

        let initial = self.statuses.create_initial(&vacancy).await?;
        info!(vacancy_id = %vacancy.id, user_id = %user_id, "vacancy created");
        Ok(VacancyDetails::new(vacancy, vec![initial]))
    }

    pub async fn find_all(&self, user_id: Uuid) -> Result<Vec<VacancyDetails>> {
        let vacancies = self
            .store
            .list_vacancies(user_id)
            .await
            .map_err(storage_failure("fetch vacancies"))?;
        let ids: Vec<Uuid> = vacancies.iter().map(|v| v.id).collect();

        let mut by_vacancy: HashMap<Uuid, Vec<StatusRecord>> = HashMap::new();
        for status in self.statuses.history(&ids).await? {
            by_vacancy.entry(status.vacancy_id).or_default().push(status);
        }

        Ok(vacancies
            .into_iter()
            .map(|vacancy| {
                let statuses = by_vacancy.remove(&vacancy.id).unwrap_or_default();
                VacancyDetails::new(vacancy, statuses)
            })
            .collect())
    }

    pub async fn find_one(&self, id: Uuid, user_id: Uuid) -> Result<VacancyDetails> {
        let vacancy = self.load_owned(id, user_id, Access::Read).await?;
        self.with_history(vacancy).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        payload: UpdateVacancyPayload,
    ) -> Result<VacancyDetails> {
        let mut vacancy = self.load_owned(id, user_id, Access::Write).await?;

        if !payload.has_content() {
            return Err(Error::BadRequest(
                "at least one non-empty field required".to_string(),
            ));
        }
        payload.validate()?;

        payload.apply(&mut vacancy);
        vacancy.updated_at = now();
        self.store
            .update_vacancy(&vacancy)
            .await
            .map_err(storage_failure("update vacancy"))?;

        info!(vacancy_id = %id, user_id = %user_id, "vacancy updated");
        self.with_history(vacancy).await
    }

    /// Flips the archived flag; two calls restore the previous value.
    pub async fn archive(&self, id: Uuid, user_id: Uuid) -> Result<VacancyDetails> {
        let mut vacancy = self.load_owned(id, user_id, Access::Write).await?;
        vacancy.is_archive = !vacancy.is_archive;
        vacancy.updated_at = now();
        self.store
            .update_vacancy(&vacancy)
            .await
            .map_err(storage_failure("archive vacancy"))?;

        info!(vacancy_id = %id, archived = vacancy.is_archive, "vacancy archive toggled");
        self.with_history(vacancy).await
    }

    pub async fn remove(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        self.load_owned(id, user_id, Access::Write).await?;
        self.store
            .delete_vacancy(id)
            .await
            .map_err(storage_failure("delete vacancy"))?;
        info!(vacancy_id = %id, user_id = %user_id, "vacancy deleted");
        Ok(())
    }

    pub async fn add_status(
        &self,
        vacancy_id: Uuid,
        user_id: Uuid,
        payload: StatusPayload,
    ) -> Result<VacancyDetails> {
        let vacancy = self.load_owned(vacancy_id, user_id, Access::Write).await?;
        self.statuses.append(&vacancy, &payload).await?;
        self.with_history(vacancy).await
    }

    pub async fn update_status(
        &self,
        vacancy_id: Uuid,
        status_id: Uuid,
        user_id: Uuid,
        payload: StatusPayload,
    ) -> Result<VacancyDetails> {
        let vacancy = self.load_owned(vacancy_id, user_id, Access::Write).await?;
        self.statuses.replace(&vacancy, status_id, &payload).await?;
        self.with_history(vacancy).await
    }

    /// Deletes one status record, refusing to leave the vacancy without history.
    pub async fn delete_status(&self, vacancy_id: Uuid, status_id: Uuid, user_id: Uuid) -> Result<()> {
        let vacancy = self.load_owned(vacancy_id, user_id, Access::Write).await?;
        let target = self
            .statuses
            .history(&[vacancy.id])
            .await?
            .into_iter()
            .find(|s| s.id == status_id)
            .ok_or_else(|| status_not_found(status_id))?;

        match self.statuses.delete(&vacancy, target.id).await? {
            StatusDeletion::Deleted => {
                info!(vacancy_id = %vacancy_id, status_id = %status_id, "vacancy status deleted");
                Ok(())
            }
            StatusDeletion::LastRemaining => {
                let message = if target.name == StatusName::Saved {
                    "cannot delete the initial saved status"
                } else {
                    "cannot delete the only remaining status"
                };
                Err(Error::BadRequest(message.to_string()))
            }
            StatusDeletion::Missing => Err(status_not_found(status_id)),
        }
    }

    async fn load_owned(&self, id: Uuid, user_id: Uuid, access: Access) -> Result<Vacancy> {
        let vacancy = self
            .store
            .find_vacancy(id)
            .await
            .map_err(storage_failure("fetch vacancy"))?
            .ok_or_else(|| vacancy_not_found(id))?;

        if vacancy.is_owned_by(user_id) {
            return Ok(vacancy);
        }
        match access {
            Access::Read => Err(vacancy_not_found(id)),
            Access::Write => Err(Error::Forbidden(
                "You do not have permission to modify this vacancy".to_string(),
            )),
        }
    }

    async fn with_history(&self, vacancy: Vacancy) -> Result<VacancyDetails> {
        let statuses = self.statuses.history(&[vacancy.id]).await?;
        Ok(VacancyDetails::new(vacancy, statuses))
    }
}

fn vacancy_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Vacancy with ID {} not found", id))
}
