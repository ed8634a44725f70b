use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::{StatusDeletion, VacancyStore};
use crate::error::Result;
use crate::models::resume::Resume;
use crate::models::vacancy::Vacancy;
use crate::models::vacancy_status::StatusRecord;

#[derive(Default)]
struct Tables {
    vacancies: HashMap<Uuid, Vacancy>,
    statuses: HashMap<Uuid, StatusRecord>,
    resumes: HashMap<Uuid, Resume>,
}

/// Process-local store used by tests and by DB-less local runs.
///
/// A single lock guards all tables, so multi-row writes are atomic and vacancy
/// deletion cascades to statuses the same way the Postgres foreign key does.
#[derive(Clone, Default)]
pub struct MemoryVacancyStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryVacancyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resume so `resume` statuses can reference it.
    pub async fn insert_resume(&self, resume: Resume) {
        self.tables.write().await.resumes.insert(resume.id, resume);
    }

    pub async fn status_count(&self, vacancy_id: Uuid) -> usize {
        self.tables
            .read()
            .await
            .statuses
            .values()
            .filter(|s| s.vacancy_id == vacancy_id)
            .count()
    }
}

#[async_trait]
impl VacancyStore for MemoryVacancyStore {
    async fn find_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>> {
        Ok(self.tables.read().await.vacancies.get(&id).cloned())
    }

    async fn list_vacancies(&self, user_id: Uuid) -> Result<Vec<Vacancy>> {
        let tables = self.tables.read().await;
        let mut items: Vec<Vacancy> = tables
            .vacancies
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn insert_vacancy(&self, vacancy: &Vacancy, initial: &StatusRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.vacancies.insert(vacancy.id, vacancy.clone());
        tables.statuses.insert(initial.id, initial.clone());
        Ok(())
    }

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(slot) = tables.vacancies.get_mut(&vacancy.id) {
            *slot = vacancy.clone();
        }
        Ok(())
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.vacancies.remove(&id);
        tables.statuses.retain(|_, s| s.vacancy_id != id);
        Ok(())
    }

    async fn list_statuses(&self, vacancy_ids: &[Uuid]) -> Result<Vec<StatusRecord>> {
        let tables = self.tables.read().await;
        let mut items: Vec<StatusRecord> = tables
            .statuses
            .values()
            .filter(|s| vacancy_ids.contains(&s.vacancy_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }

    async fn insert_status(&self, status: &StatusRecord) -> Result<()> {
        self.tables
            .write()
            .await
            .statuses
            .insert(status.id, status.clone());
        Ok(())
    }

    async fn update_status(&self, status: &StatusRecord) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.statuses.get_mut(&status.id) {
            Some(slot) if slot.vacancy_id == status.vacancy_id => {
                *slot = status.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_status(&self, vacancy_id: Uuid, status_id: Uuid) -> Result<StatusDeletion> {
        let mut tables = self.tables.write().await;
        let belongs = tables
            .statuses
            .get(&status_id)
            .is_some_and(|s| s.vacancy_id == vacancy_id);
        if !belongs {
            return Ok(StatusDeletion::Missing);
        }
        let remaining = tables
            .statuses
            .values()
            .filter(|s| s.vacancy_id == vacancy_id)
            .count();
        if remaining <= 1 {
            return Ok(StatusDeletion::LastRemaining);
        }
        tables.statuses.remove(&status_id);
        Ok(StatusDeletion::Deleted)
    }

    async fn resume_owned_by(&self, resume_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .resumes
            .get(&resume_id)
            .is_some_and(|r| r.user_id == user_id))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::WorkType;
    use chrono::Utc;

    fn vacancy(user_id: Uuid) -> Vacancy {
        let now = Utc::now();
        Vacancy {
            id: Uuid::new_v4(),
            user_id,
            title: "Dev".into(),
            link: "https://x.com/job".into(),
            communication: None,
            company: "Acme".into(),
            location: "Remote".into(),
            work_type: WorkType::Remote,
            note: None,
            is_archive: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn deleting_vacancy_cascades_to_statuses() {
        let store = MemoryVacancyStore::new();
        let v = vacancy(Uuid::new_v4());
        let initial = StatusRecord::initial(v.id, Utc::now());
        store.insert_vacancy(&v, &initial).await.unwrap();
        assert_eq!(store.status_count(v.id).await, 1);

        store.delete_vacancy(v.id).await.unwrap();
        assert!(store.find_vacancy(v.id).await.unwrap().is_none());
        assert_eq!(store.status_count(v.id).await, 0);
    }

    #[tokio::test]
    async fn guarded_delete_keeps_last_status() {
        let store = MemoryVacancyStore::new();
        let v = vacancy(Uuid::new_v4());
        let initial = StatusRecord::initial(v.id, Utc::now());
        store.insert_vacancy(&v, &initial).await.unwrap();

        assert_eq!(
            store.delete_status(v.id, initial.id).await.unwrap(),
            StatusDeletion::LastRemaining
        );
        assert_eq!(
            store.delete_status(Uuid::new_v4(), initial.id).await.unwrap(),
            StatusDeletion::Missing
        );

        let mut hr = StatusRecord::initial(v.id, Utc::now());
        hr.name = crate::models::vacancy_status::StatusName::Hr;
        store.insert_status(&hr).await.unwrap();
        assert_eq!(
            store.delete_status(v.id, initial.id).await.unwrap(),
            StatusDeletion::Deleted
        );
        assert_eq!(store.status_count(v.id).await, 1);
    }

    #[tokio::test]
    async fn update_of_missing_status_reports_false() {
        let store = MemoryVacancyStore::new();
        let v = vacancy(Uuid::new_v4());
        let initial = StatusRecord::initial(v.id, Utc::now());
        store.insert_vacancy(&v, &initial).await.unwrap();

        assert!(store.update_status(&initial).await.unwrap());
        let stray = StatusRecord::initial(v.id, Utc::now());
        assert!(!store.update_status(&stray).await.unwrap());
    }

    #[tokio::test]
    async fn resume_ownership_is_checked() {
        let store = MemoryVacancyStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let resume = Resume {
            id: Uuid::new_v4(),
            user_id: owner,
            name: "Backend CV".into(),
            link: "https://cv.example.com/a".into(),
            created_at: now,
            updated_at: now,
        };
        store.insert_resume(resume.clone()).await;

        assert!(store.resume_owned_by(resume.id, owner).await.unwrap());
        assert!(!store.resume_owned_by(resume.id, Uuid::new_v4()).await.unwrap());
        assert!(!store.resume_owned_by(Uuid::new_v4(), owner).await.unwrap());
    }
}
