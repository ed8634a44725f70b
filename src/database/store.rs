use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::vacancy::Vacancy;
use crate::models::vacancy_status::StatusRecord;

/// Outcome of a guarded status delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDeletion {
    Deleted,
    /// The record is the vacancy's last one and was kept.
    LastRemaining,
    /// No record with that id under the vacancy.
    Missing,
}

/// Persistence seam for vacancies and their status history.
///
/// Callers prove ownership before invoking any of these; the store itself is
/// scoped only by ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyStore: Send + Sync {
    async fn find_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>>;

    /// Vacancies of `user_id`, newest first.
    async fn list_vacancies(&self, user_id: Uuid) -> Result<Vec<Vacancy>>;

    /// Inserts the vacancy and its first status atomically: either both rows
    /// exist afterwards or neither does.
    async fn insert_vacancy(&self, vacancy: &Vacancy, initial: &StatusRecord) -> Result<()>;

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<()>;

    /// Removes the vacancy and, by cascade, every status it owns.
    async fn delete_vacancy(&self, id: Uuid) -> Result<()>;

    /// Status records of the given vacancies, most recent date first.
    async fn list_statuses(&self, vacancy_ids: &[Uuid]) -> Result<Vec<StatusRecord>>;

    async fn insert_status(&self, status: &StatusRecord) -> Result<()>;

    /// Returns `false` when the record no longer exists under its vacancy.
    async fn update_status(&self, status: &StatusRecord) -> Result<bool>;

    /// Deletes the record unless it is the vacancy's last one. The count and
    /// the delete happen atomically, so concurrent deletes cannot empty a
    /// vacancy's history.
    async fn delete_status(&self, vacancy_id: Uuid, status_id: Uuid) -> Result<StatusDeletion>;

    async fn resume_owned_by(&self, resume_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn ping(&self) -> Result<()>;
}
