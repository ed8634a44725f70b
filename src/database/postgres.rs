use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::{StatusDeletion, VacancyStore};
use crate::error::Result;
use crate::models::vacancy::Vacancy;
use crate::models::vacancy_status::StatusRecord;

const VACANCY_COLUMNS: &str = "id, user_id, title, link, communication, company, location, work_type, note, is_archive, created_at, updated_at";

const STATUS_COLUMNS: &str = "id, vacancy_id, name, date, reject_reason, resume_id";

#[derive(Clone)]
pub struct PgVacancyStore {
    pool: PgPool,
}

impl PgVacancyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyStore for PgVacancyStore {
    async fn find_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vacancy)
    }

    async fn list_vacancies(&self, user_id: Uuid) -> Result<Vec<Vacancy>> {
        let query = format!(
            "SELECT {} FROM vacancies WHERE user_id = $1 ORDER BY created_at DESC",
            VACANCY_COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert_vacancy(&self, vacancy: &Vacancy, initial: &StatusRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO vacancies (
                id, user_id, title, link, communication, company, location,
                work_type, note, is_archive, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            "#,
        )
        .bind(vacancy.id)
        .bind(vacancy.user_id)
        .bind(&vacancy.title)
        .bind(&vacancy.link)
        .bind(&vacancy.communication)
        .bind(&vacancy.company)
        .bind(&vacancy.location)
        .bind(vacancy.work_type)
        .bind(&vacancy.note)
        .bind(vacancy.is_archive)
        .bind(vacancy.created_at)
        .bind(vacancy.updated_at)
        .execute(&mut *tx)
        .await?;

        insert_status_row(&mut *tx, initial).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE vacancies
            SET
                title = $2,
                link = $3,
                communication = $4,
                company = $5,
                location = $6,
                work_type = $7,
                note = $8,
                is_archive = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(vacancy.id)
        .bind(&vacancy.title)
        .bind(&vacancy.link)
        .bind(&vacancy.communication)
        .bind(&vacancy.company)
        .bind(&vacancy.location)
        .bind(vacancy.work_type)
        .bind(&vacancy.note)
        .bind(vacancy.is_archive)
        .bind(vacancy.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_statuses(&self, vacancy_ids: &[Uuid]) -> Result<Vec<StatusRecord>> {
        if vacancy_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM vacancy_statuses WHERE vacancy_id = ANY($1) ORDER BY date DESC",
            STATUS_COLUMNS
        );
        let items = sqlx::query_as::<_, StatusRecord>(&query)
            .bind(vacancy_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert_status(&self, status: &StatusRecord) -> Result<()> {
        insert_status_row(&self.pool, status).await
    }

    async fn update_status(&self, status: &StatusRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vacancy_statuses
            SET name = $2, date = $3, reject_reason = $4, resume_id = $5
            WHERE id = $1 AND vacancy_id = $6
            "#,
        )
        .bind(status.id)
        .bind(status.name)
        .bind(status.date)
        .bind(status.reject_reason)
        .bind(status.resume_id)
        .bind(status.vacancy_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_status(&self, vacancy_id: Uuid, status_id: Uuid) -> Result<StatusDeletion> {
        let mut tx = self.pool.begin().await?;

        // Serializes deletes on the same vacancy until commit.
        sqlx::query("SELECT id FROM vacancies WHERE id = $1 FOR UPDATE")
            .bind(vacancy_id)
            .fetch_optional(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM vacancy_statuses WHERE id = $1 AND vacancy_id = $2")
            .bind(status_id)
            .bind(vacancy_id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Ok(StatusDeletion::Missing);
        }

        let remaining = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vacancy_statuses WHERE vacancy_id = $1",
        )
        .bind(vacancy_id)
        .fetch_one(&mut *tx)
        .await?;
        if remaining == 0 {
            tx.rollback().await?;
            return Ok(StatusDeletion::LastRemaining);
        }

        tx.commit().await?;
        Ok(StatusDeletion::Deleted)
    }

    async fn resume_owned_by(&self, resume_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM resumes WHERE id = $1 AND user_id = $2)",
        )
        .bind(resume_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

async fn insert_status_row<'e, E>(executor: E, status: &StatusRecord) -> Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO vacancy_statuses (id, vacancy_id, name, date, reject_reason, resume_id)
        VALUES ($1,$2,$3,$4,$5,$6)
        "#,
    )
    .bind(status.id)
    .bind(status.vacancy_id)
    .bind(status.name)
    .bind(status.date)
    .bind(status.reject_reason)
    .bind(status.resume_id)
    .execute(executor)
    .await?;
    Ok(())
}
