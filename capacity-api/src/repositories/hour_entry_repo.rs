use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait HourEntryRepository {
    /// Entries of one resource whose (year, month) is in `periods`.
    async fn get_entries_for_periods(
        &self,
        resource_id: i32,
        periods: &[DatabasePeriod],
    ) -> Result<Vec<DatabaseHourEntry>, RepositoryError>;
    async fn get_entries_for_month(
        &self,
        period: &DatabasePeriod,
    ) -> Result<Vec<DatabaseHourEntry>, RepositoryError>;
    /// Insert-or-replace on (resource_id, project_id, year, month).
    async fn upsert_entries(&self, entries: &[NewDatabaseHourEntry]) -> Result<u64, RepositoryError>;
    async fn delete_entries(
        &self,
        resource_id: i32,
        project_id: i32,
        periods: Option<&[DatabasePeriod]>,
    ) -> Result<u64, RepositoryError>;
    async fn insert_entry(&self, entry: &NewDatabaseHourEntry) -> Result<(), RepositoryError>;
}

pub struct HourEntryRepositoryImpl {
    pool: PgPool,
}

impl HourEntryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// An hour entry joined with its project's columns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseHourEntry {
    pub resource_id: i32,
    pub project_id: i32,
    pub month: i16,
    pub year: i32,
    pub hours: f64,
    pub project_name: Option<String>,
    pub project_category: Option<String>,
    pub project_folio: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct DatabasePeriod {
    pub year: i32,
    pub month: i16,
}

#[derive(Debug, Clone, Copy)]
pub struct NewDatabaseHourEntry {
    pub resource_id: i32,
    pub project_id: i32,
    pub year: i32,
    pub month: i16,
    pub hours: f64,
}

fn split_periods(periods: &[DatabasePeriod]) -> (Vec<i32>, Vec<i16>) {
    periods.iter().map(|p| (p.year, p.month)).unzip()
}

#[async_trait]
impl HourEntryRepository for HourEntryRepositoryImpl {
    async fn get_entries_for_periods(
        &self,
        resource_id: i32,
        periods: &[DatabasePeriod],
    ) -> Result<Vec<DatabaseHourEntry>, RepositoryError> {
        let (years, months) = split_periods(periods);

        let entries = sqlx::query_as::<_, DatabaseHourEntry>(
            r#"
            SELECT h.resource_id, h.project_id, h.month, h.year, h.hours,
                   p.name AS project_name, p.category AS project_category, p.folio AS project_folio
            FROM hour_entries h
            LEFT JOIN projects p ON p.id = h.project_id
            WHERE h.resource_id = $1
              AND (h.year, h.month) IN (SELECT * FROM UNNEST($2::int[], $3::smallint[]))
            ORDER BY h.year, h.month, h.project_id
            "#,
        )
        .bind(resource_id)
        .bind(years)
        .bind(months)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_entries_for_month(
        &self,
        period: &DatabasePeriod,
    ) -> Result<Vec<DatabaseHourEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, DatabaseHourEntry>(
            r#"
            SELECT h.resource_id, h.project_id, h.month, h.year, h.hours,
                   p.name AS project_name, p.category AS project_category, p.folio AS project_folio
            FROM hour_entries h
            LEFT JOIN projects p ON p.id = h.project_id
            WHERE h.year = $1 AND h.month = $2
            ORDER BY h.resource_id, h.project_id
            "#,
        )
        .bind(period.year)
        .bind(period.month)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn upsert_entries(&self, entries: &[NewDatabaseHourEntry]) -> Result<u64, RepositoryError> {
        if entries.is_empty() {
            return Ok(0);
        }

        let resource_ids: Vec<i32> = entries.iter().map(|e| e.resource_id).collect();
        let project_ids: Vec<i32> = entries.iter().map(|e| e.project_id).collect();
        let years: Vec<i32> = entries.iter().map(|e| e.year).collect();
        let months: Vec<i16> = entries.iter().map(|e| e.month).collect();
        let hours: Vec<f64> = entries.iter().map(|e| e.hours).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO hour_entries (resource_id, project_id, year, month, hours)
            SELECT * FROM UNNEST($1::int[], $2::int[], $3::int[], $4::smallint[], $5::float8[])
            ON CONFLICT (resource_id, project_id, year, month)
            DO UPDATE SET hours = EXCLUDED.hours, updated_at = NOW()
            "#,
        )
        .bind(resource_ids)
        .bind(project_ids)
        .bind(years)
        .bind(months)
        .bind(hours)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_entries(
        &self,
        resource_id: i32,
        project_id: i32,
        periods: Option<&[DatabasePeriod]>,
    ) -> Result<u64, RepositoryError> {
        let result = match periods {
            Some(periods) => {
                let (years, months) = split_periods(periods);
                sqlx::query(
                    r#"
                    DELETE FROM hour_entries
                    WHERE resource_id = $1 AND project_id = $2
                      AND (year, month) IN (SELECT * FROM UNNEST($3::int[], $4::smallint[]))
                    "#,
                )
                .bind(resource_id)
                .bind(project_id)
                .bind(years)
                .bind(months)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    DELETE FROM hour_entries
                    WHERE resource_id = $1 AND project_id = $2
                    "#,
                )
                .bind(resource_id)
                .bind(project_id)
                .execute(&self.pool)
                .await?
            }
        };

        Ok(result.rows_affected())
    }

    async fn insert_entry(&self, entry: &NewDatabaseHourEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO hour_entries (resource_id, project_id, year, month, hours)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.resource_id)
        .bind(entry.project_id)
        .bind(entry.year)
        .bind(entry.month)
        .bind(entry.hours)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
