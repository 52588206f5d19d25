use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ResourceRepository {
    async fn get_resources(&self) -> Result<Vec<DatabaseResource>, RepositoryError>;
    async fn get_resource(&self, id: i32) -> Result<Option<DatabaseResource>, RepositoryError>;
    async fn insert_resource(&self, resource: &NewDatabaseResource) -> Result<i32, RepositoryError>;
    /// Returns the number of rows updated.
    async fn update_resource(
        &self,
        id: i32,
        resource: &NewDatabaseResource,
    ) -> Result<u64, RepositoryError>;
    async fn delete_resource(&self, id: i32) -> Result<u64, RepositoryError>;
}

pub struct ResourceRepositoryImpl {
    pool: PgPool,
}

impl ResourceRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseResource {
    pub id: i32,
    pub name: String,
    pub project_percent: f64,
    pub maintenance_percent: f64,
    pub total_hours: f64,
}

pub struct NewDatabaseResource {
    pub name: String,
    pub project_percent: f64,
    pub maintenance_percent: f64,
    pub total_hours: f64,
}

#[async_trait]
impl ResourceRepository for ResourceRepositoryImpl {
    async fn get_resources(&self) -> Result<Vec<DatabaseResource>, RepositoryError> {
        let resources = sqlx::query_as::<_, DatabaseResource>(
            r#"
            SELECT id, name, project_percent, maintenance_percent, total_hours
            FROM resources
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(resources)
    }

    async fn get_resource(&self, id: i32) -> Result<Option<DatabaseResource>, RepositoryError> {
        let resource = sqlx::query_as::<_, DatabaseResource>(
            r#"
            SELECT id, name, project_percent, maintenance_percent, total_hours
            FROM resources
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resource)
    }

    async fn insert_resource(&self, resource: &NewDatabaseResource) -> Result<i32, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO resources (name, project_percent, maintenance_percent, total_hours)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&resource.name)
        .bind(resource.project_percent)
        .bind(resource.maintenance_percent)
        .bind(resource.total_hours)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_resource(
        &self,
        id: i32,
        resource: &NewDatabaseResource,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE resources
            SET name = $1, project_percent = $2, maintenance_percent = $3, total_hours = $4
            WHERE id = $5
            "#,
        )
        .bind(&resource.name)
        .bind(resource.project_percent)
        .bind(resource.maintenance_percent)
        .bind(resource.total_hours)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_resource(&self, id: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
