use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ProjectRepository {
    async fn get_projects(&self) -> Result<Vec<DatabaseProject>, RepositoryError>;
    async fn get_project(&self, id: i32) -> Result<Option<DatabaseProject>, RepositoryError>;
    async fn insert_project(&self, project: &NewDatabaseProject) -> Result<i32, RepositoryError>;
    async fn update_project(
        &self,
        id: i32,
        project: &NewDatabaseProject,
    ) -> Result<u64, RepositoryError>;
    async fn delete_project(&self, id: i32) -> Result<u64, RepositoryError>;
}

pub struct ProjectRepositoryImpl {
    pool: PgPool,
}

impl ProjectRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseProject {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub folio: Option<String>,
}

pub struct NewDatabaseProject {
    pub name: String,
    pub category: String,
    pub folio: Option<String>,
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn get_projects(&self) -> Result<Vec<DatabaseProject>, RepositoryError> {
        let projects = sqlx::query_as::<_, DatabaseProject>(
            r#"
            SELECT id, name, category, folio
            FROM projects
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project(&self, id: i32) -> Result<Option<DatabaseProject>, RepositoryError> {
        let project = sqlx::query_as::<_, DatabaseProject>(
            r#"
            SELECT id, name, category, folio
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn insert_project(&self, project: &NewDatabaseProject) -> Result<i32, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (name, category, folio)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&project.name)
        .bind(&project.category)
        .bind(&project.folio)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_project(
        &self,
        id: i32,
        project: &NewDatabaseProject,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $1, category = $2, folio = $3
            WHERE id = $4
            "#,
        )
        .bind(&project.name)
        .bind(&project.category)
        .bind(&project.folio)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_project(&self, id: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
