//! PostgreSQL implementation of the AllocationStore port.

use std::sync::Arc;

use async_trait::async_trait;
use capacity::{
    HourEntryWrite, MonthYear, NewProject, NewResource, Project, ProjectId, RawHourEntry,
    RawResource, ResourceId,
};
use itertools::Itertools;

use super::conversions::{
    to_db_hour_entry, to_db_period, to_db_project, to_db_resource, to_domain_project,
    to_raw_hour_entry, to_raw_resource,
};
use crate::domain::{ports::outbound::AllocationStore, AllocationError};
use crate::repositories::{
    HourEntryRepository, HourEntryRepositoryImpl, ProjectRepository, ProjectRepositoryImpl,
    RepositoryError, ResourceRepository, ResourceRepositoryImpl,
};

/// Adapter that implements AllocationStore using PostgreSQL.
pub struct PostgresAllocationStore<
    R = ResourceRepositoryImpl,
    P = ProjectRepositoryImpl,
    H = HourEntryRepositoryImpl,
> {
    resources: Arc<R>,
    projects: Arc<P>,
    hour_entries: Arc<H>,
}

impl<R, P, H> PostgresAllocationStore<R, P, H> {
    pub fn new(resources: Arc<R>, projects: Arc<P>, hour_entries: Arc<H>) -> Self {
        Self {
            resources,
            projects,
            hour_entries,
        }
    }
}

impl From<RepositoryError> for AllocationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConstraintViolation(msg) => AllocationError::constraint(msg),
            RepositoryError::DatabaseError(e) => {
                tracing::error!(error = %e, "database error");
                AllocationError::storage(e.to_string())
            }
        }
    }
}

#[async_trait]
impl<R, P, H> AllocationStore for PostgresAllocationStore<R, P, H>
where
    R: ResourceRepository + Send + Sync + 'static,
    P: ProjectRepository + Send + Sync + 'static,
    H: HourEntryRepository + Send + Sync + 'static,
{
    async fn fetch_resources(&self) -> Result<Vec<RawResource>, AllocationError> {
        let rows = self.resources.get_resources().await?;
        Ok(rows.into_iter().map(to_raw_resource).collect())
    }

    async fn fetch_resource(
        &self,
        id: ResourceId,
    ) -> Result<Option<RawResource>, AllocationError> {
        let row = self.resources.get_resource(id.as_i32()).await?;
        Ok(row.map(to_raw_resource))
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceId, AllocationError> {
        let id = self
            .resources
            .insert_resource(&to_db_resource(resource))
            .await?;
        Ok(ResourceId::new(id))
    }

    async fn update_resource(
        &self,
        id: ResourceId,
        resource: &NewResource,
    ) -> Result<bool, AllocationError> {
        let updated = self
            .resources
            .update_resource(id.as_i32(), &to_db_resource(resource))
            .await?;
        Ok(updated > 0)
    }

    async fn delete_resource(&self, id: ResourceId) -> Result<bool, AllocationError> {
        let deleted = self.resources.delete_resource(id.as_i32()).await?;
        Ok(deleted > 0)
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, AllocationError> {
        let rows = self.projects.get_projects().await?;

        // One bad row should not hide the whole catalogue.
        let (projects, failures): (Vec<_>, Vec<_>) =
            rows.into_iter().map(to_domain_project).partition_result();
        for err in failures {
            tracing::warn!(error = %err, "skipping project");
        }

        Ok(projects)
    }

    async fn fetch_project(&self, id: ProjectId) -> Result<Option<Project>, AllocationError> {
        self.projects
            .get_project(id.as_i32())
            .await?
            .map(to_domain_project)
            .transpose()
    }

    async fn insert_project(&self, project: &NewProject) -> Result<ProjectId, AllocationError> {
        let id = self.projects.insert_project(&to_db_project(project)).await?;
        Ok(ProjectId::new(id))
    }

    async fn update_project(
        &self,
        id: ProjectId,
        project: &NewProject,
    ) -> Result<bool, AllocationError> {
        let updated = self
            .projects
            .update_project(id.as_i32(), &to_db_project(project))
            .await?;
        Ok(updated > 0)
    }

    async fn delete_project(&self, id: ProjectId) -> Result<bool, AllocationError> {
        let deleted = self.projects.delete_project(id.as_i32()).await?;
        Ok(deleted > 0)
    }

    async fn fetch_hour_entries(
        &self,
        resource_id: ResourceId,
        months: &[MonthYear],
    ) -> Result<Vec<RawHourEntry>, AllocationError> {
        if months.is_empty() {
            return Ok(Vec::new());
        }

        let periods: Vec<_> = months.iter().map(to_db_period).collect();
        let rows = self
            .hour_entries
            .get_entries_for_periods(resource_id.as_i32(), &periods)
            .await?;

        Ok(rows.into_iter().map(to_raw_hour_entry).collect())
    }

    async fn fetch_month_entries(
        &self,
        month: MonthYear,
    ) -> Result<Vec<RawHourEntry>, AllocationError> {
        let rows = self
            .hour_entries
            .get_entries_for_month(&to_db_period(&month))
            .await?;

        Ok(rows.into_iter().map(to_raw_hour_entry).collect())
    }

    async fn upsert_hour_entries(&self, writes: &[HourEntryWrite]) -> Result<u64, AllocationError> {
        let entries: Vec<_> = writes.iter().map(to_db_hour_entry).collect();
        Ok(self.hour_entries.upsert_entries(&entries).await?)
    }

    async fn delete_hour_entries(
        &self,
        resource_id: ResourceId,
        project_id: ProjectId,
        months: Option<&[MonthYear]>,
    ) -> Result<u64, AllocationError> {
        let periods: Option<Vec<_>> = months.map(|ms| ms.iter().map(to_db_period).collect());

        Ok(self
            .hour_entries
            .delete_entries(
                resource_id.as_i32(),
                project_id.as_i32(),
                periods.as_deref(),
            )
            .await?)
    }

    async fn insert_hour_entry(&self, write: &HourEntryWrite) -> Result<(), AllocationError> {
        Ok(self
            .hour_entries
            .insert_entry(&to_db_hour_entry(write))
            .await?)
    }
}
