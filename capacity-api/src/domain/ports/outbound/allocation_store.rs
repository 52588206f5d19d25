//! Allocation storage port (outbound).
//!
//! Defines the interface the service needs from persistent storage. Rows
//! come back raw; normalization happens in the service.

use async_trait::async_trait;
use capacity::{
    HourEntryWrite, MonthYear, NewProject, NewResource, Project, ProjectId, RawHourEntry,
    RawResource, ResourceId,
};

use crate::domain::AllocationError;

/// Outbound port for resources, projects and hour entries.
///
/// Referential-integrity failures must be reported as
/// [`AllocationError::ConstraintViolation`] so callers can tell them apart
/// from transient failures.
#[async_trait]
pub trait AllocationStore: Send + Sync + 'static {
    async fn fetch_resources(&self) -> Result<Vec<RawResource>, AllocationError>;

    async fn fetch_resource(&self, id: ResourceId)
        -> Result<Option<RawResource>, AllocationError>;

    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceId, AllocationError>;

    /// Returns `false` when no resource has the given id.
    async fn update_resource(
        &self,
        id: ResourceId,
        resource: &NewResource,
    ) -> Result<bool, AllocationError>;

    /// Returns `false` when no resource has the given id.
    async fn delete_resource(&self, id: ResourceId) -> Result<bool, AllocationError>;

    /// All projects, ordered by name.
    async fn fetch_projects(&self) -> Result<Vec<Project>, AllocationError>;

    async fn fetch_project(&self, id: ProjectId) -> Result<Option<Project>, AllocationError>;

    async fn insert_project(&self, project: &NewProject) -> Result<ProjectId, AllocationError>;

    async fn update_project(
        &self,
        id: ProjectId,
        project: &NewProject,
    ) -> Result<bool, AllocationError>;

    async fn delete_project(&self, id: ProjectId) -> Result<bool, AllocationError>;

    /// Hour entries of one resource in the given months, joined with their
    /// project's name, category and folio.
    async fn fetch_hour_entries(
        &self,
        resource_id: ResourceId,
        months: &[MonthYear],
    ) -> Result<Vec<RawHourEntry>, AllocationError>;

    /// Hour entries of every resource for a single month.
    async fn fetch_month_entries(
        &self,
        month: MonthYear,
    ) -> Result<Vec<RawHourEntry>, AllocationError>;

    /// Inserts or replaces entries by composite key. Returns rows written.
    async fn upsert_hour_entries(&self, writes: &[HourEntryWrite]) -> Result<u64, AllocationError>;

    /// Deletes a resource's entries for a project, optionally limited to
    /// `months`. Returns rows deleted.
    async fn delete_hour_entries(
        &self,
        resource_id: ResourceId,
        project_id: ProjectId,
        months: Option<&[MonthYear]>,
    ) -> Result<u64, AllocationError>;

    /// Plain insert; an existing key is a constraint violation.
    async fn insert_hour_entry(&self, write: &HourEntryWrite) -> Result<(), AllocationError>;
}
