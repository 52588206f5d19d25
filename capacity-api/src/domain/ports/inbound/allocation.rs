use async_trait::async_trait;
use capacity::{
    HourEntryWrite, MonthYear, MonthlyReconciliation, NewProject, NewResource, Project, ProjectId,
    Resource, ResourceId, Window,
};

use crate::domain::{
    models::{AssignmentRow, ResourceMonthOverview, SaveAssignmentRequest, SavedAssignment},
    AllocationError,
};

/// Inbound port for allocation operations.
///
/// This trait defines the use cases that HTTP handlers can invoke.
#[async_trait]
pub trait AllocationService: Send + Sync + 'static {
    // ========================================================================
    // Resources
    // ========================================================================

    async fn list_resources(&self) -> Result<Vec<Resource>, AllocationError>;

    async fn get_resource(&self, id: ResourceId) -> Result<Resource, AllocationError>;

    async fn create_resource(&self, input: NewResource) -> Result<Resource, AllocationError>;

    async fn update_resource(
        &self,
        id: ResourceId,
        input: NewResource,
    ) -> Result<Resource, AllocationError>;

    /// Fails with a constraint violation while hour entries reference it.
    async fn delete_resource(&self, id: ResourceId) -> Result<(), AllocationError>;

    // ========================================================================
    // Projects
    // ========================================================================

    async fn list_projects(&self) -> Result<Vec<Project>, AllocationError>;

    async fn create_project(&self, input: NewProject) -> Result<Project, AllocationError>;

    async fn update_project(
        &self,
        id: ProjectId,
        input: NewProject,
    ) -> Result<Project, AllocationError>;

    /// Fails with a constraint violation while hour entries reference it.
    async fn delete_project(&self, id: ProjectId) -> Result<(), AllocationError>;

    // ========================================================================
    // Hour entries
    // ========================================================================

    /// Per-project hours of a resource across the window.
    async fn get_assignments(
        &self,
        resource_id: ResourceId,
        window: &Window,
    ) -> Result<Vec<AssignmentRow>, AllocationError>;

    /// Saves one assignment row.
    ///
    /// Orchestrates: upsert the new hours → if the project changed and rows
    /// were written, delete the previous project's hours in the window.
    async fn save_assignment(
        &self,
        resource_id: ResourceId,
        request: &SaveAssignmentRequest,
        window: &Window,
    ) -> Result<SavedAssignment, AllocationError>;

    /// Deletes every hour entry of a project for the resource.
    async fn delete_assignment(
        &self,
        resource_id: ResourceId,
        project_id: ProjectId,
    ) -> Result<u64, AllocationError>;

    /// Single insert without upsert semantics.
    async fn record_hour_entry(&self, write: &HourEntryWrite) -> Result<(), AllocationError>;

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Assigned hours against capacity for each window month.
    async fn get_summary(
        &self,
        resource_id: ResourceId,
        window: &Window,
    ) -> Result<(Resource, Vec<MonthlyReconciliation>), AllocationError>;

    /// Every resource's assigned hours and statuses for one month.
    async fn get_month_overview(
        &self,
        month: MonthYear,
    ) -> Result<Vec<ResourceMonthOverview>, AllocationError>;
}
