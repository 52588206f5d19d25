use std::sync::Arc;

use async_trait::async_trait;
use capacity::{
    normalize_resource, reconcile_raw, HourEntryWrite, MonthYear, MonthlyReconciliation,
    NewProject, NewResource, NormalizationReport, Project, ProjectId, ReassignmentPlan, Resource,
    ResourceId, Window,
};
use itertools::Itertools;
use tracing::instrument;

use crate::domain::{
    models::{AssignmentRow, ResourceMonthOverview, SaveAssignmentRequest, SavedAssignment},
    ports::{inbound::AllocationService, outbound::AllocationStore},
    AllocationError,
};

const RESOURCE_IN_USE: &str =
    "This resource still has logged hours. Delete or reassign those hours first.";
const PROJECT_IN_USE: &str =
    "This project still has logged hours. Remove those hours before deleting it.";

/// Implementation of the AllocationService inbound port.
///
/// Reads raw rows from an [`AllocationStore`] and runs them through the
/// reconciler from the `capacity` crate.
pub struct AllocationServiceImpl<S> {
    store: Arc<S>,
}

impl<S> AllocationServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: AllocationStore> AllocationServiceImpl<S> {
    async fn require_resource(&self, id: ResourceId) -> Result<Resource, AllocationError> {
        self.store
            .fetch_resource(id)
            .await?
            .map(|raw| normalize_resource(&raw))
            .ok_or(AllocationError::ResourceNotFound(id))
    }
}

#[async_trait]
impl<S: AllocationStore> AllocationService for AllocationServiceImpl<S> {
    async fn list_resources(&self) -> Result<Vec<Resource>, AllocationError> {
        let raw = self.store.fetch_resources().await?;
        Ok(raw.iter().map(normalize_resource).collect())
    }

    async fn get_resource(&self, id: ResourceId) -> Result<Resource, AllocationError> {
        self.require_resource(id).await
    }

    #[instrument(skip(self))]
    async fn create_resource(&self, input: NewResource) -> Result<Resource, AllocationError> {
        let id = self.store.insert_resource(&input).await?;
        tracing::info!(resource_id = %id, "resource created");
        Ok(input.into_resource(id))
    }

    #[instrument(skip(self))]
    async fn update_resource(
        &self,
        id: ResourceId,
        input: NewResource,
    ) -> Result<Resource, AllocationError> {
        if !self.store.update_resource(id, &input).await? {
            return Err(AllocationError::ResourceNotFound(id));
        }
        Ok(input.into_resource(id))
    }

    #[instrument(skip(self))]
    async fn delete_resource(&self, id: ResourceId) -> Result<(), AllocationError> {
        let deleted = self
            .store
            .delete_resource(id)
            .await
            .map_err(|e| e.with_constraint_message(RESOURCE_IN_USE))?;

        if !deleted {
            return Err(AllocationError::ResourceNotFound(id));
        }
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AllocationError> {
        self.store.fetch_projects().await
    }

    #[instrument(skip(self))]
    async fn create_project(&self, input: NewProject) -> Result<Project, AllocationError> {
        let id = self.store.insert_project(&input).await?;
        tracing::info!(project_id = %id, "project created");
        Ok(input.into_project(id))
    }

    #[instrument(skip(self))]
    async fn update_project(
        &self,
        id: ProjectId,
        input: NewProject,
    ) -> Result<Project, AllocationError> {
        if !self.store.update_project(id, &input).await? {
            return Err(AllocationError::ProjectNotFound(id));
        }
        Ok(input.into_project(id))
    }

    #[instrument(skip(self))]
    async fn delete_project(&self, id: ProjectId) -> Result<(), AllocationError> {
        let deleted = self
            .store
            .delete_project(id)
            .await
            .map_err(|e| e.with_constraint_message(PROJECT_IN_USE))?;

        if !deleted {
            return Err(AllocationError::ProjectNotFound(id));
        }
        Ok(())
    }

    async fn get_assignments(
        &self,
        resource_id: ResourceId,
        window: &Window,
    ) -> Result<Vec<AssignmentRow>, AllocationError> {
        self.require_resource(resource_id).await?;

        let raw = self
            .store
            .fetch_hour_entries(resource_id, window.months())
            .await?;

        Ok(AssignmentRow::from_entries(&raw, window))
    }

    #[instrument(skip(self, window))]
    async fn save_assignment(
        &self,
        resource_id: ResourceId,
        request: &SaveAssignmentRequest,
        window: &Window,
    ) -> Result<SavedAssignment, AllocationError> {
        // Everything is validated before the first write.
        let plan = ReassignmentPlan::build(
            resource_id,
            request.project_id,
            request.previous_project_id,
            window,
            &request.hours,
        )?;
        self.require_resource(resource_id).await?;
        let project = self
            .store
            .fetch_project(request.project_id)
            .await?
            .ok_or(AllocationError::ProjectNotFound(request.project_id))?;

        let written = if plan.upserts.is_empty() {
            0
        } else {
            self.store.upsert_hour_entries(&plan.upserts).await?
        };

        let removed = match plan.cleanup_after(written) {
            Some(cleanup) => {
                self.store
                    .delete_hour_entries(
                        cleanup.resource_id,
                        cleanup.project_id,
                        Some(&cleanup.months),
                    )
                    .await?
            }
            None => {
                if plan.is_reassignment() {
                    tracing::debug!("no hours written, keeping previous project's hours");
                }
                0
            }
        };

        tracing::info!(written, removed, "assignment saved");

        Ok(SavedAssignment {
            row: AssignmentRow::new(&project, request.hours.clone()),
            written,
            removed,
        })
    }

    #[instrument(skip(self))]
    async fn delete_assignment(
        &self,
        resource_id: ResourceId,
        project_id: ProjectId,
    ) -> Result<u64, AllocationError> {
        self.store
            .delete_hour_entries(resource_id, project_id, None)
            .await
    }

    async fn record_hour_entry(&self, write: &HourEntryWrite) -> Result<(), AllocationError> {
        self.store.insert_hour_entry(write).await
    }

    async fn get_summary(
        &self,
        resource_id: ResourceId,
        window: &Window,
    ) -> Result<(Resource, Vec<MonthlyReconciliation>), AllocationError> {
        let raw_resource = self
            .store
            .fetch_resource(resource_id)
            .await?
            .ok_or(AllocationError::ResourceNotFound(resource_id))?;
        let raw_entries = self
            .store
            .fetch_hour_entries(resource_id, window.months())
            .await?;

        let reconciliation = reconcile_raw(&raw_entries, &raw_resource, window);
        log_report(resource_id, &reconciliation.report);

        Ok((reconciliation.resource, reconciliation.months))
    }

    async fn get_month_overview(
        &self,
        month: MonthYear,
    ) -> Result<Vec<ResourceMonthOverview>, AllocationError> {
        let resources = self.store.fetch_resources().await?;
        let by_resource = self
            .store
            .fetch_month_entries(month)
            .await?
            .into_iter()
            .into_group_map_by(|e| e.resource_id);

        let window = Window::new(vec![month]);
        let overview = resources
            .iter()
            .filter(|raw| raw.id.is_some())
            .filter_map(|raw| {
                let entries = by_resource.get(&raw.id).map(Vec::as_slice).unwrap_or(&[]);
                let reconciliation = reconcile_raw(entries, raw, &window);
                log_report(reconciliation.resource.id, &reconciliation.report);

                let month = reconciliation.months.into_iter().next()?;
                Some(ResourceMonthOverview {
                    resource: reconciliation.resource,
                    month,
                })
            })
            .collect();

        Ok(overview)
    }
}

fn log_report(resource_id: ResourceId, report: &NormalizationReport) {
    if report.dropped > 0 {
        tracing::warn!(
            resource_id = %resource_id,
            dropped = report.dropped,
            "skipped hour entries that could not be normalized"
        );
    }
    if report.conflicts > 0 {
        tracing::warn!(
            resource_id = %resource_id,
            conflicts = report.conflicts,
            "hour entries repeated a resource/project/month key"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::MockAllocationStore;
    use capacity::{Category, Status};

    fn service(store: &MockAllocationStore) -> AllocationServiceImpl<MockAllocationStore> {
        AllocationServiceImpl::new(Arc::new(store.clone()))
    }

    fn my(month: u8, year: i32) -> MonthYear {
        MonthYear::new(month, year).unwrap()
    }

    fn window() -> Window {
        Window::rolling(my(3, 2025), 3).unwrap()
    }

    #[tokio::test]
    async fn created_resource_reports_derived_capacity() {
        let store = MockAllocationStore::new();
        let service = service(&store);

        let input = NewResource::new("Ana", 55.0, 45.0, 162.0).unwrap();
        let created = service.create_resource(input).await.unwrap();
        let listed = service.list_resources().await.unwrap();

        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(created.capacity().project, 89.0);
        assert_eq!(created.capacity().maintenance, 73.0);
    }

    #[tokio::test]
    async fn update_of_missing_resource_is_not_found() {
        let store = MockAllocationStore::new();
        let input = NewResource::new("Ana", 50.0, 50.0, 100.0).unwrap();

        let err = service(&store)
            .update_resource(ResourceId::new(42), input)
            .await
            .unwrap_err();

        assert!(matches!(err, AllocationError::ResourceNotFound(id) if id.as_i32() == 42));
    }

    #[tokio::test]
    async fn saving_the_same_assignment_twice_is_idempotent() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let project = store.add_project("Portal", Category::Project);
        let request = SaveAssignmentRequest {
            project_id: project,
            previous_project_id: None,
            hours: vec![Some(40.0), None, Some(12.5)],
        };

        service(&store)
            .save_assignment(resource, &request, &window())
            .await
            .unwrap();
        let once = store.entries();
        service(&store)
            .save_assignment(resource, &request, &window())
            .await
            .unwrap();

        assert_eq!(store.entries(), once);
        assert_eq!(once.len(), 2);
    }

    #[tokio::test]
    async fn reassignment_writes_before_deleting_previous_project() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let old = store.add_project("Portal", Category::Project);
        let new = store.add_project("Intranet", Category::Project);
        store.add_entry(resource, old, my(3, 2025), 30.0);
        store.add_entry(resource, old, my(4, 2025), 30.0);
        store.add_entry(resource, old, my(9, 2025), 8.0);

        let saved = service(&store)
            .save_assignment(
                resource,
                &SaveAssignmentRequest {
                    project_id: new,
                    previous_project_id: Some(old),
                    hours: vec![Some(30.0), Some(30.0), None],
                },
                &window(),
            )
            .await
            .unwrap();

        assert_eq!(saved.written, 2);
        assert_eq!(saved.removed, 2);
        assert_eq!(saved.row.project_name, "Intranet");
        assert_eq!(store.operations(), vec!["upsert", "delete"]);

        let remaining = store.entries();
        assert!(remaining.contains(&(resource, old, my(9, 2025), 8.0)));
        assert!(remaining.contains(&(resource, new, my(3, 2025), 30.0)));
        assert_eq!(remaining.len(), 3);
    }

    #[tokio::test]
    async fn reassignment_without_hours_keeps_previous_project() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let old = store.add_project("Portal", Category::Project);
        let new = store.add_project("Intranet", Category::Project);
        store.add_entry(resource, old, my(3, 2025), 30.0);

        let saved = service(&store)
            .save_assignment(
                resource,
                &SaveAssignmentRequest {
                    project_id: new,
                    previous_project_id: Some(old),
                    hours: vec![None, None, None],
                },
                &window(),
            )
            .await
            .unwrap();

        assert_eq!(saved.removed, 0);
        assert!(store.operations().is_empty());
        assert_eq!(store.entries(), vec![(resource, old, my(3, 2025), 30.0)]);
    }

    #[tokio::test]
    async fn failed_write_never_deletes_previous_hours() {
        let store = MockAllocationStore::new().failing_upserts();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let old = store.add_project("Portal", Category::Project);
        let new = store.add_project("Intranet", Category::Project);
        store.add_entry(resource, old, my(3, 2025), 30.0);

        let err = service(&store)
            .save_assignment(
                resource,
                &SaveAssignmentRequest {
                    project_id: new,
                    previous_project_id: Some(old),
                    hours: vec![Some(10.0), None, None],
                },
                &window(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AllocationError::Storage(_)));
        assert!(!store.operations().contains(&"delete"));
        assert_eq!(store.entries(), vec![(resource, old, my(3, 2025), 30.0)]);
    }

    #[tokio::test]
    async fn invalid_hours_are_rejected_before_any_write() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let project = store.add_project("Portal", Category::Project);

        let err = service(&store)
            .save_assignment(
                resource,
                &SaveAssignmentRequest {
                    project_id: project,
                    previous_project_id: None,
                    hours: vec![Some(5.0), Some(-1.0), None],
                },
                &window(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AllocationError::Validation(_)));
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn saving_against_unknown_project_fails() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);

        let err = service(&store)
            .save_assignment(
                resource,
                &SaveAssignmentRequest {
                    project_id: ProjectId::new(99),
                    previous_project_id: None,
                    hours: vec![Some(5.0), None, None],
                },
                &window(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AllocationError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn deleting_referenced_project_reports_friendly_violation() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let project = store.add_project("Portal", Category::Project);
        store.add_entry(resource, project, my(3, 2025), 30.0);

        let err = service(&store).delete_project(project).await.unwrap_err();

        match err {
            AllocationError::ConstraintViolation(msg) => assert_eq!(msg, PROJECT_IN_USE),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(service(&store).list_projects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_referenced_resource_reports_friendly_violation() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let project = store.add_project("Portal", Category::Project);
        store.add_entry(resource, project, my(3, 2025), 30.0);

        let err = service(&store).delete_resource(resource).await.unwrap_err();
        assert!(matches!(err, AllocationError::ConstraintViolation(ref m) if m == RESOURCE_IN_USE));

        service(&store)
            .delete_assignment(resource, project)
            .await
            .unwrap();
        service(&store).delete_resource(resource).await.unwrap();
        assert!(service(&store).list_resources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn summary_reconciles_window_months() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let portal = store.add_project("Portal", Category::Project);
        let support = store.add_project("Soporte", Category::Maintenance);
        store.add_entry(resource, portal, my(3, 2025), 40.0);
        store.add_entry(resource, support, my(3, 2025), 80.0);
        store.add_entry(resource, support, my(5, 2025), 10.0);

        let (summary_resource, months) = service(&store)
            .get_summary(resource, &window())
            .await
            .unwrap();

        assert_eq!(summary_resource.name, "Ana");
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].summary.total_assigned, 120.0);
        assert_eq!(months[0].total_status, Status::Warning);
        assert_eq!(months[1].summary.total_assigned, 0.0);
        assert_eq!(months[2].summary.sum_maintenance, 10.0);
        assert_eq!(months[2].total_status, Status::Under);
    }

    #[tokio::test]
    async fn summary_of_unknown_resource_is_not_found() {
        let store = MockAllocationStore::new();

        let err = service(&store)
            .get_summary(ResourceId::new(7), &window())
            .await
            .unwrap_err();

        assert!(matches!(err, AllocationError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn month_overview_covers_every_resource() {
        let store = MockAllocationStore::new();
        let ana = store.add_resource("Ana", 50.0, 50.0, 100.0);
        let luis = store.add_resource("Luis", 100.0, 0.0, 80.0);
        let portal = store.add_project("Portal", Category::Project);
        store.add_entry(ana, portal, my(3, 2025), 50.0);
        store.add_entry(ana, portal, my(4, 2025), 99.0);

        let overview = service(&store).get_month_overview(my(3, 2025)).await.unwrap();

        assert_eq!(overview.len(), 2);
        let ana_row = overview.iter().find(|o| o.resource.id == ana).unwrap();
        assert_eq!(ana_row.month.summary.sum_project, 50.0);
        assert_eq!(ana_row.month.project_status, Status::Met);
        let luis_row = overview.iter().find(|o| o.resource.id == luis).unwrap();
        assert_eq!(luis_row.month.summary.total_assigned, 0.0);
        assert_eq!(luis_row.month.total_status, Status::Under);
    }

    #[tokio::test]
    async fn duplicate_plain_insert_is_a_constraint_violation() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let project = store.add_project("Portal", Category::Project);
        let write = HourEntryWrite::from_parts(
            Some(resource.as_i32()),
            Some(project.as_i32()),
            Some(3),
            Some(2025),
            Some(8.0),
        )
        .unwrap();

        service(&store).record_hour_entry(&write).await.unwrap();
        let err = service(&store).record_hour_entry(&write).await.unwrap_err();

        assert!(matches!(err, AllocationError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn assignments_group_hours_per_project() {
        let store = MockAllocationStore::new();
        let resource = store.add_resource("Ana", 55.0, 45.0, 162.0);
        let portal = store.add_project("Portal", Category::Project);
        store.add_entry(resource, portal, my(4, 2025), 16.0);

        let rows = service(&store)
            .get_assignments(resource, &window())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project_id, portal);
        assert_eq!(rows[0].hours, vec![None, Some(16.0), None]);
    }
}
