//! In-memory allocation store for testing.

use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicBool, AtomicI32, Ordering},
    Arc, RwLock,
};

use async_trait::async_trait;
use capacity::{
    Category, HourEntryWrite, MonthYear, NewProject, NewResource, Project, ProjectId,
    RawHourEntry, RawProjectRef, RawResource, ResourceId,
};
use serde_json::json;

use crate::domain::{ports::outbound::AllocationStore, AllocationError};

/// (resource, project, year, month)
type EntryKey = (i32, i32, i32, u8);

/// Mock store that mimics the database's foreign-key and unique
/// constraints and records the order of hour-entry writes.
///
/// # Examples
///
/// ```ignore
/// let store = MockAllocationStore::new();
/// let ana = store.add_resource("Ana", 55.0, 45.0, 162.0);
/// ```
#[derive(Clone, Default)]
pub struct MockAllocationStore {
    resources: Arc<RwLock<BTreeMap<i32, RawResource>>>,
    projects: Arc<RwLock<BTreeMap<i32, Project>>>,
    entries: Arc<RwLock<BTreeMap<EntryKey, f64>>>,
    next_id: Arc<AtomicI32>,
    fail_upserts: Arc<AtomicBool>,
    operations: Arc<RwLock<Vec<&'static str>>>,
}

#[allow(dead_code)]
impl MockAllocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upsert fail with a storage error.
    pub fn failing_upserts(self) -> Self {
        self.fail_upserts.store(true, Ordering::SeqCst);
        self
    }

    pub fn add_resource(
        &self,
        name: &str,
        project_percent: f64,
        maintenance_percent: f64,
        total_hours: f64,
    ) -> ResourceId {
        let id = self.next_id();
        self.resources.write().unwrap().insert(
            id,
            RawResource {
                id: Some(id),
                name: Some(name.to_string()),
                project_percent: json!(project_percent),
                maintenance_percent: json!(maintenance_percent),
                total_hours: json!(total_hours),
            },
        );
        ResourceId::new(id)
    }

    /// Insert a resource row as-is, e.g. with malformed columns.
    pub fn add_raw_resource(&self, mut raw: RawResource) -> ResourceId {
        let id = self.next_id();
        raw.id = Some(id);
        self.resources.write().unwrap().insert(id, raw);
        ResourceId::new(id)
    }

    pub fn add_project(&self, name: &str, category: Category) -> ProjectId {
        let id = ProjectId::new(self.next_id());
        self.projects.write().unwrap().insert(
            id.as_i32(),
            Project {
                id,
                name: name.to_string(),
                category,
                folio: None,
            },
        );
        id
    }

    pub fn add_entry(
        &self,
        resource_id: ResourceId,
        project_id: ProjectId,
        period: MonthYear,
        hours: f64,
    ) {
        self.entries
            .write()
            .unwrap()
            .insert(entry_key(resource_id, project_id, period), hours);
    }

    /// Every stored entry, ordered by resource, project, year and month.
    pub fn entries(&self) -> Vec<(ResourceId, ProjectId, MonthYear, f64)> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .map(|(&(r, p, year, month), &hours)| {
                (
                    ResourceId::new(r),
                    ProjectId::new(p),
                    MonthYear { month, year },
                    hours,
                )
            })
            .collect()
    }

    /// Hour-entry writes in the order they happened.
    pub fn operations(&self) -> Vec<&'static str> {
        self.operations.read().unwrap().clone()
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn record(&self, operation: &'static str) {
        self.operations.write().unwrap().push(operation);
    }

    fn check_references(&self, write: &HourEntryWrite) -> Result<(), AllocationError> {
        let resource_exists = self
            .resources
            .read()
            .unwrap()
            .contains_key(&write.key.resource_id.as_i32());
        let project_exists = self
            .projects
            .read()
            .unwrap()
            .contains_key(&write.key.project_id.as_i32());

        if resource_exists && project_exists {
            Ok(())
        } else {
            Err(AllocationError::constraint(
                "insert on table \"hour_entries\" violates foreign key constraint",
            ))
        }
    }

    fn is_referenced(&self, predicate: impl Fn(&EntryKey) -> bool) -> bool {
        self.entries.read().unwrap().keys().any(predicate)
    }

    fn raw_entry(&self, key: &EntryKey, hours: f64) -> RawHourEntry {
        let (resource_id, project_id, year, month) = *key;
        let project = self
            .projects
            .read()
            .unwrap()
            .get(&project_id)
            .map(|p| RawProjectRef {
                name: Some(p.name.clone()),
                category: Some(p.category.as_str().to_string()),
                folio: p.folio.clone(),
            });

        RawHourEntry {
            resource_id: Some(resource_id),
            project_id: Some(project_id),
            month: json!(month),
            year: json!(year),
            hours: json!(hours),
            category: None,
            project,
        }
    }
}

fn entry_key(resource_id: ResourceId, project_id: ProjectId, period: MonthYear) -> EntryKey {
    (
        resource_id.as_i32(),
        project_id.as_i32(),
        period.year,
        period.month,
    )
}

#[async_trait]
impl AllocationStore for MockAllocationStore {
    async fn fetch_resources(&self) -> Result<Vec<RawResource>, AllocationError> {
        Ok(self.resources.read().unwrap().values().cloned().collect())
    }

    async fn fetch_resource(
        &self,
        id: ResourceId,
    ) -> Result<Option<RawResource>, AllocationError> {
        Ok(self.resources.read().unwrap().get(&id.as_i32()).cloned())
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceId, AllocationError> {
        Ok(self.add_resource(
            &resource.name,
            resource.project_percent,
            resource.maintenance_percent,
            resource.total_hours,
        ))
    }

    async fn update_resource(
        &self,
        id: ResourceId,
        resource: &NewResource,
    ) -> Result<bool, AllocationError> {
        let mut resources = self.resources.write().unwrap();
        let Some(row) = resources.get_mut(&id.as_i32()) else {
            return Ok(false);
        };

        row.name = Some(resource.name.clone());
        row.project_percent = json!(resource.project_percent);
        row.maintenance_percent = json!(resource.maintenance_percent);
        row.total_hours = json!(resource.total_hours);
        Ok(true)
    }

    async fn delete_resource(&self, id: ResourceId) -> Result<bool, AllocationError> {
        if self.is_referenced(|&(r, ..)| r == id.as_i32()) {
            return Err(AllocationError::constraint(
                "update or delete on table \"resources\" violates foreign key constraint",
            ));
        }
        Ok(self.resources.write().unwrap().remove(&id.as_i32()).is_some())
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, AllocationError> {
        let mut projects: Vec<Project> = self.projects.read().unwrap().values().cloned().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    async fn fetch_project(&self, id: ProjectId) -> Result<Option<Project>, AllocationError> {
        Ok(self.projects.read().unwrap().get(&id.as_i32()).cloned())
    }

    async fn insert_project(&self, project: &NewProject) -> Result<ProjectId, AllocationError> {
        let id = self.add_project(&project.name, project.category);
        if let Some(row) = self.projects.write().unwrap().get_mut(&id.as_i32()) {
            row.folio = project.folio.clone();
        }
        Ok(id)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        project: &NewProject,
    ) -> Result<bool, AllocationError> {
        let mut projects = self.projects.write().unwrap();
        let Some(row) = projects.get_mut(&id.as_i32()) else {
            return Ok(false);
        };

        *row = project.clone().into_project(id);
        Ok(true)
    }

    async fn delete_project(&self, id: ProjectId) -> Result<bool, AllocationError> {
        if self.is_referenced(|&(_, p, ..)| p == id.as_i32()) {
            return Err(AllocationError::constraint(
                "update or delete on table \"projects\" violates foreign key constraint",
            ));
        }
        Ok(self.projects.write().unwrap().remove(&id.as_i32()).is_some())
    }

    async fn fetch_hour_entries(
        &self,
        resource_id: ResourceId,
        months: &[MonthYear],
    ) -> Result<Vec<RawHourEntry>, AllocationError> {
        let entries = self.entries.read().unwrap().clone();
        Ok(entries
            .iter()
            .filter(|(&(r, _, year, month), _)| {
                r == resource_id.as_i32() && months.contains(&MonthYear { month, year })
            })
            .map(|(key, &hours)| self.raw_entry(key, hours))
            .collect())
    }

    async fn fetch_month_entries(
        &self,
        month: MonthYear,
    ) -> Result<Vec<RawHourEntry>, AllocationError> {
        let entries = self.entries.read().unwrap().clone();
        Ok(entries
            .iter()
            .filter(|(&(_, _, y, m), _)| y == month.year && m == month.month)
            .map(|(key, &hours)| self.raw_entry(key, hours))
            .collect())
    }

    async fn upsert_hour_entries(&self, writes: &[HourEntryWrite]) -> Result<u64, AllocationError> {
        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(AllocationError::storage("connection reset by peer"));
        }
        for write in writes {
            self.check_references(write)?;
        }

        self.record("upsert");
        let mut entries = self.entries.write().unwrap();
        for write in writes {
            let key = entry_key(write.key.resource_id, write.key.project_id, write.key.period);
            entries.insert(key, write.hours);
        }
        Ok(writes.len() as u64)
    }

    async fn delete_hour_entries(
        &self,
        resource_id: ResourceId,
        project_id: ProjectId,
        months: Option<&[MonthYear]>,
    ) -> Result<u64, AllocationError> {
        self.record("delete");
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|&(r, p, year, month), _| {
            let matches = r == resource_id.as_i32()
                && p == project_id.as_i32()
                && months.map_or(true, |ms| ms.contains(&MonthYear { month, year }));
            !matches
        });
        Ok((before - entries.len()) as u64)
    }

    async fn insert_hour_entry(&self, write: &HourEntryWrite) -> Result<(), AllocationError> {
        self.check_references(write)?;

        let key = entry_key(write.key.resource_id, write.key.project_id, write.key.period);
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(&key) {
            return Err(AllocationError::constraint(
                "duplicate key value violates unique constraint \"uq_hour_entries_key\"",
            ));
        }
        entries.insert(key, write.hours);
        Ok(())
    }
}
