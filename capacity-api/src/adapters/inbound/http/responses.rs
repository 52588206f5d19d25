//! HTTP response types for allocation endpoints.
//!
//! These types serialize to the JSON format expected by the frontend.

use capacity::{Category, MonthYear, MonthlyReconciliation, Project, Resource, Window};
use serde::Serialize;

use crate::domain::models::{AssignmentRow, ResourceMonthOverview, SavedAssignment};

/// Resource with its derived hour budgets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: i32,
    pub name: String,
    pub project_percent: f64,
    pub maintenance_percent: f64,
    pub total_hours: f64,
    /// `round(totalHours * projectPercent / 100)`.
    pub project_capacity: f64,
    pub maintenance_capacity: f64,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        let capacity = resource.capacity();
        Self {
            id: resource.id.as_i32(),
            name: resource.name,
            project_percent: resource.project_percent,
            maintenance_percent: resource.maintenance_percent,
            total_hours: resource.total_hours,
            project_capacity: capacity.project,
            maintenance_capacity: capacity.maintenance,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub category: Category,
    pub folio: Option<String>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.as_i32(),
            name: project.name,
            category: project.category,
            folio: project.folio,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRowResponse {
    pub project_id: i32,
    pub project_name: String,
    pub category: Option<Category>,
    pub folio: Option<String>,
    /// Aligned with the response's `window`.
    pub hours: Vec<Option<f64>>,
}

impl From<AssignmentRow> for AssignmentRowResponse {
    fn from(row: AssignmentRow) -> Self {
        Self {
            project_id: row.project_id.as_i32(),
            project_name: row.project_name,
            category: row.category,
            folio: row.folio,
            hours: row.hours,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentsResponse {
    pub window: Window,
    pub rows: Vec<AssignmentRowResponse>,
}

impl AssignmentsResponse {
    pub fn new(window: Window, rows: Vec<AssignmentRow>) -> Self {
        Self {
            window,
            rows: rows.into_iter().map(AssignmentRowResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAssignmentResponse {
    pub row: AssignmentRowResponse,
    /// Rows inserted or replaced.
    pub written: u64,
    /// Rows of the previous project removed by a reassignment.
    pub removed: u64,
}

impl From<SavedAssignment> for SavedAssignmentResponse {
    fn from(saved: SavedAssignment) -> Self {
        Self {
            row: saved.row.into(),
            written: saved.written,
            removed: saved.removed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAssignmentResponse {
    pub removed: u64,
}

/// Reconciled months for one resource, in window order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub resource: ResourceResponse,
    pub months: Vec<MonthlyReconciliation>,
}

impl SummaryResponse {
    pub fn new(resource: Resource, months: Vec<MonthlyReconciliation>) -> Self {
        Self {
            resource: resource.into(),
            months,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRowResponse {
    pub resource: ResourceResponse,
    #[serde(flatten)]
    pub reconciliation: MonthlyReconciliation,
}

impl From<ResourceMonthOverview> for OverviewRowResponse {
    fn from(overview: ResourceMonthOverview) -> Self {
        Self {
            resource: overview.resource.into(),
            reconciliation: overview.month,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub month: u8,
    pub year: i32,
    pub resources: Vec<OverviewRowResponse>,
}

impl OverviewResponse {
    pub fn new(period: MonthYear, rows: Vec<ResourceMonthOverview>) -> Self {
        Self {
            month: period.month,
            year: period.year,
            resources: rows.into_iter().map(OverviewRowResponse::from).collect(),
        }
    }
}
